//! # Map Service
//!
//! `GET /api/map/points`: every published record that has both coordinates,
//! reduced to what the map page needs to draw a marker.

use actix_web::web::{get, scope, Data};
use actix_web::{HttpResponse, Responder, Scope};
use log::error;

use crate::store::Database;

const API_PATH: &str = "/api/map";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/points", get().to(process))
}

pub async fn process(db: Data<Database>) -> impl Responder {
    match db.map_points() {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => {
            error!("Failed to load map points: {}", e);
            HttpResponse::ServiceUnavailable().body("Error loading map points")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::temp_db;
    use actix_web::{test as actix_test, App};
    use common::model::record::RecordFields;
    use common::requests::MapPoint;

    #[actix_web::test]
    async fn serves_points_with_coordinates() {
        let (_dir, db) = temp_db();
        db.insert_approved(
            &RecordFields {
                latitude: Some(49.84),
                longitude: Some(24.03),
                mark_type: Some(2),
                current_settlement_name: Some("Львів".into()),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        db.insert_approved(&RecordFields::default(), None).unwrap();

        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(db))
                .service(configure_routes()),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/api/map/points").to_request();
        let points: Vec<MapPoint> = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].mark_type, Some(2));
    }
}
