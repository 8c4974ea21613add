//! `GET /api/records/{record_id}`: record detail.

use actix_web::web::{Data, Path};
use actix_web::{HttpResponse, Responder};
use log::error;

use crate::store::Database;

pub async fn process(db: Data<Database>, record_id: Path<String>) -> impl Responder {
    match db.get_approved(&record_id) {
        Ok(Some(record)) => HttpResponse::Ok().json(record),
        Ok(None) => HttpResponse::NotFound().body("Record not found"),
        Err(e) => {
            error!("Failed to read record {}: {}", record_id, e);
            HttpResponse::ServiceUnavailable().body("Error retrieving record")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::temp_db;
    use actix_web::{test as actix_test, App};
    use common::model::record::{ApprovedRecord, RecordFields};

    #[actix_web::test]
    async fn returns_record_or_not_found() {
        let (_dir, db) = temp_db();
        let id = db
            .insert_approved(
                &RecordFields {
                    case_title: Some("Інвентар маєтку".into()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/records/{}", id))
            .to_request();
        let record: ApprovedRecord = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.fields.case_title.as_deref(), Some("Інвентар маєтку"));

        let req = actix_test::TestRequest::get().uri("/api/records/missing").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
