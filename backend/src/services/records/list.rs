//! `GET /api/records`: one page of the public registry.

use actix_web::web::{Data, Query};
use actix_web::{HttpResponse, Responder};
use common::requests::{RecordsPage, RecordsQuery, PAGE_SIZE};
use log::error;

use crate::store::{Database, StoreError};

pub async fn process(db: Data<Database>, query: Query<RecordsQuery>) -> impl Responder {
    match list_records(&db, &query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => {
            error!("Failed to list records: {}", e);
            HttpResponse::ServiceUnavailable().body("Error listing records")
        }
    }
}

/// Newest published records first; empty filters are ignored.
pub fn list_records(db: &Database, query: &RecordsQuery) -> Result<RecordsPage, StoreError> {
    Ok(RecordsPage {
        page: query.page.max(1),
        page_size: PAGE_SIZE,
        records: db.list_approved(query)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::temp_db;
    use actix_web::{test as actix_test, App};
    use common::model::record::RecordFields;

    #[actix_web::test]
    async fn query_string_filters_the_page() {
        let (_dir, db) = temp_db();
        for (name, year) in [("Буча", 1850), ("Ірпінь", 1890)] {
            db.insert_approved(
                &RecordFields {
                    current_settlement_name: Some(name.into()),
                    inventory_year: Some(year),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        }
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/records?page=1&inventory_year_from=1880")
            .to_request();
        let page: RecordsPage = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.page, 1);
        assert_eq!(page.records.len(), 1);
        assert_eq!(
            page.records[0].fields.current_settlement_name.as_deref(),
            Some("Ірпінь")
        );
        assert!(!page.has_next());
    }
}
