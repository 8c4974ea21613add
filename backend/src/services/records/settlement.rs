//! `GET /api/records/settlement`: published records at one settlement.

use actix_web::web::{Data, Query};
use actix_web::{HttpResponse, Responder};
use common::requests::SettlementQuery;
use log::error;

use crate::store::Database;

pub async fn process(db: Data<Database>, query: Query<SettlementQuery>) -> impl Responder {
    match db.approved_at_settlement(&query) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            error!("Failed to list records for {}: {}", query.current_settlement_name, e);
            HttpResponse::ServiceUnavailable().body("Error listing records")
        }
    }
}
