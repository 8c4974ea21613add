use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse, Responder};
use log::error;

use crate::services::auth::require_admin;
use crate::store::Database;

/// `GET /api/moderation/queue`
pub async fn process(db: Data<Database>, req: HttpRequest) -> impl Responder {
    if let Err(denied) = require_admin(&db, &req) {
        return denied.response();
    }
    match db.list_pending() {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            error!("Failed to load moderation queue: {}", e);
            HttpResponse::ServiceUnavailable().body("Error loading queue")
        }
    }
}
