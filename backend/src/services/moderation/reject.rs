use actix_web::web::{Data, Json, Path};
use actix_web::{HttpRequest, HttpResponse, Responder};
use common::requests::RejectRequest;
use log::{error, info};

use crate::services::auth::require_admin;
use crate::store::{Database, StoreError};

/// `POST /api/moderation/{record_id}/reject`
pub async fn process(
    db: Data<Database>,
    req: HttpRequest,
    record_id: Path<String>,
    body: Json<RejectRequest>,
) -> impl Responder {
    let moderator = match require_admin(&db, &req) {
        Ok(moderator) => moderator,
        Err(denied) => return denied.response(),
    };
    if !body.confirmed {
        return HttpResponse::BadRequest().body("Rejection must be confirmed");
    }
    match db.delete_pending(&record_id) {
        Ok(()) => {
            info!("Record {} rejected by {}", record_id, moderator);
            HttpResponse::NoContent().finish()
        }
        Err(StoreError::NotFound(id)) => {
            HttpResponse::NotFound().body(format!("Pending record {} not found", id))
        }
        Err(e) => {
            error!("Failed to reject record {}: {}", record_id, e);
            HttpResponse::ServiceUnavailable().body("Error rejecting record")
        }
    }
}
