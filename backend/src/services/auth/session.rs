use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse, Responder};
use log::error;

use super::{current_user, session_info};
use crate::store::Database;

/// `GET /api/auth/session`
pub async fn process(db: Data<Database>, req: HttpRequest) -> impl Responder {
    let user = match current_user(&db, &req) {
        Ok(user) => user,
        Err(denied) => return denied.response(),
    };
    let Some(user) = user else {
        return HttpResponse::Ok().json(Option::<common::requests::SessionInfo>::None);
    };
    match session_info(&db, &user) {
        Ok(info) => HttpResponse::Ok().json(Some(info)),
        Err(e) => {
            error!("Failed to load session of {}: {}", user, e);
            HttpResponse::ServiceUnavailable().body("Error loading session")
        }
    }
}
