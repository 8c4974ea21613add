use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse, Responder};
use log::{error, info};

use super::{removal_cookie, SESSION_COOKIE};
use crate::store::Database;

/// `POST /api/auth/sign_out`. The cookie is cleared even when the session
/// was already gone.
pub async fn process(db: Data<Database>, req: HttpRequest) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        match db.delete_session(cookie.value()) {
            Ok(true) => info!("Session closed"),
            Ok(false) => {}
            Err(e) => {
                error!("Failed to close session: {}", e);
                return HttpResponse::ServiceUnavailable().body("Error signing out");
            }
        }
    }
    HttpResponse::NoContent().cookie(removal_cookie()).finish()
}
