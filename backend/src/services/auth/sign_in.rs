//! # Sign In
//!
//! Unknown users and wrong passwords get the same answer.

use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use common::requests::{Credentials, SessionInfo};
use log::{error, info, warn};

use super::password::verify_password;
use super::{session_cookie, session_info, SessionSettings};
use crate::store::{Database, StoreError};

pub const WRONG_CREDENTIALS: &str = "Невірне ім'я користувача або пароль.";

/// `POST /api/auth/sign_in`
pub async fn process(
    db: Data<Database>,
    settings: Data<SessionSettings>,
    credentials: Json<Credentials>,
) -> impl Responder {
    match sign_in(&db, &settings, &credentials) {
        Ok(Some((token, session))) => HttpResponse::Ok()
            .cookie(session_cookie(token, &settings))
            .json(session),
        Ok(None) => HttpResponse::Unauthorized().body(WRONG_CREDENTIALS),
        Err(e) => {
            error!("Sign-in failed: {}", e);
            HttpResponse::ServiceUnavailable().body("Error signing in")
        }
    }
}

/// Opens a session when the password matches; returns its token.
pub fn sign_in(
    db: &Database,
    settings: &SessionSettings,
    credentials: &Credentials,
) -> Result<Option<(String, SessionInfo)>, StoreError> {
    let user = credentials.user_id.trim();
    let Some(hash) = db.account_password_hash(user)? else {
        warn!("Sign-in attempt for unknown user {}", user);
        return Ok(None);
    };
    if !verify_password(&credentials.password, &hash) {
        warn!("Wrong password for {}", user);
        return Ok(None);
    }
    let token = db.create_session(user, settings.ttl_hours)?;
    info!("User {} signed in", user);
    Ok(Some((token, session_info(db, user)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::password::hash_password;
    use crate::services::auth::tests::settings;
    use crate::services::auth::SESSION_COOKIE;
    use crate::store::tests::temp_db;
    use actix_web::{test as actix_test, App};

    fn credentials(user_id: &str, password: &str) -> Credentials {
        Credentials {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    #[test]
    fn only_the_right_password_opens_a_session() {
        let (_dir, db) = temp_db();
        db.upsert_account("admin", &hash_password("archive-1850").unwrap())
            .unwrap();
        db.seed_admins(&["admin".to_string()]).unwrap();

        assert!(sign_in(&db, &settings(), &credentials("admin", "guess")).unwrap().is_none());
        assert!(sign_in(&db, &settings(), &credentials("nobody", "archive-1850"))
            .unwrap()
            .is_none());

        let (token, session) = sign_in(&db, &settings(), &credentials(" admin ", "archive-1850"))
            .unwrap()
            .unwrap();
        assert!(session.is_admin);
        assert_eq!(db.session_user(&token).unwrap().as_deref(), Some("admin"));
    }

    #[actix_web::test]
    async fn signed_in_cookie_reaches_the_admin_gate() {
        let (_dir, db) = temp_db();
        db.upsert_account("admin", &hash_password("archive-1850").unwrap())
            .unwrap();
        db.seed_admins(&["admin".to_string()]).unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(db.clone()))
                .app_data(Data::new(settings()))
                .service(crate::services::auth::configure_routes())
                .service(crate::services::moderation::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/sign_in")
            .set_json(credentials("admin", "wrong"))
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 401);

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/sign_in")
            .set_json(credentials("admin", "archive-1850"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .unwrap()
            .into_owned();

        let req = actix_test::TestRequest::get()
            .uri("/api/moderation/queue")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 200);

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/sign_out")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 204);

        let req = actix_test::TestRequest::get()
            .uri("/api/moderation/queue")
            .cookie(cookie)
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 401);
    }
}
