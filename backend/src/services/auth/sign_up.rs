//! # Sign Up
//!
//! Creates a contributor account and signs it in. Identifiers listed as
//! administrators cannot be registered here; their accounts come from the
//! config file only.

use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use common::requests::{Credentials, SessionInfo};
use log::{error, info};
use thiserror::Error;

use super::password::hash_password;
use super::{session_cookie, session_info, SessionSettings};
use crate::store::{Database, StoreError};

#[derive(Debug, Error)]
pub enum SignUpError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("Це ім'я користувача вже зайняте.")]
    Taken,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// `POST /api/auth/sign_up`
pub async fn process(
    db: Data<Database>,
    settings: Data<SessionSettings>,
    credentials: Json<Credentials>,
) -> impl Responder {
    match sign_up(&db, &settings, &credentials) {
        Ok((token, session)) => HttpResponse::Created()
            .cookie(session_cookie(token, &settings))
            .json(session),
        Err(e @ SignUpError::Invalid(_)) => HttpResponse::BadRequest().body(e.to_string()),
        Err(e @ SignUpError::Taken) => HttpResponse::Conflict().body(e.to_string()),
        Err(e) => {
            error!("Sign-up failed: {}", e);
            HttpResponse::ServiceUnavailable().body("Error creating account")
        }
    }
}

pub fn sign_up(
    db: &Database,
    settings: &SessionSettings,
    credentials: &Credentials,
) -> Result<(String, SessionInfo), SignUpError> {
    credentials.check_new_account().map_err(SignUpError::Invalid)?;
    let user = credentials.user_id.trim();
    if db.is_admin(user)? {
        return Err(SignUpError::Taken);
    }
    let hash = hash_password(&credentials.password).map_err(|e| SignUpError::Hash(e.to_string()))?;
    if !db.create_account(user, &hash)? {
        return Err(SignUpError::Taken);
    }
    info!("Account {} created", user);
    let token = db.create_session(user, settings.ttl_hours)?;
    Ok((token, session_info(db, user)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::password::verify_password;
    use crate::services::auth::tests::settings;
    use crate::store::tests::temp_db;

    fn credentials(user_id: &str) -> Credentials {
        Credentials {
            user_id: user_id.into(),
            password: "archive-1850".into(),
        }
    }

    #[test]
    fn new_contributor_is_signed_in() {
        let (_dir, db) = temp_db();
        let (token, session) = sign_up(&db, &settings(), &credentials("olena")).unwrap();
        assert!(!session.is_admin);
        assert_eq!(db.session_user(&token).unwrap().as_deref(), Some("olena"));
        let hash = db.account_password_hash("olena").unwrap().unwrap();
        assert!(verify_password("archive-1850", &hash));
    }

    #[test]
    fn taken_and_admin_ids_are_refused() {
        let (_dir, db) = temp_db();
        db.seed_admins(&["admin".to_string()]).unwrap();
        sign_up(&db, &settings(), &credentials("olena")).unwrap();

        assert!(matches!(
            sign_up(&db, &settings(), &credentials("olena")),
            Err(SignUpError::Taken)
        ));
        assert!(matches!(
            sign_up(&db, &settings(), &credentials("admin")),
            Err(SignUpError::Taken)
        ));
        assert_eq!(db.account_password_hash("admin").unwrap(), None);
    }

    #[test]
    fn weak_password_is_refused() {
        let (_dir, db) = temp_db();
        let mut weak = credentials("olena");
        weak.password = "1850".into();
        assert!(matches!(
            sign_up(&db, &settings(), &weak),
            Err(SignUpError::Invalid(_))
        ));
    }
}
