//! # Auth Service
//!
//! Server-side sessions for contributors and moderators. Signing in checks
//! the password against the account's argon2 hash, stores a session and sets
//! its token in an `HttpOnly` cookie. Every other service resolves the caller
//! from that cookie through `current_user` or `require_admin`; nothing the
//! client sends besides the token is trusted as identity.
//!
//! ## Sub-modules:
//! - `password`: hashing and verification.
//! - `session`: who is signed in.
//! - `sign_in`, `sign_up`, `sign_out`: session lifecycle.

pub mod password;
mod session;
mod sign_in;
mod sign_out;
mod sign_up;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::web::{get, post, scope};
use actix_web::{HttpRequest, HttpResponse, Scope};
use common::requests::SessionInfo;
use log::{error, warn};

use crate::store::{Database, StoreError};

pub const SESSION_COOKIE: &str = "inventarium_session";

const API_PATH: &str = "/api/auth";

/// Session options from the config file, shared as `web::Data`.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl_hours: i64,
    pub secure_cookie: bool,
}

/// # Registered Routes:
///
/// *   **`GET /session`**: the signed-in user, or `null`.
/// *   **`POST /sign_in`**: body `Credentials`; `200` with `SessionInfo` and
///     the session cookie, `401` for an unknown user or wrong password.
/// *   **`POST /sign_up`**: body `Credentials`; creates a contributor account
///     and signs it in (`201`), `409` when the id is taken.
/// *   **`POST /sign_out`**: ends the session and clears the cookie.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/session", get().to(session::process))
        .route("/sign_in", post().to(sign_in::process))
        .route("/sign_up", post().to(sign_up::process))
        .route("/sign_out", post().to(sign_out::process))
}

#[derive(Debug)]
pub enum AuthError {
    NotSignedIn,
    NoAccess(String),
    Store(StoreError),
}

impl AuthError {
    pub fn response(&self) -> HttpResponse {
        match self {
            AuthError::NotSignedIn => HttpResponse::Unauthorized().body("not signed in"),
            AuthError::NoAccess(_) => HttpResponse::Forbidden().body("no access"),
            AuthError::Store(_) => {
                HttpResponse::ServiceUnavailable().body("Error checking access")
            }
        }
    }
}

/// The user behind the request's session cookie, if it names a live session.
pub fn current_user(db: &Database, req: &HttpRequest) -> Result<Option<String>, AuthError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };
    db.session_user(cookie.value()).map_err(|e| {
        error!("Session lookup failed: {}", e);
        AuthError::Store(e)
    })
}

/// Returns the administrator's identifier or the reason the caller is refused.
pub fn require_admin(db: &Database, req: &HttpRequest) -> Result<String, AuthError> {
    let user = current_user(db, req)?.ok_or(AuthError::NotSignedIn)?;
    match db.is_admin(&user) {
        Ok(true) => Ok(user),
        Ok(false) => {
            warn!("User {} tried to reach moderation without access", user);
            Err(AuthError::NoAccess(user))
        }
        Err(e) => {
            error!("Admin check failed for {}: {}", user, e);
            Err(AuthError::Store(e))
        }
    }
}

fn session_info(db: &Database, user_id: &str) -> Result<SessionInfo, StoreError> {
    Ok(SessionInfo {
        user_id: user_id.to_string(),
        is_admin: db.is_admin(user_id)?,
    })
}

fn session_cookie(token: String, settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(settings.secure_cookie)
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::tests::temp_db;
    use actix_web::test::TestRequest;

    /// Cookie of a fresh session for `user`, for handler tests.
    pub(crate) fn signed_in(db: &Database, user: &str) -> Cookie<'static> {
        let token = db.create_session(user, 1).unwrap();
        Cookie::new(SESSION_COOKIE, token)
    }

    pub(crate) fn settings() -> SessionSettings {
        SessionSettings {
            ttl_hours: 24,
            secure_cookie: false,
        }
    }

    #[test]
    fn unknown_or_missing_token_is_anonymous() {
        let (_dir, db) = temp_db();
        let req = TestRequest::default().to_http_request();
        assert_eq!(current_user(&db, &req).unwrap(), None);

        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "made-up"))
            .to_http_request();
        assert_eq!(current_user(&db, &req).unwrap(), None);
    }

    #[test]
    fn identity_header_is_not_trusted() {
        let (_dir, db) = temp_db();
        db.seed_admins(&["admin".to_string()]).unwrap();
        let req = TestRequest::default()
            .insert_header(("X-User-Id", "admin"))
            .to_http_request();
        assert!(matches!(require_admin(&db, &req), Err(AuthError::NotSignedIn)));
    }

    #[test]
    fn admin_gate_distinguishes_anonymous_and_non_admin() {
        let (_dir, db) = temp_db();
        db.seed_admins(&["admin".to_string()]).unwrap();

        let anonymous = TestRequest::default().to_http_request();
        assert!(matches!(require_admin(&db, &anonymous), Err(AuthError::NotSignedIn)));

        let visitor = TestRequest::default()
            .cookie(signed_in(&db, "visitor"))
            .to_http_request();
        assert!(matches!(require_admin(&db, &visitor), Err(AuthError::NoAccess(_))));

        let admin = TestRequest::default()
            .cookie(signed_in(&db, "admin"))
            .to_http_request();
        assert_eq!(require_admin(&db, &admin).unwrap(), "admin");
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("token".into(), &settings());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }
}
