//! Server-side sign-in sessions.
//!
//! A session is a random token mapped to a user id with an expiry time. The
//! token travels only in the `HttpOnly` session cookie; expired rows are
//! ignored on lookup and purged at startup.

use chrono::{Duration, Utc};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{timestamp, Database, StoreError};

impl Database {
    /// Opens a session for `user_id` lasting `ttl_hours` and returns its token.
    pub fn create_session(&self, user_id: &str, ttl_hours: i64) -> Result<String, StoreError> {
        let conn = self.open()?;
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let now = Utc::now();
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                token,
                user_id,
                timestamp(now),
                timestamp(now + Duration::hours(ttl_hours))
            ],
        )?;
        Ok(token)
    }

    /// The user behind a live session token.
    pub fn session_user(&self, token: &str) -> Result<Option<String>, StoreError> {
        let conn = self.open()?;
        let user = conn
            .query_row(
                "SELECT user_id FROM sessions WHERE token = ?1 AND expires_at > ?2",
                params![token, timestamp(Utc::now())],
                |row| row.get(0),
            )
            .optional()?;
        Ok(user)
    }

    pub fn delete_session(&self, token: &str) -> Result<bool, StoreError> {
        let conn = self.open()?;
        let deleted = conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        Ok(deleted > 0)
    }

    pub fn purge_expired_sessions(&self) -> Result<usize, StoreError> {
        let conn = self.open()?;
        let purged = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            params![timestamp(Utc::now())],
        )?;
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::temp_db;

    #[test]
    fn live_session_resolves_until_deleted() {
        let (_dir, db) = temp_db();
        let token = db.create_session("olena", 24).unwrap();
        assert_eq!(token.len(), 64);
        assert_eq!(db.session_user(&token).unwrap().as_deref(), Some("olena"));
        assert_eq!(db.session_user("forged-token").unwrap(), None);

        assert!(db.delete_session(&token).unwrap());
        assert_eq!(db.session_user(&token).unwrap(), None);
        assert!(!db.delete_session(&token).unwrap());
    }

    #[test]
    fn expired_sessions_are_ignored_and_purged() {
        let (_dir, db) = temp_db();
        let expired = db.create_session("olena", -1).unwrap();
        let live = db.create_session("olena", 1).unwrap();
        assert_eq!(db.session_user(&expired).unwrap(), None);

        assert_eq!(db.purge_expired_sessions().unwrap(), 1);
        assert_eq!(db.session_user(&live).unwrap().as_deref(), Some("olena"));
    }
}
