//! Sign-in accounts. Only argon2 PHC strings are stored, never passwords.

use rusqlite::{params, OptionalExtension};

use super::{now_timestamp, Database, StoreError};

impl Database {
    /// Creates the account or replaces its password hash. Used for the
    /// accounts listed in the config file.
    pub fn upsert_account(&self, id: &str, password_hash: &str) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO accounts (id, password_hash, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET password_hash = excluded.password_hash",
            params![id, password_hash, now_timestamp()],
        )?;
        Ok(())
    }

    /// Registers a new account; returns `false` when the id is already taken.
    pub fn create_account(&self, id: &str, password_hash: &str) -> Result<bool, StoreError> {
        let conn = self.open()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO accounts (id, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![id, password_hash, now_timestamp()],
        )?;
        Ok(inserted == 1)
    }

    pub fn account_password_hash(&self, id: &str) -> Result<Option<String>, StoreError> {
        let conn = self.open()?;
        let hash = conn
            .query_row(
                "SELECT password_hash FROM accounts WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(hash)
    }
}
