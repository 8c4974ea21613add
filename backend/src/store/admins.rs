use rusqlite::params;

use super::{Database, StoreError};

impl Database {
    pub fn is_admin(&self, user_id: &str) -> Result<bool, StoreError> {
        let conn = self.open()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM admin_users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Adds the configured administrators; existing entries are left alone.
    pub fn seed_admins(&self, ids: &[String]) -> Result<usize, StoreError> {
        let conn = self.open()?;
        let mut added = 0;
        for id in ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            added += conn.execute(
                "INSERT OR IGNORE INTO admin_users (id) VALUES (?1)",
                params![id],
            )?;
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::temp_db;

    #[test]
    fn seeding_is_idempotent() {
        let (_dir, db) = temp_db();
        let ids = vec!["admin".to_string(), " ".to_string()];
        assert_eq!(db.seed_admins(&ids).unwrap(), 1);
        assert_eq!(db.seed_admins(&ids).unwrap(), 0);
        assert!(db.is_admin("admin").unwrap());
        assert!(!db.is_admin("visitor").unwrap());
    }
}
