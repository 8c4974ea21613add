//! Outbox for reports handed over by the relay dispatcher.

use std::collections::BTreeMap;

use rusqlite::params;

use super::{now_timestamp, Database, StoreError};

/// A report as written to the outbox.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub id: String,
    pub template: String,
    pub fields: BTreeMap<String, String>,
    pub created_at: String,
}

impl Database {
    pub fn insert_report(
        &self,
        template: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, StoreError> {
        let conn = self.open()?;
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO reports (id, template, fields, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![id, template, serde_json::to_string(fields)?, now_timestamp()],
        )?;
        Ok(id)
    }

    /// Reports not yet marked delivered, oldest first.
    pub fn undelivered_reports(&self) -> Result<Vec<StoredReport>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, template, fields, created_at FROM reports
             WHERE delivered = 0 ORDER BY created_at, rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut reports = Vec::new();
        for row in rows {
            let (id, template, fields, created_at) = row?;
            reports.push(StoredReport {
                id,
                template,
                fields: serde_json::from_str(&fields)?,
                created_at,
            });
        }
        Ok(reports)
    }

    pub fn mark_report_delivered(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.open()?;
        if conn.execute("UPDATE reports SET delivered = 1 WHERE id = ?1", params![id])? == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::temp_db;
    use super::*;

    #[test]
    fn reports_round_through_the_outbox() {
        let (_dir, db) = temp_db();
        let mut fields = BTreeMap::new();
        fields.insert("message".to_string(), "Невірний рік".to_string());
        let id = db.insert_report("record_error", &fields).unwrap();

        let pending = db.undelivered_reports().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].fields, fields);

        db.mark_report_delivered(&id).unwrap();
        assert!(db.undelivered_reports().unwrap().is_empty());
    }
}
