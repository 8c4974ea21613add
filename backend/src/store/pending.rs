//! The moderation queue table, `records_unverified`, and promotion out of it.

use common::model::draft::ArchiveHolding;
use common::model::record::{MatchKey, PendingRecord, RecordFields};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::approved::insert_approved_row;
use super::{
    field_column_list, field_placeholders, field_values, match_values, now_timestamp,
    read_fields, Database, StoreError, MATCH_CLAUSE,
};

fn pending_select() -> String {
    format!(
        "SELECT id, created_at, created_by, is_ukrainian_archive, {} FROM records_unverified",
        field_column_list()
    )
}

fn read_pending(row: &Row<'_>) -> rusqlite::Result<PendingRecord> {
    let holding: String = row.get(3)?;
    Ok(PendingRecord {
        id: row.get(0)?,
        created_at: row.get(1)?,
        created_by: row.get(2)?,
        is_ukrainian_archive: ArchiveHolding::parse(&holding).unwrap_or_default(),
        fields: read_fields(row, 4)?,
    })
}

impl Database {
    pub fn find_pending_match(&self, key: &MatchKey) -> Result<bool, StoreError> {
        let conn = self.open()?;
        let sql = format!(
            "SELECT 1 FROM records_unverified WHERE {} LIMIT 1",
            MATCH_CLAUSE
        );
        let found: Option<i64> = conn
            .query_row(&sql, params_from_iter(match_values(key)), |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Stores a new submission and returns its id.
    pub fn insert_pending(
        &self,
        fields: &RecordFields,
        holding: ArchiveHolding,
        created_by: Option<&str>,
    ) -> Result<String, StoreError> {
        let conn = self.open()?;
        let id = uuid::Uuid::new_v4().to_string();
        let sql = format!(
            "INSERT INTO records_unverified (id, created_at, created_by, is_ukrainian_archive, {})
             VALUES (?1, ?2, ?3, ?4, {})",
            field_column_list(),
            field_placeholders(5)
        );
        let mut values = vec![
            Value::from(id.clone()),
            Value::from(now_timestamp()),
            Value::from(created_by.map(str::to_string)),
            Value::from(holding.as_str().to_string()),
        ];
        values.extend(field_values(fields));
        conn.execute(&sql, params_from_iter(values))?;
        Ok(id)
    }

    /// The whole queue, oldest first.
    pub fn list_pending(&self) -> Result<Vec<PendingRecord>, StoreError> {
        let conn = self.open()?;
        let sql = format!("{} ORDER BY created_at ASC, rowid ASC", pending_select());
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_pending)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_pending(&self, id: &str) -> Result<Option<PendingRecord>, StoreError> {
        let conn = self.open()?;
        let sql = format!("{} WHERE id = ?1", pending_select());
        let record = conn.query_row(&sql, params![id], read_pending).optional()?;
        Ok(record)
    }

    pub fn delete_pending(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.open()?;
        let deleted = conn.execute("DELETE FROM records_unverified WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn count_pending(&self, user: Option<&str>) -> Result<u64, StoreError> {
        let conn = self.open()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records_unverified WHERE ?1 IS NULL OR created_by = ?1",
            params![user],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    /// Publishes `fields` under the pending record's id and removes the
    /// pending row, both or neither.
    pub fn promote_pending(
        &self,
        id: &str,
        fields: &RecordFields,
        moderator: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM records_unverified WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        insert_approved_row(&tx, id, fields, Some(moderator))?;
        tx.commit()?;
        Ok(())
    }
}
