//! Queries over the published `records` table.

use common::model::record::{ApprovedRecord, MatchKey, RecordFields};
use common::requests::{MapPoint, RecordsQuery, SettlementQuery, PAGE_SIZE};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::{
    field_column_list, match_values, read_fields, Database, StoreError, MATCH_CLAUSE,
};

fn approved_select() -> String {
    format!(
        "SELECT id, created_at, approved, created_by, {} FROM records",
        field_column_list()
    )
}

fn read_approved(row: &Row<'_>) -> rusqlite::Result<ApprovedRecord> {
    Ok(ApprovedRecord {
        id: row.get(0)?,
        created_at: row.get(1)?,
        approved: row.get(2)?,
        created_by: row.get(3)?,
        fields: read_fields(row, 4)?,
    })
}

impl Database {
    /// Id of a published record with the same duplicate key, if any.
    pub fn find_approved_match(&self, key: &MatchKey) -> Result<Option<String>, StoreError> {
        let conn = self.open()?;
        let sql = format!("SELECT id FROM records WHERE {} LIMIT 1", MATCH_CLAUSE);
        let id = conn
            .query_row(&sql, params_from_iter(match_values(key)), |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    pub fn get_approved(&self, id: &str) -> Result<Option<ApprovedRecord>, StoreError> {
        let conn = self.open()?;
        let sql = format!("{} WHERE id = ?1", approved_select());
        let record = conn.query_row(&sql, params![id], read_approved).optional()?;
        Ok(record)
    }

    /// One page of the registry, newest first. Pages are numbered from 1.
    pub fn list_approved(&self, query: &RecordsQuery) -> Result<Vec<ApprovedRecord>, StoreError> {
        let conn = self.open()?;
        let offset = (i64::from(query.page.max(1)) - 1) * i64::from(PAGE_SIZE);
        let sql = format!(
            "{} WHERE approved = 1
                AND (?1 IS NULL
                    OR instr(ulower(current_settlement_name), ?1) > 0
                    OR instr(ulower(old_settlement_name), ?1) > 0
                    OR instr(ulower(case_title), ?1) > 0)
                AND (?2 IS NULL OR inventory_year >= ?2)
                AND (?3 IS NULL OR inventory_year <= ?3)
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?4 OFFSET ?5",
            approved_select()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                query.search_term().map(str::to_lowercase),
                query.year_from(),
                query.year_to(),
                PAGE_SIZE,
                offset,
            ],
            read_approved,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every published record at one settlement, newest first.
    pub fn approved_at_settlement(
        &self,
        query: &SettlementQuery,
    ) -> Result<Vec<ApprovedRecord>, StoreError> {
        let conn = self.open()?;
        let sql = format!(
            "{} WHERE approved = 1
                AND current_region = ?1
                AND current_district = ?2
                AND current_community = ?3
                AND current_settlement_name = ?4
             ORDER BY created_at DESC, rowid DESC",
            approved_select()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                query.current_region,
                query.current_district,
                query.current_community,
                query.current_settlement_name,
            ],
            read_approved,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Published records that can be drawn on the map.
    pub fn map_points(&self) -> Result<Vec<MapPoint>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, latitude, longitude, mark_type, current_settlement_name
             FROM records
             WHERE approved = 1 AND latitude IS NOT NULL AND longitude IS NOT NULL
             ORDER BY created_at",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(MapPoint {
                id: row.get(0)?,
                latitude: row.get(1)?,
                longitude: row.get(2)?,
                mark_type: row.get(3)?,
                current_settlement_name: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Published records, optionally only those created by `user`.
    pub fn count_approved(&self, user: Option<&str>) -> Result<u64, StoreError> {
        let conn = self.open()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE approved = 1 AND (?1 IS NULL OR created_by = ?1)",
            params![user],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    /// Writes a published record directly. Promotion goes through
    /// `promote_pending`; this is for imports and fixtures.
    pub fn insert_approved(
        &self,
        fields: &RecordFields,
        created_by: Option<&str>,
    ) -> Result<String, StoreError> {
        let conn = self.open()?;
        let id = uuid::Uuid::new_v4().to_string();
        insert_approved_row(&conn, &id, fields, created_by)?;
        Ok(id)
    }
}

pub(super) fn insert_approved_row(
    conn: &rusqlite::Connection,
    id: &str,
    fields: &RecordFields,
    created_by: Option<&str>,
) -> Result<(), StoreError> {
    let sql = format!(
        "INSERT INTO records (id, created_at, approved, created_by, {}) VALUES (?1, ?2, 1, ?3, {})",
        field_column_list(),
        super::field_placeholders(4)
    );
    let mut values = vec![
        Value::from(id.to_string()),
        Value::from(super::now_timestamp()),
        Value::from(created_by.map(str::to_string)),
    ];
    values.extend(super::field_values(fields));
    conn.execute(&sql, params_from_iter(values))?;
    Ok(())
}
