//! SQLite persistence for the registry.
//!
//! The database file holds six tables:
//! - `records`: the published (approved) registry.
//! - `records_unverified`: submissions waiting for moderation.
//! - `admin_users`: identifiers allowed to moderate.
//! - `accounts`: user identifiers with their argon2 password hashes.
//! - `sessions`: sign-in sessions, keyed by the token kept in the session cookie.
//! - `reports`: outbox of error reports and feedback handed to the relay.
//!
//! Like every other service in this crate, each call opens its own connection
//! to the configured file. The `impl Database` blocks are split by table across
//! the sub-modules.

mod accounts;
mod admins;
mod approved;
mod pending;
mod reports;
mod sessions;

use std::path::{Path, PathBuf};

use common::model::record::{text_or_null, MatchKey, RecordFields};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Columns shared by `records` and `records_unverified`, in `RecordFields` order.
pub(crate) const FIELD_COLUMNS: [&str; 27] = [
    "current_region",
    "current_district",
    "current_community",
    "current_settlement_type",
    "current_settlement_name",
    "latitude",
    "longitude",
    "old_province",
    "old_district",
    "old_community",
    "old_settlement_type",
    "old_settlement_name",
    "archive",
    "fonds",
    "series",
    "record",
    "case_signature",
    "additional_case_signature",
    "case_title",
    "case_date",
    "pages_count",
    "inventory_year",
    "inventory_start_page",
    "mark_type",
    "scans_url",
    "notes",
    "email",
];

const FIELD_DDL: &str = "
    current_region TEXT,
    current_district TEXT,
    current_community TEXT,
    current_settlement_type TEXT,
    current_settlement_name TEXT,
    latitude REAL,
    longitude REAL,
    old_province TEXT,
    old_district TEXT,
    old_community TEXT,
    old_settlement_type TEXT,
    old_settlement_name TEXT,
    archive TEXT,
    fonds TEXT,
    series TEXT,
    record TEXT,
    case_signature TEXT,
    additional_case_signature TEXT,
    case_title TEXT,
    case_date TEXT,
    pages_count INTEGER,
    inventory_year INTEGER,
    inventory_start_page INTEGER,
    mark_type INTEGER,
    scans_url TEXT,
    notes TEXT,
    email TEXT";

/// Handle to the registry database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection with the `ulower` helper registered; SQLite's own
    /// `lower()` only folds ASCII, which is useless for Cyrillic search.
    pub(crate) fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.create_scalar_function(
            "ulower",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value: Option<String> = ctx.get(0)?;
                Ok(value.map(|v| v.to_lowercase()))
            },
        )?;
        Ok(conn)
    }

    /// Creates the tables when missing. Safe to call on every start.
    pub fn init(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
                })?;
            }
        }
        let conn = self.open()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                approved INTEGER NOT NULL DEFAULT 1,
                created_by TEXT,
                {fields}
            );
            CREATE TABLE IF NOT EXISTS records_unverified (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                created_by TEXT,
                is_ukrainian_archive TEXT NOT NULL DEFAULT 'Yes',
                {fields}
            );
            CREATE TABLE IF NOT EXISTS admin_users (
                id TEXT PRIMARY KEY
            );
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS reports (
                id TEXT PRIMARY KEY,
                template TEXT NOT NULL,
                fields TEXT NOT NULL,
                created_at TEXT NOT NULL,
                delivered INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS records_created_at ON records (created_at);
            CREATE INDEX IF NOT EXISTS records_unverified_created_at ON records_unverified (created_at);",
            fields = FIELD_DDL
        ))?;
        Ok(())
    }
}

/// Comma-separated field column list for SELECT and INSERT statements.
pub(crate) fn field_column_list() -> String {
    FIELD_COLUMNS.join(", ")
}

/// `?{start}, ?{start+1}, ...` placeholders for the field columns.
pub(crate) fn field_placeholders(start: usize) -> String {
    (start..start + FIELD_COLUMNS.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SQL values for the field columns, in column order.
pub(crate) fn field_values(fields: &RecordFields) -> Vec<Value> {
    vec![
        Value::from(fields.current_region.clone()),
        Value::from(fields.current_district.clone()),
        Value::from(fields.current_community.clone()),
        Value::from(fields.current_settlement_type.clone()),
        Value::from(fields.current_settlement_name.clone()),
        Value::from(fields.latitude),
        Value::from(fields.longitude),
        Value::from(fields.old_province.clone()),
        Value::from(fields.old_district.clone()),
        Value::from(fields.old_community.clone()),
        Value::from(fields.old_settlement_type.clone()),
        Value::from(fields.old_settlement_name.clone()),
        Value::from(fields.archive.clone()),
        Value::from(fields.fonds.clone()),
        Value::from(fields.series.clone()),
        Value::from(fields.record.clone()),
        Value::from(fields.case_signature.clone()),
        Value::from(fields.additional_case_signature.clone()),
        Value::from(fields.case_title.clone()),
        Value::from(fields.case_date.clone()),
        Value::from(fields.pages_count),
        Value::from(fields.inventory_year),
        Value::from(fields.inventory_start_page),
        Value::from(fields.mark_type),
        Value::from(fields.scans_url.clone()),
        Value::from(fields.notes.clone()),
        Value::from(fields.email.clone()),
    ]
}

/// Reads the field columns starting at `offset`.
pub(crate) fn read_fields(row: &Row<'_>, offset: usize) -> rusqlite::Result<RecordFields> {
    Ok(RecordFields {
        current_region: row.get(offset)?,
        current_district: row.get(offset + 1)?,
        current_community: row.get(offset + 2)?,
        current_settlement_type: row.get(offset + 3)?,
        current_settlement_name: row.get(offset + 4)?,
        latitude: row.get(offset + 5)?,
        longitude: row.get(offset + 6)?,
        old_province: row.get(offset + 7)?,
        old_district: row.get(offset + 8)?,
        old_community: row.get(offset + 9)?,
        old_settlement_type: row.get(offset + 10)?,
        old_settlement_name: row.get(offset + 11)?,
        archive: row.get(offset + 12)?,
        fonds: row.get(offset + 13)?,
        series: row.get(offset + 14)?,
        record: row.get(offset + 15)?,
        case_signature: row.get(offset + 16)?,
        additional_case_signature: row.get(offset + 17)?,
        case_title: row.get(offset + 18)?,
        case_date: row.get(offset + 19)?,
        pages_count: row.get(offset + 20)?,
        inventory_year: row.get(offset + 21)?,
        inventory_start_page: row.get(offset + 22)?,
        mark_type: row.get(offset + 23)?,
        scans_url: row.get(offset + 24)?,
        notes: row.get(offset + 25)?,
        email: row.get(offset + 26)?,
    })
}

/// WHERE clause matching a `MatchKey`, bound as `?1`..`?7`.
pub(crate) const MATCH_CLAUSE: &str = "current_region IS ?1
    AND current_district IS ?2
    AND current_community IS ?3
    AND current_settlement_type IS ?4
    AND current_settlement_name IS ?5
    AND case_signature IS ?6
    AND (?7 IS NULL OR inventory_year = ?7)";

pub(crate) fn match_values(key: &MatchKey) -> Vec<Value> {
    vec![
        Value::from(text_or_null(&key.current_region)),
        Value::from(text_or_null(&key.current_district)),
        Value::from(text_or_null(&key.current_community)),
        Value::from(text_or_null(&key.current_settlement_type)),
        Value::from(text_or_null(&key.current_settlement_name)),
        Value::from(text_or_null(&key.case_signature)),
        Value::from(key.inventory_year),
    ]
}

/// Creation timestamp with microsecond precision so lexical order is time order.
pub(crate) fn now_timestamp() -> String {
    timestamp(chrono::Utc::now())
}

pub(crate) fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// A fresh database in a temporary directory; keep the `TempDir` alive.
    pub(crate) fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("registry.sqlite"));
        db.init().unwrap();
        (dir, db)
    }

    #[test]
    fn init_is_idempotent() {
        let (_dir, db) = temp_db();
        db.init().unwrap();
        let conn = db.open().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn ulower_folds_cyrillic() {
        let (_dir, db) = temp_db();
        let conn = db.open().unwrap();
        let lowered: String = conn
            .query_row("SELECT ulower('БУЧА')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lowered, "буча");
    }

    #[test]
    fn placeholders_cover_every_column() {
        assert_eq!(field_placeholders(3).split(", ").count(), FIELD_COLUMNS.len());
        assert!(field_placeholders(3).starts_with("?3, ?4"));
        assert_eq!(field_values(&RecordFields::default()).len(), FIELD_COLUMNS.len());
    }
}
