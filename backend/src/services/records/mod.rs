//! # Records Service Module
//!
//! Routes for the contribution pipeline and the public registry under
//! `/api/records`.
//!
//! ## Sub-modules:
//! - `submit`: validates a draft, checks both record sets for duplicates and
//!   stores a new pending record.
//! - `list`: paginated, searchable list of published records.
//! - `get`: one published record by id.
//! - `settlement`: every published record at one settlement.

mod get;
mod list;
mod settlement;
pub mod submit;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/records";

/// Configures and returns the Actix `Scope` for the record routes.
///
/// # Registered Routes:
///
/// *   **`POST /submit`**: body is a `RecordDraft`. Answers `201` with
///     `Submitted`, `409` with one of the duplicate outcomes, `400` with the
///     validation message or `503` when the record could not be saved.
/// *   **`GET /`**: one page of the registry; query `page`, `search`,
///     `inventory_year_from`, `inventory_year_to`.
/// *   **`GET /settlement`**: records at the settlement named by the query.
/// *   **`GET /{record_id}`**: a single published record, `404` when missing.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/submit", post().to(submit::process))
        .route("/settlement", get().to(settlement::process))
        .route("/{record_id}", get().to(get::process))
}
