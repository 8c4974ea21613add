//! # Moderation Service Module
//!
//! Administrator-only routes under `/api/moderation`. Every handler first
//! passes the caller through `auth::require_admin`; anonymous callers get
//! `401` and signed-in non-administrators `403`.
//!
//! ## Sub-modules:
//! - `queue`: the pending records, oldest first.
//! - `accept`: publishes a reviewed record, with the moderator's edits.
//! - `reject`: deletes a pending record once the moderator confirmed.

pub mod accept;
mod queue;
mod reject;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/moderation";

/// # Registered Routes:
///
/// *   **`GET /queue`**: every pending record, oldest first.
/// *   **`POST /{record_id}/accept`**: body is the edited `RecordDraft`.
///     Answers `200` with `Approved`, `409` with `DuplicateOfApproved`, `404`
///     when the pending record is gone.
/// *   **`POST /{record_id}/reject`**: body `{"confirmed": true}`; anything
///     else is refused with `400` and nothing is deleted.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/queue", get().to(queue::process))
        .route("/{record_id}/accept", post().to(accept::process))
        .route("/{record_id}/reject", post().to(reject::process))
}
