//! # Record Promotion
//!
//! Moves a reviewed record from the moderation queue into the published
//! registry. The duplicate check runs again on the moderator's edited values,
//! since edits may have turned the record into a copy of a published one. Two
//! moderators accepting equivalent records at the same time can still both
//! publish; nothing guards against that beyond this check.

use actix_web::web::{Data, Json, Path};
use actix_web::{HttpRequest, HttpResponse, Responder};
use common::model::draft::RecordDraft;
use common::model::record::{record_url, MatchKey};
use common::moderation::promoted_fields;
use common::requests::AcceptOutcome;
use log::{error, info};

use crate::services::auth::require_admin;
use crate::store::{Database, StoreError};

/// Actix web handler for `POST /api/moderation/{record_id}/accept`.
pub async fn process(
    db: Data<Database>,
    req: HttpRequest,
    record_id: Path<String>,
    edited: Json<RecordDraft>,
) -> impl Responder {
    let moderator = match require_admin(&db, &req) {
        Ok(moderator) => moderator,
        Err(denied) => return denied.response(),
    };
    match accept_record(&db, &record_id, &edited, &moderator) {
        Ok(outcome @ AcceptOutcome::Approved { .. }) => HttpResponse::Ok().json(outcome),
        Ok(outcome) => HttpResponse::Conflict().json(outcome),
        Err(StoreError::NotFound(id)) => {
            HttpResponse::NotFound().body(format!("Pending record {} not found", id))
        }
        Err(e) => {
            error!("Failed to accept record {}: {}", record_id, e);
            HttpResponse::ServiceUnavailable().body("Error accepting record")
        }
    }
}

/// Publishes the pending record `id` with the moderator's edits applied.
///
/// Coordinates the moderator left empty fall back to the values the record
/// was submitted with. On any error the pending record stays in place.
pub fn accept_record(
    db: &Database,
    id: &str,
    edited: &RecordDraft,
    moderator: &str,
) -> Result<AcceptOutcome, StoreError> {
    let original = db
        .get_pending(id)?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    if let Some(existing) = db.find_approved_match(&MatchKey::from_draft(edited))? {
        info!("Record {} duplicates published record {}", id, existing);
        return Ok(AcceptOutcome::DuplicateOfApproved {
            url: record_url(&existing),
            id: existing,
        });
    }

    let fields = promoted_fields(edited, &original.fields);
    db.promote_pending(id, &fields, moderator)?;
    info!("Record {} approved by {}", id, moderator);
    Ok(AcceptOutcome::Approved { id: id.to_string() })
}
