//! # Record Submission
//!
//! Backend side of the contribution form. A draft goes through the same
//! validation gate the form runs, then through the duplicate check: first
//! against the published registry, then against the moderation queue. Only a
//! draft that matches neither is coerced and stored as a pending record.

use actix_web::web::{Data, Json};
use actix_web::{HttpRequest, HttpResponse, Responder};
use common::model::draft::RecordDraft;
use common::model::record::{record_url, MatchKey, RecordFields};
use common::requests::{SubmitOutcome, SAVE_ERROR};
use common::validation::{validate, ValidationError};
use log::{error, info};
use thiserror::Error;

use crate::services::auth::current_user;
use crate::store::{Database, StoreError};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Actix web handler for `POST /api/records/submit`.
pub async fn process(
    db: Data<Database>,
    req: HttpRequest,
    draft: Json<RecordDraft>,
) -> impl Responder {
    let submitter = match current_user(&db, &req) {
        Ok(submitter) => submitter,
        Err(denied) => return denied.response(),
    };
    match submit_record(&db, &draft, submitter.as_deref()) {
        Ok(outcome @ SubmitOutcome::Submitted { .. }) => HttpResponse::Created().json(outcome),
        Ok(outcome) => HttpResponse::Conflict().json(outcome),
        Err(SubmitError::Validation(e)) => HttpResponse::BadRequest().body(e.to_string()),
        Err(SubmitError::Store(e)) => {
            error!("Failed to save submission: {}", e);
            HttpResponse::ServiceUnavailable().body(SAVE_ERROR)
        }
    }
}

/// Runs the submission pipeline for one draft.
///
/// Nothing is written unless the draft is valid and matches no existing
/// record. The year only takes part in the duplicate key when it was given.
pub fn submit_record(
    db: &Database,
    draft: &RecordDraft,
    submitter: Option<&str>,
) -> Result<SubmitOutcome, SubmitError> {
    validate(draft)?;

    let key = MatchKey::from_draft(draft);
    if let Some(id) = db.find_approved_match(&key)? {
        info!("Submission duplicates published record {}", id);
        return Ok(SubmitOutcome::DuplicateOfApproved {
            url: record_url(&id),
            id,
        });
    }
    if db.find_pending_match(&key)? {
        info!("Submission duplicates a record waiting for review");
        return Ok(SubmitOutcome::DuplicateOfPending);
    }

    let fields = RecordFields::from_draft(draft);
    let id = db.insert_pending(&fields, draft.is_ukrainian_archive, submitter)?;
    info!(
        "Stored pending record {} for {}",
        id,
        fields.current_settlement_name.as_deref().unwrap_or("-")
    );
    Ok(SubmitOutcome::Submitted { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::tests::signed_in;
    use crate::store::tests::temp_db;
    use actix_web::{test as actix_test, App};
    use common::model::draft::DraftField;

    fn valid_draft() -> RecordDraft {
        RecordDraft {
            current_region: "Київська".into(),
            current_district: "Бучанський".into(),
            current_community: "Бучанська".into(),
            current_settlement_type: "місто".into(),
            current_settlement_name: "Буча".into(),
            latitude: "50.543600".into(),
            longitude: "30.212800".into(),
            archive: "ЦДІАК".into(),
            fonds: "1".into(),
            series: "2".into(),
            record: "3".into(),
            case_signature: "ЦДІАК 1-2-3".into(),
            mark_type: "1".into(),
            email: "olena@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn fresh_draft_creates_one_coerced_pending_record() {
        let (_dir, db) = temp_db();
        let outcome = submit_record(&db, &valid_draft(), Some("u1")).unwrap();
        let SubmitOutcome::Submitted { id } = outcome else {
            panic!("expected a new pending record, got {:?}", outcome);
        };

        let queue = db.list_pending().unwrap();
        assert_eq!(queue.len(), 1);
        let stored = &queue[0];
        assert_eq!(stored.id, id);
        assert_eq!(stored.created_by.as_deref(), Some("u1"));
        assert_eq!(stored.fields.mark_type, Some(1));
        assert_eq!(stored.fields.latitude, Some(50.5436));
        assert_eq!(stored.fields.pages_count, None);
        assert_eq!(stored.fields.inventory_year, None);
        assert_eq!(stored.fields.notes, None);
    }

    #[test]
    fn match_with_published_record_inserts_nothing() {
        let (_dir, db) = temp_db();
        let published = db
            .insert_approved(&RecordFields::from_draft(&valid_draft()), None)
            .unwrap();

        let outcome = submit_record(&db, &valid_draft(), None).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::DuplicateOfApproved {
                url: format!("/record/{}", published),
                id: published,
            }
        );
        assert!(db.list_pending().unwrap().is_empty());
    }

    #[test]
    fn second_identical_submission_is_pending_duplicate() {
        let (_dir, db) = temp_db();
        submit_record(&db, &valid_draft(), None).unwrap();
        let outcome = submit_record(&db, &valid_draft(), None).unwrap();
        assert_eq!(outcome, SubmitOutcome::DuplicateOfPending);
        assert_eq!(db.count_pending(None).unwrap(), 1);
    }

    #[test]
    fn different_year_is_not_a_duplicate_of_a_dated_record() {
        let (_dir, db) = temp_db();
        let mut dated = valid_draft();
        dated.inventory_year = "1850".into();
        submit_record(&db, &dated, None).unwrap();

        dated.inventory_year = "1851".into();
        assert!(matches!(
            submit_record(&db, &dated, None).unwrap(),
            SubmitOutcome::Submitted { .. }
        ));
    }

    #[test]
    fn invalid_draft_is_refused_before_the_store() {
        let (_dir, db) = temp_db();
        let mut draft = valid_draft();
        draft.email.clear();
        let err = submit_record(&db, &draft, None).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::Required(DraftField::Email))
        ));
        assert_eq!(db.count_pending(None).unwrap(), 0);
    }

    #[actix_web::test]
    async fn handler_maps_outcomes_to_status_codes() {
        let (_dir, db) = temp_db();
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(db.clone()))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/records/submit")
            .cookie(signed_in(&db, "u1"))
            .set_json(valid_draft())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        assert_eq!(db.list_pending().unwrap()[0].created_by.as_deref(), Some("u1"));

        let req = actix_test::TestRequest::post()
            .uri("/api/records/submit")
            .set_json(valid_draft())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], "duplicate_of_pending");

        let mut draft = valid_draft();
        draft.inventory_year = "1200".into();
        let req = actix_test::TestRequest::post()
            .uri("/api/records/submit")
            .set_json(draft)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body = actix_test::read_body(resp).await;
        assert_eq!(
            String::from_utf8_lossy(&body),
            "Поле \"inventory_year\" має бути числом від 1500 до 2000"
        );
    }

    #[actix_web::test]
    async fn save_failure_answers_with_a_generic_message() {
        let dir = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let db = Database::new(dir.path());
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/records/submit")
            .set_json(valid_draft())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
        let body = actix_test::read_body(resp).await;
        assert_eq!(String::from_utf8_lossy(&body), SAVE_ERROR);
    }
}
