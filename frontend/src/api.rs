//! Thin async wrappers around the backend JSON API.
//!
//! Identity travels in the `HttpOnly` session cookie set by the auth routes;
//! the browser attaches it to these same-origin requests. Errors are returned
//! as user-facing strings; callers show them with `show_toast`.

use common::model::draft::RecordDraft;
use common::model::lookup::LookupIndex;
use common::model::record::{ApprovedRecord, PendingRecord};
use common::model::report::ReportRequest;
use common::requests::{
    AcceptOutcome, Credentials, MapPoint, RecordsPage, RecordsQuery, RejectRequest,
    SessionInfo, SettlementQuery, StatsResponse, SubmitOutcome,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// Why the moderation queue could not be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessError {
    NotSignedIn,
    NoAccess,
    Failed(String),
}

async fn error_text(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => format!("HTTP {}", status),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response.json::<T>().await.map_err(|e| e.to_string())
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        decode(response).await
    } else {
        Err(error_text(response).await)
    }
}

pub async fn fetch_lookup() -> Result<LookupIndex, String> {
    get_json("/api/lookup").await
}

/// `Ok` carries both the accepted and the duplicate outcomes.
pub async fn submit_record(draft: &RecordDraft) -> Result<SubmitOutcome, String> {
    let response = Request::post("/api/records/submit")
        .json(draft)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    match response.status() {
        201 | 409 => decode(response).await,
        _ => Err(error_text(response).await),
    }
}

pub async fn fetch_records(query: &RecordsQuery) -> Result<RecordsPage, String> {
    let response = Request::get("/api/records")
        .query(query.query_pairs())
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        decode(response).await
    } else {
        Err(error_text(response).await)
    }
}

pub async fn fetch_record(id: &str) -> Result<Option<ApprovedRecord>, String> {
    let url = format!("/api/records/{}", common::requests::encode_component(id));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    match response.status() {
        200 => decode(response).await.map(Some),
        404 => Ok(None),
        _ => Err(error_text(response).await),
    }
}

pub async fn fetch_settlement_records(
    query: &SettlementQuery,
) -> Result<Vec<ApprovedRecord>, String> {
    let response = Request::get("/api/records/settlement")
        .query([
            ("current_region", query.current_region.as_str()),
            ("current_district", query.current_district.as_str()),
            ("current_community", query.current_community.as_str()),
            ("current_settlement_name", query.current_settlement_name.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        decode(response).await
    } else {
        Err(error_text(response).await)
    }
}

pub async fn fetch_map_points() -> Result<Vec<MapPoint>, String> {
    get_json("/api/map/points").await
}

pub async fn fetch_stats() -> Result<StatsResponse, String> {
    get_json("/api/stats").await
}

pub async fn send_report(report: &ReportRequest) -> Result<(), String> {
    let response = Request::post("/api/reports")
        .json(report)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        Ok(())
    } else {
        Err(error_text(response).await)
    }
}

pub async fn fetch_queue() -> Result<Vec<PendingRecord>, AccessError> {
    let response = Request::get("/api/moderation/queue")
        .send()
        .await
        .map_err(|e| AccessError::Failed(e.to_string()))?;
    match response.status() {
        200 => decode(response).await.map_err(AccessError::Failed),
        401 => Err(AccessError::NotSignedIn),
        403 => Err(AccessError::NoAccess),
        _ => Err(AccessError::Failed(error_text(response).await)),
    }
}

pub async fn accept_record(id: &str, draft: &RecordDraft) -> Result<AcceptOutcome, String> {
    let url = format!(
        "/api/moderation/{}/accept",
        common::requests::encode_component(id)
    );
    let response = Request::post(&url)
        .json(draft)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    match response.status() {
        200 | 409 => decode(response).await,
        _ => Err(error_text(response).await),
    }
}

pub async fn reject_record(id: &str) -> Result<(), String> {
    let url = format!(
        "/api/moderation/{}/reject",
        common::requests::encode_component(id)
    );
    let response = Request::post(&url)
        .json(&RejectRequest { confirmed: true })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        Ok(())
    } else {
        Err(error_text(response).await)
    }
}

pub async fn fetch_session() -> Result<Option<SessionInfo>, String> {
    get_json("/api/auth/session").await
}

async fn open_session(url: &str, credentials: &Credentials) -> Result<SessionInfo, String> {
    let response = Request::post(url)
        .json(credentials)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        decode(response).await
    } else {
        Err(error_text(response).await)
    }
}

pub async fn sign_in(credentials: &Credentials) -> Result<SessionInfo, String> {
    open_session("/api/auth/sign_in", credentials).await
}

pub async fn sign_up(credentials: &Credentials) -> Result<SessionInfo, String> {
    open_session("/api/auth/sign_up", credentials).await
}

pub async fn sign_out() -> Result<(), String> {
    let response = Request::post("/api/auth/sign_out")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        Ok(())
    } else {
        Err(error_text(response).await)
    }
}
