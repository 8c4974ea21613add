//! Payloads exchanged between the frontend and the backend HTTP API.

use serde::{Deserialize, Serialize};

use crate::model::record::ApprovedRecord;

/// Number of records per page in the public registry.
pub const PAGE_SIZE: u32 = 20;

/// Body of a failed save. Store details stay in the server log.
pub const SAVE_ERROR: &str = "Помилка збереження. Спробуйте ще раз пізніше.";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_USER_ID_LEN: usize = 64;

/// Result of `POST /api/records/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Stored as a new pending record.
    Submitted { id: String },
    /// An equivalent record is already published.
    DuplicateOfApproved { id: String, url: String },
    /// An equivalent record is already waiting for review.
    DuplicateOfPending,
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Submitted { .. } => "Інвентар успішно додано до перевірки.",
            SubmitOutcome::DuplicateOfApproved { .. } => {
                "Такий інвентар уже існує. Спробуйте пошукати його в реєстрі інвентарів"
            }
            SubmitOutcome::DuplicateOfPending => {
                "Такий інвентар уже надіслано на перевірку. Зачекайте доки адміністратор проекту Inventarium опрацює його і запис з'явиться в реєстрі інвентарів"
            }
        }
    }
}

/// Result of `POST /api/moderation/{id}/accept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AcceptOutcome {
    Approved { id: String },
    DuplicateOfApproved { id: String, url: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub confirmed: bool,
}

/// Query string of `GET /api/records`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsQuery {
    pub page: u32,
    pub search: String,
    pub inventory_year_from: String,
    pub inventory_year_to: String,
}

impl RecordsQuery {
    pub fn year_from(&self) -> Option<i64> {
        self.inventory_year_from.trim().parse().ok()
    }

    pub fn year_to(&self) -> Option<i64> {
        self.inventory_year_to.trim().parse().ok()
    }

    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        if term.is_empty() { None } else { Some(term) }
    }

    /// Non-empty filters as query pairs; the HTTP client encodes them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.max(1).to_string())];
        for (key, value) in [
            ("search", &self.search),
            ("inventory_year_from", &self.inventory_year_from),
            ("inventory_year_to", &self.inventory_year_to),
        ] {
            if !value.trim().is_empty() {
                pairs.push((key, value.trim().to_string()));
            }
        }
        pairs
    }
}

/// Percent-encodes a record id for use as a URL path segment.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsPage {
    pub page: u32,
    pub page_size: u32,
    pub records: Vec<ApprovedRecord>,
}

impl RecordsPage {
    /// A full page suggests there may be another one.
    pub fn has_next(&self) -> bool {
        self.records.len() as u32 >= self.page_size
    }
}

/// Body of `POST /api/auth/sign_in` and `POST /api/auth/sign_up`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    /// Rules for a new account; sign-in accepts whatever was registered.
    pub fn check_new_account(&self) -> Result<(), &'static str> {
        let id = self.user_id.trim();
        if id.is_empty() {
            return Err("Вкажіть ім'я користувача.");
        }
        if id.chars().count() > MAX_USER_ID_LEN || id.chars().any(char::is_whitespace) {
            return Err("Ім'я користувача має бути одним словом до 64 символів.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Пароль має містити щонайменше 8 символів.");
        }
        Ok(())
    }
}

/// The signed-in user, as returned by the auth routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user_id: String,
    pub is_admin: bool,
}

/// Query string of `GET /api/records/settlement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementQuery {
    pub current_region: String,
    pub current_district: String,
    pub current_community: String,
    pub current_settlement_name: String,
}

/// One marker on the public map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mark_type: Option<i64>,
    pub current_settlement_name: Option<String>,
}

/// Contributor standing shown on the stats page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorRank {
    Keeper,
    Detective,
    Tourist,
}

impl ContributorRank {
    pub fn for_user(is_admin: bool, approved: u64, pending: u64) -> Self {
        if is_admin {
            ContributorRank::Keeper
        } else if approved + pending > 0 {
            ContributorRank::Detective
        } else {
            ContributorRank::Tourist
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ContributorRank::Keeper => "Володар інвентарів",
            ContributorRank::Detective => "Інвентарний детектив",
            ContributorRank::Tourist => "Архівний турист",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub is_admin: bool,
    pub approved: u64,
    pub pending: u64,
    pub rank: ContributorRank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_approved: u64,
    pub user: Option<UserStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_is_tagged_by_status() {
        let json = serde_json::to_value(SubmitOutcome::DuplicateOfApproved {
            id: "7".into(),
            url: "/record/7".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "duplicate_of_approved");
        assert_eq!(json["url"], "/record/7");
    }

    #[test]
    fn query_pairs_skip_empty_filters() {
        let query = RecordsQuery {
            page: 2,
            search: " Буча ".into(),
            inventory_year_to: "  ".into(),
            ..Default::default()
        };
        assert_eq!(
            query.query_pairs(),
            vec![("page", "2".to_string()), ("search", "Буча".to_string())]
        );
        assert_eq!(query.year_from(), None);
        assert_eq!(RecordsQuery::default().query_pairs(), vec![("page", "1".to_string())]);
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_component("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_component("3f2a-91"), "3f2a-91");
    }

    #[test]
    fn new_account_rules() {
        let credentials = |user_id: &str, password: &str| Credentials {
            user_id: user_id.into(),
            password: password.into(),
        };
        assert_eq!(credentials("olena", "archive-1850").check_new_account(), Ok(()));
        assert!(credentials("  ", "archive-1850").check_new_account().is_err());
        assert!(credentials("olena k", "archive-1850").check_new_account().is_err());
        assert!(credentials(&"я".repeat(65), "archive-1850").check_new_account().is_err());
        assert!(credentials("olena", "short").check_new_account().is_err());
    }

    #[test]
    fn rank_prefers_admin_then_contribution() {
        assert_eq!(ContributorRank::for_user(true, 0, 0), ContributorRank::Keeper);
        assert_eq!(ContributorRank::for_user(false, 0, 1), ContributorRank::Detective);
        assert_eq!(ContributorRank::for_user(false, 0, 0), ContributorRank::Tourist);
    }
}
