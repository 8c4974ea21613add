//! Stored record shapes and the draft → record coercion rules.

use serde::{Deserialize, Serialize};

use crate::model::draft::{ArchiveHolding, RecordDraft};

/// Precision of the map mark attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkType {
    /// Pinned to the exact settlement.
    Place,
    /// Pinned to the area around the settlement; the case may cover neighbours.
    Region,
}

impl MarkType {
    pub fn code(&self) -> i64 {
        match self {
            MarkType::Place => 1,
            MarkType::Region => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(MarkType::Place),
            2 => Some(MarkType::Region),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkType::Place => "Місце",
            MarkType::Region => "Регіон",
        }
    }
}

/// Record content with numeric fields coerced and empty text stored as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFields {
    pub current_region: Option<String>,
    pub current_district: Option<String>,
    pub current_community: Option<String>,
    pub current_settlement_type: Option<String>,
    pub current_settlement_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub old_province: Option<String>,
    pub old_district: Option<String>,
    pub old_community: Option<String>,
    pub old_settlement_type: Option<String>,
    pub old_settlement_name: Option<String>,
    pub archive: Option<String>,
    pub fonds: Option<String>,
    pub series: Option<String>,
    pub record: Option<String>,
    pub case_signature: Option<String>,
    pub additional_case_signature: Option<String>,
    pub case_title: Option<String>,
    pub case_date: Option<String>,
    pub pages_count: Option<i64>,
    pub inventory_year: Option<i64>,
    pub inventory_start_page: Option<i64>,
    pub mark_type: Option<i64>,
    pub scans_url: Option<String>,
    pub notes: Option<String>,
    pub email: Option<String>,
}

/// Empty or whitespace-only text becomes `None`.
pub fn text_or_null(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Integer coercion: empty or unparseable text becomes `None`.
pub fn int_or_null(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Float coercion: empty, unparseable or non-finite text becomes `None`.
pub fn float_or_null(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl RecordFields {
    pub fn from_draft(draft: &RecordDraft) -> Self {
        Self {
            current_region: text_or_null(&draft.current_region),
            current_district: text_or_null(&draft.current_district),
            current_community: text_or_null(&draft.current_community),
            current_settlement_type: text_or_null(&draft.current_settlement_type),
            current_settlement_name: text_or_null(&draft.current_settlement_name),
            latitude: float_or_null(&draft.latitude),
            longitude: float_or_null(&draft.longitude),
            old_province: text_or_null(&draft.old_province),
            old_district: text_or_null(&draft.old_district),
            old_community: text_or_null(&draft.old_community),
            old_settlement_type: text_or_null(&draft.old_settlement_type),
            old_settlement_name: text_or_null(&draft.old_settlement_name),
            archive: text_or_null(&draft.archive),
            fonds: text_or_null(&draft.fonds),
            series: text_or_null(&draft.series),
            record: text_or_null(&draft.record),
            case_signature: text_or_null(&draft.case_signature),
            additional_case_signature: text_or_null(&draft.additional_case_signature),
            case_title: text_or_null(&draft.case_title),
            case_date: text_or_null(&draft.case_date),
            pages_count: int_or_null(&draft.pages_count),
            inventory_year: int_or_null(&draft.inventory_year),
            inventory_start_page: int_or_null(&draft.inventory_start_page),
            mark_type: int_or_null(&draft.mark_type),
            scans_url: text_or_null(&draft.scans_url),
            notes: text_or_null(&draft.notes),
            email: text_or_null(&draft.email),
        }
    }

    pub fn mark(&self) -> Option<MarkType> {
        self.mark_type.and_then(MarkType::from_code)
    }

    /// "Province, district, community, type name" from whichever parts exist.
    pub fn historical_location(&self) -> String {
        let settlement = match (&self.old_settlement_type, &self.old_settlement_name) {
            (Some(kind), Some(name)) => Some(format!("{} {}", kind, name)),
            _ => None,
        };
        [
            self.old_province.clone(),
            self.old_district.clone(),
            self.old_community.clone(),
            settlement,
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn current_location(&self) -> String {
        let settlement = match (&self.current_settlement_type, &self.current_settlement_name) {
            (Some(kind), Some(name)) => Some(format!("{} {}", kind, name)),
            _ => None,
        };
        [
            self.current_region.as_ref().map(|r| format!("{} область", r)),
            self.current_district.as_ref().map(|d| format!("{} район", d)),
            self.current_community.as_ref().map(|c| format!("{} громада", c)),
            settlement,
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// The identity of a record for duplicate detection.
///
/// `inventory_year` only takes part when the draft specifies it, so a draft
/// without a year matches records of any year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchKey {
    pub current_region: String,
    pub current_district: String,
    pub current_community: String,
    pub current_settlement_type: String,
    pub current_settlement_name: String,
    pub case_signature: String,
    pub inventory_year: Option<i64>,
}

impl MatchKey {
    pub fn from_draft(draft: &RecordDraft) -> Self {
        Self {
            current_region: draft.current_region.clone(),
            current_district: draft.current_district.clone(),
            current_community: draft.current_community.clone(),
            current_settlement_type: draft.current_settlement_type.clone(),
            current_settlement_name: draft.current_settlement_name.clone(),
            case_signature: draft.case_signature.clone(),
            inventory_year: int_or_null(&draft.inventory_year),
        }
    }
}

/// A submitted record waiting for review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRecord {
    pub id: String,
    pub created_at: String,
    pub created_by: Option<String>,
    pub is_ukrainian_archive: ArchiveHolding,
    #[serde(flatten)]
    pub fields: RecordFields,
}

/// A record published in the public registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedRecord {
    pub id: String,
    pub created_at: String,
    pub approved: bool,
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub fields: RecordFields,
}

pub fn record_url(id: &str) -> String {
    format!("/record/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_numeric_fields_become_null() {
        let draft = RecordDraft {
            latitude: "50.543600".into(),
            longitude: " 30.212800 ".into(),
            mark_type: "1".into(),
            inventory_year: "1798".into(),
            ..Default::default()
        };
        let fields = RecordFields::from_draft(&draft);
        assert_eq!(fields.latitude, Some(50.5436));
        assert_eq!(fields.longitude, Some(30.2128));
        assert_eq!(fields.mark_type, Some(1));
        assert_eq!(fields.inventory_year, Some(1798));
        assert_eq!(fields.pages_count, None);
        assert_eq!(fields.inventory_start_page, None);
        assert_eq!(fields.notes, None);
    }

    #[test]
    fn unparseable_numbers_are_dropped() {
        assert_eq!(int_or_null("12abc"), None);
        assert_eq!(float_or_null("north"), None);
        assert_eq!(float_or_null("NaN"), None);
        assert_eq!(int_or_null(" 42 "), Some(42));
    }

    #[test]
    fn match_key_includes_year_only_when_given() {
        let mut draft = RecordDraft {
            current_region: "Київська".into(),
            case_signature: "ЦДІАК 1-2-3".into(),
            ..Default::default()
        };
        assert_eq!(MatchKey::from_draft(&draft).inventory_year, None);
        draft.inventory_year = "1850".into();
        assert_eq!(MatchKey::from_draft(&draft).inventory_year, Some(1850));
    }

    #[test]
    fn location_lines_skip_missing_parts() {
        let fields = RecordFields {
            current_region: Some("Київська".into()),
            current_community: Some("Бучанська".into()),
            current_settlement_type: Some("місто".into()),
            current_settlement_name: Some("Буча".into()),
            old_province: Some("Київська губернія".into()),
            old_settlement_name: Some("Буча".into()),
            ..Default::default()
        };
        assert_eq!(
            fields.current_location(),
            "Київська область, Бучанська громада, місто Буча"
        );
        assert_eq!(fields.historical_location(), "Київська губернія");
    }

    #[test]
    fn pending_record_serializes_flat() {
        let pending = PendingRecord {
            id: "abc".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            created_by: None,
            is_ukrainian_archive: ArchiveHolding::Ukrainian,
            fields: RecordFields {
                pages_count: Some(12),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["pages_count"], 12);
        assert_eq!(json["is_ukrainian_archive"], "Yes");
        assert!(json["latitude"].is_null());
    }
}
