//! The editable record draft behind the contribution and moderation forms.
//!
//! Every field is kept as the text the user typed; numeric coercion happens only
//! when the draft is turned into [`RecordFields`](crate::model::record::RecordFields).

use serde::{Deserialize, Serialize};

use crate::map::format_coordinate;
use crate::model::record::{PendingRecord, RecordFields};

/// Whether the case is held by a Ukrainian archive.
///
/// For Ukrainian holdings the case signature is assembled from its four parts;
/// otherwise the user types it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveHolding {
    #[default]
    #[serde(rename = "Yes")]
    Ukrainian,
    #[serde(rename = "No")]
    Foreign,
}

impl ArchiveHolding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveHolding::Ukrainian => "Yes",
            ArchiveHolding::Foreign => "No",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(ArchiveHolding::Ukrainian),
            "No" => Some(ArchiveHolding::Foreign),
            _ => None,
        }
    }
}

/// Names of the draft fields as they appear in form inputs and JSON payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    CurrentRegion,
    CurrentDistrict,
    CurrentCommunity,
    CurrentSettlementType,
    CurrentSettlementName,
    Latitude,
    Longitude,
    OldProvince,
    OldDistrict,
    OldCommunity,
    OldSettlementType,
    OldSettlementName,
    IsUkrainianArchive,
    Archive,
    Fonds,
    Series,
    Record,
    CaseSignature,
    AdditionalCaseSignature,
    CaseTitle,
    CaseDate,
    PagesCount,
    InventoryYear,
    InventoryStartPage,
    MarkType,
    ScansUrl,
    Notes,
    Email,
}

impl DraftField {
    pub const ALL: [DraftField; 28] = [
        DraftField::CurrentRegion,
        DraftField::CurrentDistrict,
        DraftField::CurrentCommunity,
        DraftField::CurrentSettlementType,
        DraftField::CurrentSettlementName,
        DraftField::Latitude,
        DraftField::Longitude,
        DraftField::OldProvince,
        DraftField::OldDistrict,
        DraftField::OldCommunity,
        DraftField::OldSettlementType,
        DraftField::OldSettlementName,
        DraftField::IsUkrainianArchive,
        DraftField::Archive,
        DraftField::Fonds,
        DraftField::Series,
        DraftField::Record,
        DraftField::CaseSignature,
        DraftField::AdditionalCaseSignature,
        DraftField::CaseTitle,
        DraftField::CaseDate,
        DraftField::PagesCount,
        DraftField::InventoryYear,
        DraftField::InventoryStartPage,
        DraftField::MarkType,
        DraftField::ScansUrl,
        DraftField::Notes,
        DraftField::Email,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DraftField::CurrentRegion => "current_region",
            DraftField::CurrentDistrict => "current_district",
            DraftField::CurrentCommunity => "current_community",
            DraftField::CurrentSettlementType => "current_settlement_type",
            DraftField::CurrentSettlementName => "current_settlement_name",
            DraftField::Latitude => "latitude",
            DraftField::Longitude => "longitude",
            DraftField::OldProvince => "old_province",
            DraftField::OldDistrict => "old_district",
            DraftField::OldCommunity => "old_community",
            DraftField::OldSettlementType => "old_settlement_type",
            DraftField::OldSettlementName => "old_settlement_name",
            DraftField::IsUkrainianArchive => "is_ukrainian_archive",
            DraftField::Archive => "archive",
            DraftField::Fonds => "fonds",
            DraftField::Series => "series",
            DraftField::Record => "record",
            DraftField::CaseSignature => "case_signature",
            DraftField::AdditionalCaseSignature => "additional_case_signature",
            DraftField::CaseTitle => "case_title",
            DraftField::CaseDate => "case_date",
            DraftField::PagesCount => "pages_count",
            DraftField::InventoryYear => "inventory_year",
            DraftField::InventoryStartPage => "inventory_start_page",
            DraftField::MarkType => "mark_type",
            DraftField::ScansUrl => "scans_url",
            DraftField::Notes => "notes",
            DraftField::Email => "email",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Ukrainian label shown to users in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::CurrentRegion => "Область",
            DraftField::CurrentDistrict => "Район",
            DraftField::CurrentCommunity => "ОТГ",
            DraftField::CurrentSettlementType => "Тип населеного пункту",
            DraftField::CurrentSettlementName => "Назва населеного пункту",
            DraftField::Latitude => "Широта",
            DraftField::Longitude => "Довгота",
            DraftField::OldProvince => "Губернія",
            DraftField::OldDistrict => "Повіт",
            DraftField::OldCommunity => "Волость",
            DraftField::OldSettlementType => "Історичний тип населеного пункту",
            DraftField::OldSettlementName => "Історична назва населеного пункту",
            DraftField::IsUkrainianArchive => "Архів в Україні",
            DraftField::Archive => "Архів",
            DraftField::Fonds => "Фонд",
            DraftField::Series => "Опис",
            DraftField::Record => "Справа",
            DraftField::CaseSignature => "Шифр справи",
            DraftField::AdditionalCaseSignature => "Додатковий шифр справи",
            DraftField::CaseTitle => "Назва справи",
            DraftField::CaseDate => "Дата справи",
            DraftField::PagesCount => "Кількість сторінок справи",
            DraftField::InventoryYear => "Рік інвентаря",
            DraftField::InventoryStartPage => "Сторінка початку інвентаря",
            DraftField::MarkType => "Тип позначки",
            DraftField::ScansUrl => "Посилання на скани",
            DraftField::Notes => "Примітки",
            DraftField::Email => "Email",
        }
    }
}

/// One inventory record as it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDraft {
    pub current_region: String,
    pub current_district: String,
    pub current_community: String,
    pub current_settlement_type: String,
    pub current_settlement_name: String,
    pub latitude: String,
    pub longitude: String,
    pub old_province: String,
    pub old_district: String,
    pub old_community: String,
    pub old_settlement_type: String,
    pub old_settlement_name: String,
    pub is_ukrainian_archive: ArchiveHolding,
    pub archive: String,
    pub fonds: String,
    pub series: String,
    pub record: String,
    pub case_signature: String,
    pub additional_case_signature: String,
    pub case_title: String,
    pub case_date: String,
    pub pages_count: String,
    pub inventory_year: String,
    pub inventory_start_page: String,
    pub mark_type: String,
    pub scans_url: String,
    pub notes: String,
    pub email: String,
}

impl RecordDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::CurrentRegion => &self.current_region,
            DraftField::CurrentDistrict => &self.current_district,
            DraftField::CurrentCommunity => &self.current_community,
            DraftField::CurrentSettlementType => &self.current_settlement_type,
            DraftField::CurrentSettlementName => &self.current_settlement_name,
            DraftField::Latitude => &self.latitude,
            DraftField::Longitude => &self.longitude,
            DraftField::OldProvince => &self.old_province,
            DraftField::OldDistrict => &self.old_district,
            DraftField::OldCommunity => &self.old_community,
            DraftField::OldSettlementType => &self.old_settlement_type,
            DraftField::OldSettlementName => &self.old_settlement_name,
            DraftField::IsUkrainianArchive => self.is_ukrainian_archive.as_str(),
            DraftField::Archive => &self.archive,
            DraftField::Fonds => &self.fonds,
            DraftField::Series => &self.series,
            DraftField::Record => &self.record,
            DraftField::CaseSignature => &self.case_signature,
            DraftField::AdditionalCaseSignature => &self.additional_case_signature,
            DraftField::CaseTitle => &self.case_title,
            DraftField::CaseDate => &self.case_date,
            DraftField::PagesCount => &self.pages_count,
            DraftField::InventoryYear => &self.inventory_year,
            DraftField::InventoryStartPage => &self.inventory_start_page,
            DraftField::MarkType => &self.mark_type,
            DraftField::ScansUrl => &self.scans_url,
            DraftField::Notes => &self.notes,
            DraftField::Email => &self.email,
        }
    }

    /// Writes one field verbatim, with no cascade. An unrecognised archive
    /// holding value leaves the flag untouched.
    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::IsUkrainianArchive => {
                if let Some(holding) = ArchiveHolding::parse(&value) {
                    self.is_ukrainian_archive = holding;
                }
                return;
            }
            DraftField::CurrentRegion => &mut self.current_region,
            DraftField::CurrentDistrict => &mut self.current_district,
            DraftField::CurrentCommunity => &mut self.current_community,
            DraftField::CurrentSettlementType => &mut self.current_settlement_type,
            DraftField::CurrentSettlementName => &mut self.current_settlement_name,
            DraftField::Latitude => &mut self.latitude,
            DraftField::Longitude => &mut self.longitude,
            DraftField::OldProvince => &mut self.old_province,
            DraftField::OldDistrict => &mut self.old_district,
            DraftField::OldCommunity => &mut self.old_community,
            DraftField::OldSettlementType => &mut self.old_settlement_type,
            DraftField::OldSettlementName => &mut self.old_settlement_name,
            DraftField::Archive => &mut self.archive,
            DraftField::Fonds => &mut self.fonds,
            DraftField::Series => &mut self.series,
            DraftField::Record => &mut self.record,
            DraftField::CaseSignature => &mut self.case_signature,
            DraftField::AdditionalCaseSignature => &mut self.additional_case_signature,
            DraftField::CaseTitle => &mut self.case_title,
            DraftField::CaseDate => &mut self.case_date,
            DraftField::PagesCount => &mut self.pages_count,
            DraftField::InventoryYear => &mut self.inventory_year,
            DraftField::InventoryStartPage => &mut self.inventory_start_page,
            DraftField::MarkType => &mut self.mark_type,
            DraftField::ScansUrl => &mut self.scans_url,
            DraftField::Notes => &mut self.notes,
            DraftField::Email => &mut self.email,
        };
        *slot = value;
    }

    pub fn clear(&mut self, fields: &[DraftField]) {
        for field in fields {
            self.set(*field, String::new());
        }
    }

    /// The signature assembled from the structured parts, when all four are
    /// present.
    pub fn structured_signature(&self) -> Option<String> {
        if self.archive.is_empty()
            || self.fonds.is_empty()
            || self.series.is_empty()
            || self.record.is_empty()
        {
            return None;
        }
        Some(format!(
            "{} {}-{}-{}",
            self.archive, self.fonds, self.series, self.record
        ))
    }

    /// Pre-populates a draft from a stored pending record so a moderator can
    /// edit it in place.
    pub fn from_pending(pending: &PendingRecord) -> Self {
        let mut draft = Self::from_fields(&pending.fields);
        draft.is_ukrainian_archive = pending.is_ukrainian_archive;
        draft
    }

    pub fn from_fields(fields: &RecordFields) -> Self {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }
        fn int(value: Option<i64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        fn coord(value: Option<f64>) -> String {
            value.map(format_coordinate).unwrap_or_default()
        }

        Self {
            current_region: text(&fields.current_region),
            current_district: text(&fields.current_district),
            current_community: text(&fields.current_community),
            current_settlement_type: text(&fields.current_settlement_type),
            current_settlement_name: text(&fields.current_settlement_name),
            latitude: coord(fields.latitude),
            longitude: coord(fields.longitude),
            old_province: text(&fields.old_province),
            old_district: text(&fields.old_district),
            old_community: text(&fields.old_community),
            old_settlement_type: text(&fields.old_settlement_type),
            old_settlement_name: text(&fields.old_settlement_name),
            is_ukrainian_archive: ArchiveHolding::default(),
            archive: text(&fields.archive),
            fonds: text(&fields.fonds),
            series: text(&fields.series),
            record: text(&fields.record),
            case_signature: text(&fields.case_signature),
            additional_case_signature: text(&fields.additional_case_signature),
            case_title: text(&fields.case_title),
            case_date: text(&fields.case_date),
            pages_count: int(fields.pages_count),
            inventory_year: int(fields.inventory_year),
            inventory_start_page: int(fields.inventory_start_page),
            mark_type: int(fields.mark_type),
            scans_url: text(&fields.scans_url),
            notes: text(&fields.notes),
            email: text(&fields.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in DraftField::ALL {
            assert_eq!(DraftField::from_name(field.name()), Some(field));
        }
        assert_eq!(DraftField::from_name("manualEntry"), None);
    }

    #[test]
    fn set_and_get_use_the_same_slot() {
        let mut draft = RecordDraft::default();
        for field in DraftField::ALL {
            if field == DraftField::IsUkrainianArchive {
                continue;
            }
            draft.set(field, field.name().to_string());
            assert_eq!(draft.get(field), field.name());
        }
    }

    #[test]
    fn archive_flag_ignores_unknown_values() {
        let mut draft = RecordDraft::default();
        assert_eq!(draft.is_ukrainian_archive, ArchiveHolding::Ukrainian);
        draft.set(DraftField::IsUkrainianArchive, "No".into());
        assert_eq!(draft.is_ukrainian_archive, ArchiveHolding::Foreign);
        draft.set(DraftField::IsUkrainianArchive, "maybe".into());
        assert_eq!(draft.is_ukrainian_archive, ArchiveHolding::Foreign);
    }

    #[test]
    fn missing_json_fields_default_to_empty() {
        let draft: RecordDraft =
            serde_json::from_str(r#"{"current_region": "Київська", "is_ukrainian_archive": "No"}"#)
                .unwrap();
        assert_eq!(draft.current_region, "Київська");
        assert_eq!(draft.is_ukrainian_archive, ArchiveHolding::Foreign);
        assert!(draft.email.is_empty());
    }
}
