//! The validation gate run before a draft is submitted.
//!
//! Rules are checked in a fixed order and the first failure is returned; the
//! caller shows it as a toast and keeps the draft. The display text of each
//! error is the Ukrainian message shown to contributors.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::draft::{ArchiveHolding, DraftField, RecordDraft};

pub const MIN_INVENTORY_YEAR: i64 = 1500;
pub const MAX_INVENTORY_YEAR: i64 = 2000;

/// Fields that every submission must fill, in the order they are checked.
pub const ALWAYS_REQUIRED: [DraftField; 9] = [
    DraftField::CurrentRegion,
    DraftField::CurrentDistrict,
    DraftField::CurrentCommunity,
    DraftField::CurrentSettlementType,
    DraftField::CurrentSettlementName,
    DraftField::Latitude,
    DraftField::Longitude,
    DraftField::MarkType,
    DraftField::Email,
];

const STRUCTURED_SIGNATURE: [DraftField; 4] = [
    DraftField::Archive,
    DraftField::Fonds,
    DraftField::Series,
    DraftField::Record,
];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s]+$").expect("valid url regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Поле \"{}\" обов’язкове.", .0.label())]
    Required(DraftField),
    #[error("Поле \"inventory_year\" має бути числом від 1500 до 2000")]
    InventoryYearOutOfRange,
    #[error("Поле \"email\" має містити дійсну електронну адресу.")]
    InvalidEmail,
    #[error("Поле \"Посилання на скани\" має містити одне коректне посилання або бути порожнім.")]
    InvalidScansUrl,
    #[error("Поле \"Кількість сторінок справи\" має бути числом більшим за 0.")]
    InvalidPagesCount,
    #[error("Поле \"Сторінка початку інвентаря\" має бути числом більшим за 0.")]
    InvalidStartPage,
}

impl ValidationError {
    /// The field the message refers to.
    pub fn field(&self) -> DraftField {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::InventoryYearOutOfRange => DraftField::InventoryYear,
            ValidationError::InvalidEmail => DraftField::Email,
            ValidationError::InvalidScansUrl => DraftField::ScansUrl,
            ValidationError::InvalidPagesCount => DraftField::PagesCount,
            ValidationError::InvalidStartPage => DraftField::InventoryStartPage,
        }
    }
}

fn positive_int(value: &str) -> bool {
    value.trim().parse::<i64>().map(|n| n > 0).unwrap_or(false)
}

/// Checks a draft; `Ok(())` means it may be submitted.
pub fn validate(draft: &RecordDraft) -> Result<(), ValidationError> {
    let conditional: &[DraftField] = match draft.is_ukrainian_archive {
        ArchiveHolding::Ukrainian => &STRUCTURED_SIGNATURE,
        ArchiveHolding::Foreign => &[DraftField::CaseSignature],
    };
    for field in ALWAYS_REQUIRED.iter().chain(conditional) {
        if draft.get(*field).is_empty() {
            return Err(ValidationError::Required(*field));
        }
    }

    if !draft.inventory_year.is_empty() {
        let in_range = draft
            .inventory_year
            .trim()
            .parse::<i64>()
            .map(|year| (MIN_INVENTORY_YEAR..=MAX_INVENTORY_YEAR).contains(&year))
            .unwrap_or(false);
        if !in_range {
            return Err(ValidationError::InventoryYearOutOfRange);
        }
    }

    if !EMAIL_RE.is_match(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !draft.scans_url.is_empty() && !URL_RE.is_match(&draft.scans_url) {
        return Err(ValidationError::InvalidScansUrl);
    }

    if !draft.pages_count.is_empty() && !positive_int(&draft.pages_count) {
        return Err(ValidationError::InvalidPagesCount);
    }

    if !draft.inventory_start_page.is_empty() && !positive_int(&draft.inventory_start_page) {
        return Err(ValidationError::InvalidStartPage);
    }

    Ok(())
}
