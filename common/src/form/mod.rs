//! Draft reducer for the contribution and moderation forms.
//!
//! Every user interaction is one [`FormEvent`]; [`FormState::apply`] turns the
//! previous state plus the event into the next state. The cascade of clears
//! lives here and nowhere else, so a child selection can never outlive a change
//! of its parent:
//!
//! | changed field            | cleared                                              |
//! |--------------------------|------------------------------------------------------|
//! | region                   | district, community, settlement type/name, lat, lon |
//! | district                 | community, settlement type/name, lat, lon           |
//! | community                | settlement type/name                                 |
//! | settlement type          | settlement name, when it is not of the new type      |
//! | manual entry (on or off) | region and everything a region change clears        |
//!
//! In manual-entry mode the location fields are freeform text and no cascade
//! or coordinate auto-fill runs.

use crate::map::{click_to_draft, format_coordinate};
use crate::model::draft::{ArchiveHolding, DraftField, RecordDraft};
use crate::model::lookup::{LookupIndex, settlement_types, settlements_of_type};

const BELOW_REGION: [DraftField; 6] = [
    DraftField::CurrentDistrict,
    DraftField::CurrentCommunity,
    DraftField::CurrentSettlementType,
    DraftField::CurrentSettlementName,
    DraftField::Latitude,
    DraftField::Longitude,
];

const BELOW_DISTRICT: [DraftField; 5] = [
    DraftField::CurrentCommunity,
    DraftField::CurrentSettlementType,
    DraftField::CurrentSettlementName,
    DraftField::Latitude,
    DraftField::Longitude,
];

const BELOW_COMMUNITY: [DraftField; 2] = [
    DraftField::CurrentSettlementType,
    DraftField::CurrentSettlementName,
];

/// A single user interaction with the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged(DraftField, String),
    ManualEntryToggled(bool),
    MapClicked { lat: f64, lng: f64 },
    /// Replace the whole draft, e.g. when the moderator moves to another record.
    Load(RecordDraft),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: RecordDraft,
    pub manual_entry: bool,
}

impl FormState {
    pub fn new(draft: RecordDraft) -> Self {
        Self {
            draft,
            manual_entry: false,
        }
    }

    pub fn apply(self, index: &LookupIndex, event: FormEvent) -> FormState {
        match event {
            FormEvent::FieldChanged(field, value) => FormState {
                draft: apply_field_change(index, self.manual_entry, self.draft, field, value),
                manual_entry: self.manual_entry,
            },
            FormEvent::ManualEntryToggled(enabled) => FormState {
                draft: set_manual_entry(self.draft),
                manual_entry: enabled,
            },
            FormEvent::MapClicked { lat, lng } => FormState {
                draft: apply_map_click(self.draft, lat, lng),
                manual_entry: self.manual_entry,
            },
            FormEvent::Load(draft) => FormState {
                draft,
                manual_entry: false,
            },
        }
    }

    pub fn options(&self, index: &LookupIndex) -> FormOptions {
        FormOptions::derive(index, &self.draft, self.manual_entry)
    }
}

/// Applies one field edit and the cascade it implies.
pub fn apply_field_change(
    index: &LookupIndex,
    manual_entry: bool,
    mut draft: RecordDraft,
    field: DraftField,
    value: String,
) -> RecordDraft {
    if draft.get(field) == value {
        return draft;
    }
    draft.set(field, value);

    if !manual_entry {
        match field {
            DraftField::CurrentRegion => draft.clear(&BELOW_REGION),
            DraftField::CurrentDistrict => draft.clear(&BELOW_DISTRICT),
            DraftField::CurrentCommunity => draft.clear(&BELOW_COMMUNITY),
            DraftField::CurrentSettlementType => {
                let settlements = index.settlements_for(
                    &draft.current_region,
                    &draft.current_district,
                    &draft.current_community,
                );
                let still_valid = settlements_of_type(settlements, &draft.current_settlement_type)
                    .iter()
                    .any(|s| s.name == draft.current_settlement_name);
                if !still_valid {
                    draft.current_settlement_name.clear();
                }
                autofill_coordinates(index, &mut draft);
            }
            DraftField::CurrentSettlementName => autofill_coordinates(index, &mut draft),
            _ => {}
        }
    }

    derive_case_signature(&mut draft);
    draft
}

/// Clears the looked-up location so freeform and looked-up values never mix.
/// The same clear runs when manual entry is switched on and when it is
/// switched off.
pub fn set_manual_entry(mut draft: RecordDraft) -> RecordDraft {
    draft.current_region.clear();
    draft.clear(&BELOW_REGION);
    draft
}

/// A map click always wins over coordinates filled from the lookup index.
pub fn apply_map_click(mut draft: RecordDraft, lat: f64, lng: f64) -> RecordDraft {
    let (lat, lng) = click_to_draft(lat, lng);
    draft.latitude = lat;
    draft.longitude = lng;
    draft
}

/// Overwrites the coordinates when the selected type and name resolve to
/// exactly one settlement that has both coordinates.
fn autofill_coordinates(index: &LookupIndex, draft: &mut RecordDraft) {
    if draft.current_settlement_type.is_empty() || draft.current_settlement_name.is_empty() {
        return;
    }
    let settlements = index.settlements_for(
        &draft.current_region,
        &draft.current_district,
        &draft.current_community,
    );
    let matches: Vec<_> = settlements_of_type(settlements, &draft.current_settlement_type)
        .into_iter()
        .filter(|s| s.name == draft.current_settlement_name)
        .collect();
    if let [only] = matches.as_slice() {
        if let Some((lat, lon)) = only.coordinates() {
            draft.latitude = format_coordinate(lat);
            draft.longitude = format_coordinate(lon);
        }
    }
}

/// Recomputes `case_signature` for Ukrainian holdings.
///
/// Only a complete set of four parts overwrites the signature; clearing a part
/// leaves the previously derived value in place.
fn derive_case_signature(draft: &mut RecordDraft) {
    if draft.is_ukrainian_archive != ArchiveHolding::Ukrainian {
        return;
    }
    if let Some(signature) = draft.structured_signature() {
        draft.case_signature = signature;
    }
}

/// Option lists for the cascading selects, derived fresh from the index and
/// the current selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormOptions {
    pub regions: Vec<String>,
    pub districts: Vec<String>,
    pub communities: Vec<String>,
    pub settlement_types: Vec<String>,
    pub settlements: Vec<String>,
}

impl FormOptions {
    pub fn derive(index: &LookupIndex, draft: &RecordDraft, manual_entry: bool) -> Self {
        if manual_entry {
            return Self::default();
        }
        let settlements = index.settlements_for(
            &draft.current_region,
            &draft.current_district,
            &draft.current_community,
        );
        Self {
            regions: index.regions(),
            districts: index.districts_for(&draft.current_region),
            communities: index.communities_for(&draft.current_region, &draft.current_district),
            settlement_types: settlement_types(settlements),
            settlements: settlements_of_type(settlements, &draft.current_settlement_type)
                .into_iter()
                .map(|s| s.name.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lookup::tests::sample_index;

    fn change(state: FormState, field: DraftField, value: &str) -> FormState {
        state.apply(&sample_index(), FormEvent::FieldChanged(field, value.to_string()))
    }

    fn selected_bucha() -> FormState {
        let mut state = FormState::default();
        state = change(state, DraftField::CurrentRegion, "Київська");
        state = change(state, DraftField::CurrentDistrict, "Бучанський");
        state = change(state, DraftField::CurrentCommunity, "Бучанська");
        state = change(state, DraftField::CurrentSettlementType, "місто");
        change(state, DraftField::CurrentSettlementName, "Буча")
    }

    fn assert_location_cleared(draft: &RecordDraft) {
        for field in BELOW_REGION {
            assert_eq!(draft.get(field), "", "{} was not cleared", field.name());
        }
    }

    #[test]
    fn selecting_settlement_fills_coordinates() {
        let state = selected_bucha();
        assert_eq!(state.draft.latitude, "50.543600");
        assert_eq!(state.draft.longitude, "30.212800");
    }

    #[test]
    fn new_region_clears_everything_below() {
        let state = selected_bucha();
        let state = change(state, DraftField::CurrentRegion, "Львівська");
        assert_eq!(state.draft.current_region, "Львівська");
        assert_location_cleared(&state.draft);
    }

    #[test]
    fn reselecting_same_region_keeps_children() {
        let state = selected_bucha();
        let state = change(state, DraftField::CurrentRegion, "Київська");
        assert_eq!(state.draft.current_settlement_name, "Буча");
    }

    #[test]
    fn district_change_clears_community_and_coordinates() {
        let state = change(selected_bucha(), DraftField::CurrentDistrict, "Обухівський");
        assert_eq!(state.draft.current_region, "Київська");
        assert!(state.draft.current_community.is_empty());
        assert!(state.draft.current_settlement_name.is_empty());
        assert!(state.draft.latitude.is_empty());
        assert!(state.draft.longitude.is_empty());
    }

    #[test]
    fn community_change_clears_settlement_but_keeps_coordinates() {
        let state = change(selected_bucha(), DraftField::CurrentCommunity, "Ірпінська");
        assert!(state.draft.current_settlement_type.is_empty());
        assert!(state.draft.current_settlement_name.is_empty());
        assert_eq!(state.draft.latitude, "50.543600");
    }

    #[test]
    fn type_change_drops_name_of_other_type() {
        let state = change(selected_bucha(), DraftField::CurrentSettlementType, "село");
        assert!(state.draft.current_settlement_name.is_empty());
        let options = state.options(&sample_index());
        assert_eq!(options.settlements, vec!["Блиставиця", "Луб'янка"]);
    }

    #[test]
    fn settlement_without_coordinates_leaves_previous_point() {
        let mut state = change(selected_bucha(), DraftField::CurrentSettlementType, "село");
        state = change(state, DraftField::CurrentSettlementName, "Луб'янка");
        assert_eq!(state.draft.latitude, "50.543600");
    }

    #[test]
    fn map_click_overrides_lookup_coordinates() {
        let state = selected_bucha().apply(
            &sample_index(),
            FormEvent::MapClicked {
                lat: 50.6,
                lng: 30.25,
            },
        );
        assert_eq!(state.draft.latitude, "50.600000");
        assert_eq!(state.draft.longitude, "30.250000");
        assert_eq!(state.draft.current_settlement_name, "Буча");
    }

    #[test]
    fn manual_entry_round_trip_clears_location() {
        let index = sample_index();
        let state = selected_bucha().apply(&index, FormEvent::ManualEntryToggled(true));
        assert!(state.manual_entry);
        assert!(state.draft.current_region.is_empty());
        assert_location_cleared(&state.draft);

        let state = state.apply(&index, FormEvent::ManualEntryToggled(false));
        assert!(!state.manual_entry);
        assert_location_cleared(&state.draft);
    }

    #[test]
    fn manual_entry_off_clears_even_without_edits() {
        let index = sample_index();
        let mut state = selected_bucha();
        state.manual_entry = true;
        let state = state.apply(&index, FormEvent::ManualEntryToggled(false));
        assert!(state.draft.current_region.is_empty());
        assert_location_cleared(&state.draft);
    }

    #[test]
    fn manual_entry_accepts_freeform_without_cascade() {
        let index = sample_index();
        let mut state = FormState::default().apply(&index, FormEvent::ManualEntryToggled(true));
        state = change(state, DraftField::CurrentDistrict, "Довільний");
        state = change(state, DraftField::CurrentRegion, "Невідома");
        assert_eq!(state.draft.current_district, "Довільний");
        assert_eq!(state.options(&index), FormOptions::default());
    }

    #[test]
    fn signature_is_derived_from_all_four_parts() {
        let mut state = FormState::default();
        state = change(state, DraftField::Archive, "ЦДІАК");
        state = change(state, DraftField::Fonds, "1");
        state = change(state, DraftField::Series, "2");
        assert!(state.draft.case_signature.is_empty());
        state = change(state, DraftField::Record, "3");
        assert_eq!(state.draft.case_signature, "ЦДІАК 1-2-3");

        state = change(state, DraftField::Series, "5");
        assert_eq!(state.draft.case_signature, "ЦДІАК 1-5-3");

        // Clearing a part keeps the last derived value.
        state = change(state, DraftField::Fonds, "");
        assert_eq!(state.draft.case_signature, "ЦДІАК 1-5-3");
    }

    #[test]
    fn foreign_holding_keeps_typed_signature() {
        let mut state = change(FormState::default(), DraftField::IsUkrainianArchive, "No");
        state = change(state, DraftField::CaseSignature, "AGAD 12/3");
        for (field, value) in [
            (DraftField::Archive, "AGAD"),
            (DraftField::Fonds, "1"),
            (DraftField::Series, "2"),
            (DraftField::Record, "3"),
        ] {
            state = change(state, field, value);
        }
        assert_eq!(state.draft.case_signature, "AGAD 12/3");
    }

    #[test]
    fn options_follow_selection() {
        let index = sample_index();
        let state = change(FormState::default(), DraftField::CurrentRegion, "Київська");
        let options = state.options(&index);
        assert_eq!(options.districts, vec!["Бучанський", "Обухівський"]);
        assert!(options.communities.is_empty());
        assert!(options.settlement_types.is_empty());
    }
}
