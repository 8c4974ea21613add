use common::model::draft::{DraftField, RecordDraft};

#[derive(Clone)]
pub enum Msg {
    Field(DraftField, String),
    ManualEntry(bool),
    MapClicked(f64, f64),
    Load(RecordDraft),
    Submit,
}
