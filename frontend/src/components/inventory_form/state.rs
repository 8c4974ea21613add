use common::form::FormState;
use common::model::draft::RecordDraft;

use crate::helpers::compute_md5;

pub struct InventoryForm {
    /// Draft plus manual-entry flag, advanced only through `FormState::apply`.
    pub form: FormState,

    /// Fingerprint of the draft as loaded; differs from the current one when
    /// there are unsaved edits.
    pub original_md5: String,
}

impl InventoryForm {
    pub fn new(draft: RecordDraft) -> Self {
        Self {
            original_md5: fingerprint(&draft),
            form: FormState::new(draft),
        }
    }

    pub fn is_dirty(&self) -> bool {
        fingerprint(&self.form.draft) != self.original_md5
    }
}

pub fn fingerprint(draft: &RecordDraft) -> String {
    compute_md5(&serde_json::to_string(draft).unwrap_or_default())
}
