//! Properties of the `InventoryForm`.
//!
//! The same form backs the contribution page and the moderation walker. The
//! parent decides what happens with a finished draft through `on_submit`, and
//! swaps the edited record by changing `record_key` together with `initial`.

use std::rc::Rc;

use common::model::draft::RecordDraft;
use common::model::lookup::LookupIndex;
use yew::prelude::*;

/// Shared, read-only lookup index. Compared by pointer so that re-rendering a
/// parent does not walk the whole hierarchy.
#[derive(Clone, Default)]
pub struct SharedLookup(pub Rc<LookupIndex>);

impl PartialEq for SharedLookup {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct InventoryFormProps {
    pub lookup: SharedLookup,

    /// Draft loaded into the form whenever `record_key` changes.
    #[prop_or_default]
    pub initial: RecordDraft,

    /// Identity of the draft being edited. A new key reloads `initial`.
    #[prop_or_default]
    pub record_key: AttrValue,

    pub submit_label: AttrValue,

    /// Run the validation gate before `on_submit` is emitted.
    #[prop_or(true)]
    pub validate: bool,

    /// Disables the submit button while the parent waits for the server.
    #[prop_or_default]
    pub busy: bool,

    pub on_submit: Callback<RecordDraft>,
}
