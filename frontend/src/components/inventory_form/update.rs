//! Elm-style update for the inventory form.

use common::form::FormEvent;
use common::validation::validate;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::{fingerprint, InventoryForm};

pub fn update(form: &mut InventoryForm, ctx: &Context<InventoryForm>, msg: Msg) -> bool {
    let lookup = ctx.props().lookup.0.clone();
    let event = match msg {
        Msg::Field(field, value) => FormEvent::FieldChanged(field, value),
        Msg::ManualEntry(enabled) => FormEvent::ManualEntryToggled(enabled),
        Msg::MapClicked(lat, lng) => FormEvent::MapClicked { lat, lng },
        Msg::Load(draft) => {
            form.original_md5 = fingerprint(&draft);
            FormEvent::Load(draft)
        }
        Msg::Submit => {
            if ctx.props().validate {
                if let Err(e) = validate(&form.form.draft) {
                    show_toast(&e.to_string());
                    return false;
                }
            }
            ctx.props().on_submit.emit(form.form.draft.clone());
            return false;
        }
    };
    let previous = std::mem::take(&mut form.form);
    form.form = previous.apply(&lookup, event);
    set_window_dirty_flag(form.is_dirty());
    true
}

/// Mirrors unsaved edits into `window.app_dirty`, which `index.html` checks
/// before the page is left.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}
