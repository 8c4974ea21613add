//! View rendering for the inventory form.
//!
//! Location selects are disabled until their parent has a value; in manual
//! entry mode they become free text inputs. For Ukrainian holdings the case
//! signature is derived from its four parts and shown read-only.

use common::form::FormOptions;
use common::model::draft::{ArchiveHolding, DraftField, RecordDraft};
use common::model::record::MarkType;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::components::map_selector::MapSelector;

use super::messages::Msg;
use super::state::InventoryForm;

pub fn view(form: &InventoryForm, ctx: &Context<InventoryForm>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let draft = &form.form.draft;
    let options = form.form.options(&props.lookup.0);

    html! {
        <form
            class="inventory-form"
            onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::Submit
            })}
        >
            { build_current_location(form, link, &options) }
            { build_historical_location(draft, link) }
            { build_archive_section(draft, link) }
            { build_case_section(draft, link) }
            <div class="form-actions">
                <button type="submit" class="btn-primary" disabled={props.busy}>
                    { props.submit_label.clone() }
                </button>
                if form.is_dirty() {
                    <span class="dirty-dot" title="Незбережені зміни" />
                }
            </div>
        </form>
    }
}

fn build_current_location(
    form: &InventoryForm,
    link: &Scope<InventoryForm>,
    options: &FormOptions,
) -> Html {
    let draft = &form.form.draft;
    let manual = form.form.manual_entry;
    let lat = draft.latitude.clone();
    let lng = draft.longitude.clone();

    let location_fields = if manual {
        html! {
            <>
                { text_input(link, draft, DraftField::CurrentRegion) }
                { text_input(link, draft, DraftField::CurrentDistrict) }
                { text_input(link, draft, DraftField::CurrentCommunity) }
                { text_input(link, draft, DraftField::CurrentSettlementType) }
                { text_input(link, draft, DraftField::CurrentSettlementName) }
            </>
        }
    } else {
        html! {
            <>
                { select_input(link, draft, DraftField::CurrentRegion, &options.regions) }
                { select_input(link, draft, DraftField::CurrentDistrict, &options.districts) }
                { select_input(link, draft, DraftField::CurrentCommunity, &options.communities) }
                { select_input(link, draft, DraftField::CurrentSettlementType, &options.settlement_types) }
                { select_input(link, draft, DraftField::CurrentSettlementName, &options.settlements) }
            </>
        }
    };

    html! {
        <fieldset class="form-section">
            <legend>{"Сучасне розташування"}</legend>
            <label class="checkbox">
                <input
                    type="checkbox"
                    checked={manual}
                    onchange={link.callback(|e: Event| {
                        Msg::ManualEntry(e.target_unchecked_into::<HtmlInputElement>().checked())
                    })}
                />
                {"Населеного пункту немає у списку, ввести вручну"}
            </label>
            { location_fields }
            <div class="coordinates">
                { text_input(link, draft, DraftField::Latitude) }
                { text_input(link, draft, DraftField::Longitude) }
            </div>
            <MapSelector
                latitude={AttrValue::from(lat)}
                longitude={AttrValue::from(lng)}
                on_select={link.callback(|(lat, lng): (f64, f64)| Msg::MapClicked(lat, lng))}
            />
        </fieldset>
    }
}

fn build_historical_location(draft: &RecordDraft, link: &Scope<InventoryForm>) -> Html {
    html! {
        <fieldset class="form-section">
            <legend>{"Історичне розташування"}</legend>
            { text_input(link, draft, DraftField::OldProvince) }
            { text_input(link, draft, DraftField::OldDistrict) }
            { text_input(link, draft, DraftField::OldCommunity) }
            { text_input(link, draft, DraftField::OldSettlementType) }
            { text_input(link, draft, DraftField::OldSettlementName) }
        </fieldset>
    }
}

fn build_archive_section(draft: &RecordDraft, link: &Scope<InventoryForm>) -> Html {
    let ukrainian = draft.is_ukrainian_archive == ArchiveHolding::Ukrainian;
    let holding_options = [
        (ArchiveHolding::Ukrainian, "Так"),
        (ArchiveHolding::Foreign, "Ні"),
    ];

    html! {
        <fieldset class="form-section">
            <legend>{"Архівне розташування"}</legend>
            <label>
                { DraftField::IsUkrainianArchive.label() }
                <select
                    onchange={link.callback(|e: Event| {
                        Msg::Field(
                            DraftField::IsUkrainianArchive,
                            e.target_unchecked_into::<HtmlSelectElement>().value(),
                        )
                    })}
                >
                    { for holding_options.iter().map(|(holding, label)| html! {
                        <option
                            value={holding.as_str()}
                            selected={*holding == draft.is_ukrainian_archive}
                        >
                            { *label }
                        </option>
                    }) }
                </select>
            </label>
            if ukrainian {
                <>
                    { text_input(link, draft, DraftField::Archive) }
                    { text_input(link, draft, DraftField::Fonds) }
                    { text_input(link, draft, DraftField::Series) }
                    { text_input(link, draft, DraftField::Record) }
                    <label>
                        { DraftField::CaseSignature.label() }
                        <input type="text" readonly=true value={draft.case_signature.clone()} />
                    </label>
                </>
            } else {
                { text_input(link, draft, DraftField::CaseSignature) }
            }
            { text_input(link, draft, DraftField::AdditionalCaseSignature) }
        </fieldset>
    }
}

fn build_case_section(draft: &RecordDraft, link: &Scope<InventoryForm>) -> Html {
    let marks = [MarkType::Place, MarkType::Region];
    html! {
        <fieldset class="form-section">
            <legend>{"Опис справи"}</legend>
            { text_input(link, draft, DraftField::CaseTitle) }
            { text_input(link, draft, DraftField::CaseDate) }
            { text_input(link, draft, DraftField::PagesCount) }
            { text_input(link, draft, DraftField::InventoryYear) }
            { text_input(link, draft, DraftField::InventoryStartPage) }
            <label>
                { DraftField::MarkType.label() }
                <select
                    onchange={link.callback(|e: Event| {
                        Msg::Field(
                            DraftField::MarkType,
                            e.target_unchecked_into::<HtmlSelectElement>().value(),
                        )
                    })}
                >
                    <option value="" selected={draft.mark_type.is_empty()}>{"—"}</option>
                    { for marks.iter().map(|mark| {
                        let code = mark.code().to_string();
                        html! {
                            <option value={code.clone()} selected={draft.mark_type == code}>
                                { mark.label() }
                            </option>
                        }
                    }) }
                </select>
            </label>
            { text_input(link, draft, DraftField::ScansUrl) }
            <label>
                { DraftField::Notes.label() }
                <textarea
                    value={draft.notes.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::Field(
                            DraftField::Notes,
                            e.target_unchecked_into::<HtmlTextAreaElement>().value(),
                        )
                    })}
                />
            </label>
            { text_input(link, draft, DraftField::Email) }
        </fieldset>
    }
}

fn text_input(link: &Scope<InventoryForm>, draft: &RecordDraft, field: DraftField) -> Html {
    html! {
        <label>
            { field.label() }
            <input
                type="text"
                name={field.name()}
                value={draft.get(field).to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    Msg::Field(field, e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
        </label>
    }
}

/// A select over `options`; disabled when there is nothing to choose from.
fn select_input(
    link: &Scope<InventoryForm>,
    draft: &RecordDraft,
    field: DraftField,
    options: &[String],
) -> Html {
    let current = draft.get(field).to_string();
    html! {
        <label>
            { field.label() }
            <select
                name={field.name()}
                disabled={options.is_empty()}
                onchange={link.callback(move |e: Event| {
                    Msg::Field(field, e.target_unchecked_into::<HtmlSelectElement>().value())
                })}
            >
                <option value="" selected={current.is_empty()}>{"Оберіть…"}</option>
                { for options.iter().map(|option| html! {
                    <option value={option.clone()} selected={*option == current}>
                        { option.clone() }
                    </option>
                }) }
            </select>
        </label>
    }
}
