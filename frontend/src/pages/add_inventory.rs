//! Contribution page: the inventory form wired to `POST /api/records/submit`.
//!
//! A successful submission resets the form; a duplicate keeps the draft so
//! the contributor can correct it, and for a published duplicate shows a link
//! to the existing record.

use common::model::draft::RecordDraft;
use common::requests::{SubmitOutcome, SAVE_ERROR};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::inventory_form::{InventoryForm, SharedLookup};
use crate::helpers::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct AddInventoryProps {
    pub lookup: SharedLookup,
}

pub enum Msg {
    Submit(RecordDraft),
    Submitted(Result<SubmitOutcome, String>),
}

pub struct AddInventoryPage {
    busy: bool,
    /// Bumped after each accepted submission to reset the form.
    generation: u32,
    duplicate_url: Option<String>,
}

impl Component for AddInventoryPage {
    type Message = Msg;
    type Properties = AddInventoryProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            busy: false,
            generation: 0,
            duplicate_url: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Submit(draft) => {
                self.busy = true;
                self.duplicate_url = None;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Submitted(api::submit_record(&draft).await));
                });
            }
            Msg::Submitted(result) => {
                self.busy = false;
                match result {
                    Ok(outcome) => {
                        show_toast(outcome.message());
                        match outcome {
                            SubmitOutcome::Submitted { .. } => self.generation += 1,
                            SubmitOutcome::DuplicateOfApproved { url, .. } => {
                                self.duplicate_url = Some(url)
                            }
                            SubmitOutcome::DuplicateOfPending => {}
                        }
                    }
                    Err(e) if e == SAVE_ERROR => show_toast(&e),
                    Err(e) => show_toast(&format!("Помилка збереження: {}", e)),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <section class="add-inventory">
                <h1>{"Додати інвентар"}</h1>
                if let Some(url) = &self.duplicate_url {
                    <p class="notice">
                        {"Такий інвентар уже існує: "}
                        <a href={url.clone()}>{ url.clone() }</a>
                    </p>
                }
                <InventoryForm
                    lookup={ctx.props().lookup.clone()}
                    record_key={AttrValue::from(format!("new-{}", self.generation))}
                    submit_label={AttrValue::from("Надіслати на перевірку")}
                    busy={self.busy}
                    on_submit={ctx.link().callback(Msg::Submit)}
                />
            </section>
        }
    }
}
