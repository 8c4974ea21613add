//! Moderation walker: one pending record at a time, oldest first.
//!
//! The queue is fetched once when the page opens. Accept sends the edited
//! draft; reject asks for confirmation first. After either succeeds the record
//! leaves the local queue and the walker stays on the same position, or the
//! new last one. A failed request leaves both the server and the queue as
//! they were.

use common::model::draft::RecordDraft;
use common::model::record::PendingRecord;
use common::moderation::{ModerationQueue, QueueView};
use common::requests::AcceptOutcome;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, AccessError};
use crate::components::inventory_form::{InventoryForm, SharedLookup};
use crate::helpers::{confirm, show_toast};

const ALL_DONE: &str = "🎉 Усі інвентарі оброблено! Записів більше не залишилось.";

#[derive(Properties, PartialEq, Clone)]
pub struct ModerationProps {
    pub lookup: SharedLookup,
}

pub enum Msg {
    Loaded(Result<Vec<PendingRecord>, AccessError>),
    Previous,
    Next,
    Accept(RecordDraft),
    Accepted(String, Result<AcceptOutcome, String>),
    Reject,
    Rejected(String, Result<(), String>),
}

enum Access {
    Loading,
    Denied(AccessError),
    Granted,
}

pub struct ModerationPage {
    access: Access,
    queue: ModerationQueue,
    busy: bool,
}

impl ModerationPage {
    fn removed(&mut self, id: &str, message: &str) {
        self.queue.remove(id);
        show_toast(if self.queue.is_empty() { ALL_DONE } else { message });
    }
}

impl Component for ModerationPage {
    type Message = Msg;
    type Properties = ModerationProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_queue().await));
        });
        Self {
            access: Access::Loading,
            queue: ModerationQueue::default(),
            busy: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(records)) => {
                self.access = Access::Granted;
                self.queue = ModerationQueue::new(records);
            }
            Msg::Loaded(Err(e)) => {
                if let AccessError::Failed(reason) = &e {
                    show_toast(&format!("Помилка завантаження: {}", reason));
                }
                self.access = Access::Denied(e);
            }
            Msg::Previous => return self.queue.previous(),
            Msg::Next => return self.queue.next(),
            Msg::Accept(draft) => {
                let Some(id) = self.queue.current().map(|r| r.id.clone()) else {
                    return false;
                };
                self.busy = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::accept_record(&id, &draft).await;
                    link.send_message(Msg::Accepted(id, result));
                });
            }
            Msg::Accepted(id, result) => {
                self.busy = false;
                match result {
                    Ok(AcceptOutcome::Approved { .. }) => {
                        self.removed(&id, "✅ Інвентар підтверджено і збережено")
                    }
                    Ok(AcceptOutcome::DuplicateOfApproved { .. }) => show_toast(
                        "❗ Такий інвентар уже існує. Спробуйте пошукати його в реєстрі інвентарів",
                    ),
                    Err(e) => show_toast(&format!("❌ Помилка при додаванні до бази: {}", e)),
                }
            }
            Msg::Reject => {
                let Some(id) = self.queue.current().map(|r| r.id.clone()) else {
                    return false;
                };
                if !confirm("Ви впевнені, що хочете відхилити цей інвентар? Це призведе до його видалення.") {
                    return false;
                }
                self.busy = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::reject_record(&id).await;
                    link.send_message(Msg::Rejected(id, result));
                });
            }
            Msg::Rejected(id, result) => {
                self.busy = false;
                match result {
                    Ok(()) => self.removed(&id, "❌ Запис відхилено та видалено"),
                    Err(e) => show_toast(&format!("❌ Помилка при відхиленні: {}", e)),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let body = match &self.access {
            Access::Loading => html! { <p>{"Завантаження…"}</p> },
            Access::Denied(AccessError::NotSignedIn) => {
                html! { <p class="denied">{"Увійдіть на сторінці «Вхід», щоб переглянути цю сторінку."}</p> }
            }
            Access::Denied(AccessError::NoAccess) => {
                html! { <p class="denied">{"У вас немає доступу до цієї сторінки."}</p> }
            }
            Access::Denied(AccessError::Failed(_)) => {
                html! { <p class="denied">{"Не вдалося завантажити записи."}</p> }
            }
            Access::Granted => match self.queue.view() {
                QueueView::Empty => html! { <p>{"Немає записів для перевірки."}</p> },
                QueueView::Record { position, total, record } => html! {
                    <>
                        <div class="walker">
                            <button
                                onclick={link.callback(|_| Msg::Previous)}
                                disabled={!self.queue.has_previous() || self.busy}
                            >
                                {"← Попередній"}
                            </button>
                            <span>{ format!("Запис {} з {}", position + 1, total) }</span>
                            <button
                                onclick={link.callback(|_| Msg::Next)}
                                disabled={!self.queue.has_next() || self.busy}
                            >
                                {"Наступний →"}
                            </button>
                        </div>
                        <InventoryForm
                            lookup={ctx.props().lookup.clone()}
                            initial={RecordDraft::from_pending(record)}
                            record_key={AttrValue::from(record.id.clone())}
                            submit_label={AttrValue::from("Підтвердити")}
                            validate={false}
                            busy={self.busy}
                            on_submit={link.callback(Msg::Accept)}
                        />
                        <button
                            class="btn-danger"
                            onclick={link.callback(|_| Msg::Reject)}
                            disabled={self.busy}
                        >
                            {"Відхилити"}
                        </button>
                    </>
                },
            },
        };
        html! {
            <section class="moderation">
                <h1>{"Перевірка інвентарів"}</h1>
                { body }
            </section>
        }
    }
}
