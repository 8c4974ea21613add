//! Form for reporting a mistake in a record or sending general feedback.
//! Both go through `POST /api/reports`; only the template differs.

use common::model::report::{ReportRequest, ReportTemplate};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct ReportFormProps {
    pub template: ReportTemplate,
    /// Page the report is about.
    pub url: AttrValue,
    #[prop_or_default]
    pub record_id: Option<AttrValue>,
}

pub enum Msg {
    Message(String),
    Name(String),
    Contacts(String),
    Send,
    Sent(Result<(), String>),
}

#[derive(Default)]
pub struct ReportForm {
    message: String,
    name: String,
    contacts: String,
    sending: bool,
}

impl Component for ReportForm {
    type Message = Msg;
    type Properties = ReportFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Message(value) => self.message = value,
            Msg::Name(value) => self.name = value,
            Msg::Contacts(value) => self.contacts = value,
            Msg::Send => {
                let props = ctx.props();
                let report = ReportRequest {
                    template: props.template,
                    message: self.message.clone(),
                    name: self.name.clone(),
                    contacts: self.contacts.clone(),
                    url: props.url.to_string(),
                    record_id: props.record_id.as_ref().map(|id| id.to_string()),
                };
                if !report.is_complete() {
                    show_toast("Будь ласка, заповніть усі поля.");
                    return false;
                }
                self.sending = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Sent(api::send_report(&report).await));
                });
            }
            Msg::Sent(Ok(())) => {
                show_toast("Дякуємо! Повідомлення надіслано.");
                *self = Self::default();
            }
            Msg::Sent(Err(e)) => {
                show_toast(&format!("Помилка надсилання: {}", e));
                self.sending = false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let title = match ctx.props().template {
            ReportTemplate::RecordError => "Повідомити про помилку",
            ReportTemplate::Feedback => "Зворотний зв'язок",
        };
        html! {
            <form
                class="report-form"
                onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Send
                })}
            >
                <h3>{ title }</h3>
                <label>
                    {"Повідомлення"}
                    <textarea
                        value={self.message.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::Message(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                        })}
                    />
                </label>
                <label>
                    {"Ім'я"}
                    <input
                        type="text"
                        value={self.name.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::Name(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
                <label>
                    {"Контакти"}
                    <input
                        type="text"
                        value={self.contacts.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::Contacts(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
                <button type="submit" class="btn-primary" disabled={self.sending}>
                    {"Надіслати"}
                </button>
            </form>
        }
    }
}
