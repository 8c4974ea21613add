//! Detail page of one approved record.
//!
//! Besides the record itself it lists the other records of the same
//! settlement and offers a form to report a mistake.

use common::model::record::{record_url, ApprovedRecord, MarkType, RecordFields};
use common::model::report::ReportTemplate;
use common::requests::SettlementQuery;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::Page;
use crate::components::report_form::ReportForm;
use crate::helpers::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct RecordProps {
    pub id: AttrValue,
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    Loaded(Result<Option<ApprovedRecord>, String>),
    NeighboursLoaded(Result<Vec<ApprovedRecord>, String>),
}

enum Status {
    Loading,
    Missing,
    Failed,
    Ready(Box<ApprovedRecord>),
}

pub struct RecordPage {
    status: Status,
    neighbours: Vec<ApprovedRecord>,
}

fn settlement_query(fields: &RecordFields) -> SettlementQuery {
    SettlementQuery {
        current_region: fields.current_region.clone().unwrap_or_default(),
        current_district: fields.current_district.clone().unwrap_or_default(),
        current_community: fields.current_community.clone().unwrap_or_default(),
        current_settlement_name: fields.current_settlement_name.clone().unwrap_or_default(),
    }
}

fn detail_row(label: &'static str, value: Option<String>) -> Html {
    match value {
        Some(value) if !value.is_empty() => html! {
            <tr><th>{ label }</th><td>{ value }</td></tr>
        },
        _ => html! {},
    }
}

impl RecordPage {
    fn load(ctx: &Context<Self>) {
        let id = ctx.props().id.to_string();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_record(&id).await));
        });
    }

    fn view_record(&self, ctx: &Context<Self>, record: &ApprovedRecord) -> Html {
        let fields = &record.fields;
        let scans = fields.scans_url.clone().map(|url| {
            html! { <tr><th>{"Скани"}</th><td><a href={url.clone()} target="_blank">{ url }</a></td></tr> }
        });
        let neighbours = self.neighbours.iter().filter(|r| r.id != record.id).map(|r| {
            let target = Page::Record(r.id.clone());
            let onclick = ctx.props().on_navigate.reform(move |_| target.clone());
            html! {
                <li class="link" {onclick}>
                    { format!(
                        "{} {}",
                        r.fields.case_signature.clone().unwrap_or_default(),
                        r.fields.case_title.clone().unwrap_or_default()
                    ) }
                </li>
            }
        });

        html! {
            <>
                <h1>{ fields.case_title.clone().unwrap_or_else(|| "Інвентар".to_string()) }</h1>
                <p class="location">{ fields.current_location() }</p>
                if fields.mark() == Some(MarkType::Region) {
                    <p class="notice">
                        {"Позначка на карті вказує на регіон: справа може стосуватися сусідніх населених пунктів."}
                    </p>
                }
                <table class="record-detail">
                    { detail_row("Історичне розташування", Some(fields.historical_location())) }
                    { detail_row("Шифр справи", fields.case_signature.clone()) }
                    { detail_row("Додатковий шифр", fields.additional_case_signature.clone()) }
                    { detail_row("Дата справи", fields.case_date.clone()) }
                    { detail_row("Рік інвентаря", fields.inventory_year.map(|y| y.to_string())) }
                    { detail_row("Кількість сторінок", fields.pages_count.map(|p| p.to_string())) }
                    { detail_row("Сторінка початку інвентаря", fields.inventory_start_page.map(|p| p.to_string())) }
                    { detail_row("Тип позначки", fields.mark().map(|m| m.label().to_string())) }
                    { for scans }
                    { detail_row("Примітки", fields.notes.clone()) }
                </table>
                if self.neighbours.iter().any(|r| r.id != record.id) {
                    <>
                        <h2>{"Інші інвентарі цього населеного пункту"}</h2>
                        <ul class="neighbours">{ for neighbours }</ul>
                    </>
                }
                <h2>{"Повідомити про помилку"}</h2>
                <ReportForm
                    template={ReportTemplate::RecordError}
                    url={AttrValue::from(record_url(&record.id))}
                    record_id={Some(AttrValue::from(record.id.clone()))}
                />
            </>
        }
    }
}

impl Component for RecordPage {
    type Message = Msg;
    type Properties = RecordProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        Self {
            status: Status::Loading,
            neighbours: Vec::new(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().id != old_props.id {
            self.status = Status::Loading;
            self.neighbours.clear();
            Self::load(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(Some(record))) => {
                let query = settlement_query(&record.fields);
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::NeighboursLoaded(
                        api::fetch_settlement_records(&query).await,
                    ));
                });
                self.status = Status::Ready(Box::new(record));
            }
            Msg::Loaded(Ok(None)) => self.status = Status::Missing,
            Msg::Loaded(Err(e)) => {
                show_toast(&format!("Помилка завантаження: {}", e));
                self.status = Status::Failed;
            }
            Msg::NeighboursLoaded(Ok(records)) => self.neighbours = records,
            Msg::NeighboursLoaded(Err(e)) => {
                gloo_console::warn!(format!("Settlement records unavailable: {}", e));
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match &self.status {
            Status::Loading => html! { <p>{"Завантаження…"}</p> },
            Status::Missing => html! { <p>{"Запис не знайдено."}</p> },
            Status::Failed => html! { <p>{"Не вдалося завантажити запис."}</p> },
            Status::Ready(record) => self.view_record(ctx, record),
        };
        html! { <section class="record-page">{ body }</section> }
    }
}
