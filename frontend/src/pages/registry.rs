//! Public registry: paged list of approved records with text and year filters.

use common::model::record::ApprovedRecord;
use common::requests::{RecordsPage, RecordsQuery};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::Page;
use crate::helpers::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct RegistryProps {
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    Search(String),
    YearFrom(String),
    YearTo(String),
    Apply,
    GoToPage(u32),
    Loaded(Result<RecordsPage, String>),
}

pub struct RegistryPage {
    query: RecordsQuery,
    result: Option<RecordsPage>,
    loading: bool,
}

impl RegistryPage {
    fn load(&mut self, ctx: &Context<Self>) {
        self.loading = true;
        let query = self.query.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_records(&query).await));
        });
    }

    fn record_row(record: &ApprovedRecord, on_navigate: &Callback<Page>) -> Html {
        let fields = &record.fields;
        let target = Page::Record(record.id.clone());
        let onclick = on_navigate.reform(move |_| target.clone());
        html! {
            <tr class="record-row" {onclick}>
                <td>{ fields.current_settlement_name.clone().unwrap_or_default() }</td>
                <td>{ fields.current_location() }</td>
                <td>{ fields.old_settlement_name.clone().unwrap_or_default() }</td>
                <td>{ fields.case_signature.clone().unwrap_or_default() }</td>
                <td>{ fields.case_title.clone().unwrap_or_default() }</td>
                <td>{ fields.inventory_year.map(|y| y.to_string()).unwrap_or_default() }</td>
            </tr>
        }
    }
}

impl Component for RegistryPage {
    type Message = Msg;
    type Properties = RegistryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut page = Self {
            query: RecordsQuery {
                page: 1,
                ..Default::default()
            },
            result: None,
            loading: false,
        };
        page.load(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Search(value) => self.query.search = value,
            Msg::YearFrom(value) => self.query.inventory_year_from = value,
            Msg::YearTo(value) => self.query.inventory_year_to = value,
            Msg::Apply => {
                self.query.page = 1;
                self.load(ctx);
            }
            Msg::GoToPage(page) => {
                self.query.page = page.max(1);
                self.load(ctx);
            }
            Msg::Loaded(Ok(page)) => {
                self.loading = false;
                self.result = Some(page);
            }
            Msg::Loaded(Err(e)) => {
                self.loading = false;
                show_toast(&format!("Помилка завантаження: {}", e));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |make: fn(String) -> Msg| {
            link.callback(move |e: InputEvent| make(e.target_unchecked_into::<HtmlInputElement>().value()))
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Apply
        });
        let page = self.query.page;

        let body = match &self.result {
            None => html! { <p>{"Завантаження…"}</p> },
            Some(result) if result.records.is_empty() => {
                html! { <p>{"Записів не знайдено."}</p> }
            }
            Some(result) => html! {
                <table class="registry">
                    <thead>
                        <tr>
                            <th>{"Населений пункт"}</th>
                            <th>{"Розташування"}</th>
                            <th>{"Історична назва"}</th>
                            <th>{"Шифр справи"}</th>
                            <th>{"Назва справи"}</th>
                            <th>{"Рік"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for result.records.iter().map(|r| Self::record_row(r, &ctx.props().on_navigate)) }
                    </tbody>
                </table>
            },
        };
        let has_next = self.result.as_ref().map(RecordsPage::has_next).unwrap_or(false);

        html! {
            <section class="registry-page">
                <h1>{"Реєстр інвентарів"}</h1>
                <form class="filters" {onsubmit}>
                    <input
                        type="search"
                        placeholder="Пошук за назвою населеного пункту або справи"
                        value={self.query.search.clone()}
                        oninput={input(Msg::Search)}
                    />
                    <input
                        type="number"
                        placeholder="Рік від"
                        value={self.query.inventory_year_from.clone()}
                        oninput={input(Msg::YearFrom)}
                    />
                    <input
                        type="number"
                        placeholder="Рік до"
                        value={self.query.inventory_year_to.clone()}
                        oninput={input(Msg::YearTo)}
                    />
                    <button type="submit" disabled={self.loading}>{"Шукати"}</button>
                </form>
                { body }
                <div class="pagination">
                    <button
                        onclick={link.callback(move |_| Msg::GoToPage(page - 1))}
                        disabled={page <= 1 || self.loading}
                    >
                        {"← Назад"}
                    </button>
                    <span>{ format!("Сторінка {}", page) }</span>
                    <button
                        onclick={link.callback(move |_| Msg::GoToPage(page + 1))}
                        disabled={!has_next || self.loading}
                    >
                        {"Далі →"}
                    </button>
                </div>
            </section>
        }
    }
}
