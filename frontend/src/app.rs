//! Application shell: top navigation, page selection from the URL path and
//! the lookup index shared by every form.

use std::rc::Rc;

use common::model::report::ReportTemplate;
use gloo_console::error;
use wasm_bindgen::prelude::*;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::inventory_form::SharedLookup;
use crate::components::report_form::ReportForm;
use crate::helpers::{current_path, navigate, show_toast};
use crate::pages::add_inventory::AddInventoryPage;
use crate::pages::auth::AuthPage;
use crate::pages::map::MapPage;
use crate::pages::moderation::ModerationPage;
use crate::pages::record::RecordPage;
use crate::pages::registry::RegistryPage;
use crate::pages::stats::StatsPage;

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Registry,
    Record(String),
    AddInventory,
    Moderation,
    Map,
    Stats,
    Feedback,
    SignIn,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        if let Some(id) = path.strip_prefix("/record/") {
            if !id.is_empty() {
                return Page::Record(id.to_string());
            }
        }
        match path {
            "/add_inventory" => Page::AddInventory,
            "/admin_approve" => Page::Moderation,
            "/map" => Page::Map,
            "/stats" => Page::Stats,
            "/feedback" => Page::Feedback,
            "/auth" => Page::SignIn,
            _ => Page::Registry,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::Registry => "/".to_string(),
            Page::Record(id) => common::model::record::record_url(id),
            Page::AddInventory => "/add_inventory".to_string(),
            Page::Moderation => "/admin_approve".to_string(),
            Page::Map => "/map".to_string(),
            Page::Stats => "/stats".to_string(),
            Page::Feedback => "/feedback".to_string(),
            Page::SignIn => "/auth".to_string(),
        }
    }
}

pub enum Msg {
    Navigate(Page),
    PathChanged,
    LookupLoaded(Result<common::model::lookup::LookupIndex, String>),
}

pub struct App {
    page: Page,
    lookup: SharedLookup,
    _popstate: Option<Closure<dyn FnMut()>>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::LookupLoaded(api::fetch_lookup().await));
        });

        let link = ctx.link().clone();
        let popstate = Closure::<dyn FnMut()>::new(move || link.send_message(Msg::PathChanged));
        let registered = web_sys::window()
            .map(|w| {
                w.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
                    .is_ok()
            })
            .unwrap_or(false);

        Self {
            page: Page::from_path(&current_path()),
            lookup: SharedLookup::default(),
            _popstate: registered.then_some(popstate),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                navigate(&page.path());
                self.page = page;
                true
            }
            Msg::PathChanged => {
                self.page = Page::from_path(&current_path());
                true
            }
            Msg::LookupLoaded(Ok(index)) => {
                self.lookup = SharedLookup(Rc::new(index));
                true
            }
            Msg::LookupLoaded(Err(e)) => {
                error!("Failed to load lookup index", e);
                show_toast("Не вдалося завантажити перелік населених пунктів. Скористайтеся ручним введенням.");
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_navigate = ctx.link().callback(Msg::Navigate);
        html! {
            <div class="app">
                { self.build_nav(ctx) }
                <main class="page">
                    { self.build_page(on_navigate) }
                </main>
            </div>
        }
    }
}

impl App {
    fn build_nav(&self, ctx: &Context<Self>) -> Html {
        let items = [
            (Page::Registry, "Реєстр інвентарів"),
            (Page::Map, "Карта"),
            (Page::AddInventory, "Додати інвентар"),
            (Page::Stats, "Статистика"),
            (Page::Moderation, "Модерація"),
            (Page::Feedback, "Зворотний зв'язок"),
            (Page::SignIn, "Вхід"),
        ];
        html! {
            <nav class="top-nav">
                <span class="brand">{"Inventarium"}</span>
                { for items.into_iter().map(|(page, label)| {
                    let active = page == self.page;
                    let target = page.clone();
                    html! {
                        <button
                            class={classes!("nav-btn", active.then_some("active"))}
                            onclick={ctx.link().callback(move |_| Msg::Navigate(target.clone()))}
                        >
                            { label }
                        </button>
                    }
                }) }
            </nav>
        }
    }

    fn build_page(&self, on_navigate: Callback<Page>) -> Html {
        match &self.page {
            Page::Registry => html! { <RegistryPage {on_navigate} /> },
            Page::Record(id) => html! {
                <RecordPage id={AttrValue::from(id.clone())} {on_navigate} />
            },
            Page::AddInventory => html! { <AddInventoryPage lookup={self.lookup.clone()} /> },
            Page::Moderation => html! { <ModerationPage lookup={self.lookup.clone()} /> },
            Page::Map => html! { <MapPage /> },
            Page::Stats => html! { <StatsPage /> },
            Page::Feedback => html! {
                <ReportForm template={ReportTemplate::Feedback} url={AttrValue::from("/feedback")} />
            },
            Page::SignIn => html! { <AuthPage /> },
        }
    }
}
