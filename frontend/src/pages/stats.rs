//! Registry statistics and the signed-in contributor's standing.

use common::requests::StatsResponse;
use num_format::{Locale, ToFormattedString};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::show_toast;

pub enum Msg {
    Loaded(Result<StatsResponse, String>),
}

#[derive(Default)]
pub struct StatsPage {
    stats: Option<StatsResponse>,
}

impl Component for StatsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_stats().await));
        });
        Self::default()
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(stats)) => {
                self.stats = Some(stats);
                true
            }
            Msg::Loaded(Err(e)) => {
                show_toast(&format!("Помилка завантаження статистики: {}", e));
                false
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(stats) = &self.stats else {
            return html! { <section class="stats-page"><p>{"Завантаження…"}</p></section> };
        };
        html! {
            <section class="stats-page">
                <h1>{"Статистика"}</h1>
                <p class="total">
                    {"Інвентарів у реєстрі: "}
                    <strong>{ stats.total_approved.to_formatted_string(&Locale::uk) }</strong>
                </p>
                if let Some(user) = &stats.user {
                    <div class="user-stats">
                        <h2>{ user.rank.title() }</h2>
                        <p>{ format!("Підтверджено ваших інвентарів: {}", user.approved.to_formatted_string(&Locale::uk)) }</p>
                        <p>{ format!("Очікують перевірки: {}", user.pending.to_formatted_string(&Locale::uk)) }</p>
                    </div>
                } else {
                    <p>{"Увійдіть, щоб побачити свій внесок."}</p>
                }
            </section>
        }
    }
}
