//! Sign-in, registration and sign-out.
//!
//! The session itself lives in an `HttpOnly` cookie, so this page only asks
//! the backend who is signed in.

use common::requests::{Credentials, SessionInfo};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::show_toast;

pub enum Msg {
    Loaded(Result<Option<SessionInfo>, String>),
    UserId(String),
    Password(String),
    SignIn,
    SignUp,
    SignedIn(Result<SessionInfo, String>),
    SignOut,
    SignedOut(Result<(), String>),
}

enum State {
    Loading,
    SignedOut,
    SignedIn(SessionInfo),
}

pub struct AuthPage {
    state: State,
    credentials: Credentials,
    busy: bool,
}

impl AuthPage {
    fn send(&mut self, ctx: &Context<Self>, register: bool) {
        if register {
            if let Err(reason) = self.credentials.check_new_account() {
                show_toast(reason);
                return;
            }
        }
        self.busy = true;
        let credentials = self.credentials.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = if register {
                api::sign_up(&credentials).await
            } else {
                api::sign_in(&credentials).await
            };
            link.send_message(Msg::SignedIn(result));
        });
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="auth-box">
                <p>{"Увійдіть, щоб додавати інвентарі від свого імені та бачити свою статистику."}</p>
                <label>
                    {"Ім'я користувача"}
                    <input
                        type="text"
                        autocomplete="username"
                        value={self.credentials.user_id.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::UserId(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
                <label>
                    {"Пароль"}
                    <input
                        type="password"
                        autocomplete="current-password"
                        value={self.credentials.password.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::Password(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
                <div class="actions">
                    <button onclick={link.callback(|_| Msg::SignIn)} disabled={self.busy}>
                        {"Увійти"}
                    </button>
                    <button onclick={link.callback(|_| Msg::SignUp)} disabled={self.busy}>
                        {"Зареєструватися"}
                    </button>
                </div>
            </div>
        }
    }
}

impl Component for AuthPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_session().await));
        });
        Self {
            state: State::Loading,
            credentials: Credentials::default(),
            busy: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(Some(session))) => self.state = State::SignedIn(session),
            Msg::Loaded(Ok(None)) => self.state = State::SignedOut,
            Msg::Loaded(Err(e)) => {
                show_toast(&format!("Помилка завантаження: {}", e));
                self.state = State::SignedOut;
            }
            Msg::UserId(value) => self.credentials.user_id = value,
            Msg::Password(value) => self.credentials.password = value,
            Msg::SignIn => self.send(ctx, false),
            Msg::SignUp => self.send(ctx, true),
            Msg::SignedIn(result) => {
                self.busy = false;
                match result {
                    Ok(session) => {
                        self.credentials = Credentials::default();
                        self.state = State::SignedIn(session);
                    }
                    Err(e) => show_toast(&e),
                }
            }
            Msg::SignOut => {
                self.busy = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::SignedOut(api::sign_out().await));
                });
            }
            Msg::SignedOut(result) => {
                self.busy = false;
                match result {
                    Ok(()) => self.state = State::SignedOut,
                    Err(e) => show_toast(&format!("Не вдалося вийти: {}", e)),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match &self.state {
            State::Loading => html! { <p>{"Завантаження…"}</p> },
            State::SignedIn(session) => html! {
                <div class="auth-box">
                    <p>{"Ви увійшли як: "}<strong>{ session.user_id.clone() }</strong></p>
                    if session.is_admin {
                        <p>{"Вам доступна модерація записів."}</p>
                    }
                    <button onclick={ctx.link().callback(|_| Msg::SignOut)} disabled={self.busy}>
                        {"Вийти"}
                    </button>
                </div>
            },
            State::SignedOut => self.view_form(ctx),
        };
        html! {
            <section class="auth-page">
                <h1>{"Вхід до системи"}</h1>
                { body }
            </section>
        }
    }
}
