//! Account page: the login/register forms plus everything behind them,
//! profile, password change, notification settings, favorites and system
//! info. This app doubles as the login target the other pages redirect
//! to, so it renders the auth forms instead of redirecting when no
//! session exists.

mod account;
mod auth_view;
mod favorites_view;

use std::rc::Rc;

use dioxus::prelude::*;

use rem_api::transport::FetchTransport;
use rem_api::ApiClient;
use rem_chart_ui::components::{TabBar, ToastStack};
use rem_chart_ui::state::AppState;
use rem_session::SessionGuard;

const API_BASE: &str = "/api";

pub(crate) type Client = Rc<ApiClient<FetchTransport>>;

#[derive(Clone)]
pub(crate) struct Ctx {
    pub client: Client,
    pub guard: SessionGuard,
}

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("account-root"))
        .launch(App);
}

fn section_style(active: bool) -> &'static str {
    if active {
        "display: block;"
    } else {
        "display: none;"
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let guard = use_hook(SessionGuard::browser);
    let ctx = use_context_provider(|| Ctx {
        client: Rc::new(
            ApiClient::new(FetchTransport::new(API_BASE)).with_auth(Rc::new(guard.clone())),
        ),
        guard: guard.clone(),
    });

    let section = use_signal(|| "profile".to_string());

    let restore_guard = guard.clone();
    use_effect(move || {
        state.user.set(restore_guard.current_user());
        state.loading.set(false);
    });

    let logged_in = state.user.read().is_some();

    let logout_ctx = ctx.clone();
    let on_logout = move |_| {
        let ctx = logout_ctx.clone();
        spawn(async move {
            ctx.guard.logout(&ctx.client).await;
        });
    };

    let display_name = state
        .user
        .read()
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    let tabs = vec![
        ("profile".to_string(), "个人资料".to_string()),
        ("favorites".to_string(), "我的收藏".to_string()),
        ("notifications".to_string(), "消息通知".to_string()),
        ("system".to_string(), "关于系统".to_string()),
    ];
    let current = section();

    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            ToastStack {}

            if !logged_in {
                auth_view::AuthView {}
            } else {
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                    h2 { style: "margin: 0;", "账户中心" }
                    div {
                        style: "display: flex; gap: 12px; align-items: center;",
                        span { style: "color: #6b7280;", "{display_name}" }
                        button { onclick: on_logout, "退出登录" }
                    }
                }

                TabBar { tabs, active: section }

                // Sections stay mounted (hidden via CSS) so each loads its
                // data once per page lifetime, not once per visit.
                div { style: section_style(current == "profile"), account::ProfileSection { section } }
                div { style: section_style(current == "favorites"), favorites_view::FavoritesSection { section } }
                div { style: section_style(current == "notifications"), account::NotificationsSection { section } }
                div { style: section_style(current == "system"), account::SystemSection { section } }
            }
        }
    }
}
