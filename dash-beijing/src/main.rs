//! Beijing drill-down page.
//!
//! One overview row plus five tabs. The district tab loads eagerly with
//! the page; the others (feature analysis, distribution charts, listings,
//! AI assistant) load lazily the first time they are opened. All tab
//! bodies stay mounted and are hidden with CSS so their state and chart
//! instances survive tab switches; a per-tab loaded flag keeps each
//! dataset to one fetch per page lifetime unless its parameter changes.

mod ai;
mod analysis;
mod charts_tab;
mod district;
mod houses;

use std::rc::Rc;

use dioxus::prelude::*;

use rem_api::endpoints::metro;
use rem_api::models::MetroOverview;
use rem_api::transport::FetchTransport;
use rem_api::ApiClient;
use rem_chart_ui::components::{ErrorDisplay, StatCard, TabBar, ToastStack};
use rem_chart_ui::js_bridge;
use rem_chart_ui::panel::PanelState;
use rem_chart_ui::state::AppState;
use rem_data::format::{format_large_number, format_number};
use rem_session::SessionGuard;

const API_BASE: &str = "/api";

pub(crate) type Client = Rc<ApiClient<FetchTransport>>;

/// Client + guard bundle shared with every tab via context.
#[derive(Clone)]
pub(crate) struct Ctx {
    pub client: Client,
    pub guard: SessionGuard,
}

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("beijing-root"))
        .launch(App);
}

/// Style for a tab body: kept in the DOM, toggled via display.
pub(crate) fn tab_style(active: bool) -> &'static str {
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

    let authed = use_hook(|| guard.require_auth());
    if !authed {
        return rsx! {};
    }

    let mut overview: Signal<PanelState<MetroOverview>> = use_signal(|| PanelState::Loading);
    let active_tab = use_signal(|| "district".to_string());

    // One-time setup: user display, chart bridge, overview panel.
    let setup_ctx = ctx.clone();
    use_effect(move || {
        state.user.set(setup_ctx.guard.current_user());
        js_bridge::init_charts();

        let client = setup_ctx.client.clone();
        spawn(async move {
            match metro::overview(&client).await {
                Ok(data) => overview.set(PanelState::Ready(data)),
                Err(e) => overview.set(PanelState::Failed(e.user_message())),
            }
            state.loading.set(false);
        });
    });

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
        .unwrap_or_else(|| "用户".to_string());

    let tabs = vec![
        ("district".to_string(), "区域分析".to_string()),
        ("analysis".to_string(), "特征分析".to_string()),
        ("chart".to_string(), "分布图表".to_string()),
        ("list".to_string(), "房源列表".to_string()),
        ("ai".to_string(), "AI 助手".to_string()),
    ];
    let current = active_tab();

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            ToastStack {}

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h2 { style: "margin: 0;", "北京房产深度分析" }
                div {
                    style: "display: flex; gap: 12px; align-items: center;",
                    span { style: "color: #6b7280;", "{display_name}" }
                    button { onclick: on_logout, "退出登录" }
                }
            }

            OverviewRow { panel: overview }

            TabBar { tabs, active: active_tab }

            div { style: tab_style(current == "district"), district::DistrictTab { active_tab } }
            div { style: tab_style(current == "analysis"), analysis::AnalysisTab { active_tab } }
            div { style: tab_style(current == "chart"), charts_tab::ChartsTab { active_tab } }
            div { style: tab_style(current == "list"), houses::HousesTab { active_tab } }
            div { style: tab_style(current == "ai"), ai::AiTab { active_tab } }
        }
    }
}

#[component]
fn OverviewRow(panel: Signal<PanelState<MetroOverview>>) -> Element {
    match &*panel.read() {
        PanelState::Loading => rsx! {
            div { style: "padding: 24px; color: #666;", "概览加载中..." }
        },
        PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
        PanelState::Ready(data) => {
            let hot = data
                .hot_districts
                .first()
                .cloned()
                .unwrap_or_else(|| "--".to_string());
            rsx! {
                div {
                    style: "display: flex; gap: 12px; margin-bottom: 16px; flex-wrap: wrap;",
                    StatCard {
                        label: "平均单价".to_string(),
                        value: format!("{} 元/㎡", format_number(data.avg_price)),
                    }
                    StatCard {
                        label: "平均总价".to_string(),
                        value: format!("{} 万", format_number(data.avg_total_price)),
                    }
                    StatCard {
                        label: "在售房源".to_string(),
                        value: format_large_number(data.total_listings),
                        sub: "套".to_string(),
                    }
                    StatCard {
                        label: "热门区域".to_string(),
                        value: hot,
                    }
                }
            }
        }
    }
}
