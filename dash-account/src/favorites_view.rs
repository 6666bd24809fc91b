//! Favorites section: houses, cities and reports, each independently
//! loaded and deletable.

use dioxus::prelude::*;
use futures::join;

use rem_api::endpoints::favorites;
use rem_api::models::{FavoriteCity, FavoriteHouse, FavoriteReport};
use rem_chart_ui::components::{ChartHeader, ErrorDisplay, LoadingSpinner};
use rem_chart_ui::panel::PanelState;
use rem_chart_ui::state::AppState;
use rem_data::format::format_number;

use crate::Ctx;

const FAVORITES_PAGE_SIZE: u32 = 20;

#[component]
pub fn FavoritesSection(section: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let state = use_context::<AppState>();
    let mut houses: Signal<PanelState<Vec<FavoriteHouse>>> = use_signal(|| PanelState::Loading);
    let mut cities: Signal<PanelState<Vec<FavoriteCity>>> = use_signal(|| PanelState::Loading);
    let mut reports: Signal<PanelState<Vec<FavoriteReport>>> = use_signal(|| PanelState::Loading);
    let mut loaded = use_signal(|| false);

    let load_ctx = ctx.clone();
    use_effect(move || {
        if section() != "favorites" || *loaded.peek() {
            return;
        }
        loaded.set(true);
        let client = load_ctx.client.clone();
        spawn(async move {
            let (houses_result, cities_result, reports_result) = join!(
                favorites::houses(&client, 1, FAVORITES_PAGE_SIZE),
                favorites::cities(&client),
                favorites::reports(&client)
            );
            match houses_result {
                Ok(list) => houses.set(PanelState::Ready(list.items)),
                Err(e) => houses.set(PanelState::Failed(e.user_message())),
            }
            match cities_result {
                Ok(list) => cities.set(PanelState::Ready(list.items)),
                Err(e) => cities.set(PanelState::Failed(e.user_message())),
            }
            match reports_result {
                Ok(list) => reports.set(PanelState::Ready(list.items)),
                Err(e) => reports.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    let house_ctx = ctx.clone();
    let on_remove_house = move |favorite_id: i64| {
        let client = house_ctx.client.clone();
        spawn(async move {
            match favorites::remove_house(&client, favorite_id).await {
                Ok(()) => {
                    if let PanelState::Ready(items) = &mut *houses.write() {
                        items.retain(|h| h.favorite_id != favorite_id);
                    }
                    state.toast_success("已取消收藏");
                }
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    let city_ctx = ctx.clone();
    let on_remove_city = move |favorite_id: i64| {
        let client = city_ctx.client.clone();
        spawn(async move {
            match favorites::remove_city(&client, favorite_id).await {
                Ok(()) => {
                    if let PanelState::Ready(items) = &mut *cities.write() {
                        items.retain(|c| c.favorite_id != favorite_id);
                    }
                    state.toast_success("已取消收藏");
                }
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    let report_ctx = ctx.clone();
    let on_remove_report = move |favorite_id: i64| {
        let client = report_ctx.client.clone();
        spawn(async move {
            match favorites::remove_report(&client, favorite_id).await {
                Ok(()) => {
                    if let PanelState::Ready(items) = &mut *reports.write() {
                        items.retain(|r| r.favorite_id != favorite_id);
                    }
                    state.toast_success("已取消收藏");
                }
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    rsx! {
        div {
            ChartHeader { title: "收藏的房源".to_string() }
            {match &*houses.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(items) => {
                    if items.is_empty() {
                        rsx! { div { style: "color: #9ca3af; padding: 12px;", "暂无收藏房源" } }
                    } else {
                        rsx! {
                            div {
                                for house in items.iter() {
                                    {
                                        let id = house.favorite_id;
                                        let title = format!(
                                            "{} · {}",
                                            house.district.as_deref().unwrap_or("北京"),
                                            house.community.as_deref()
                                                .or(house.layout.as_deref())
                                                .unwrap_or("-"),
                                        );
                                        let price = house
                                            .total_price
                                            .map(|p| format!("{p:.0}万"))
                                            .unwrap_or_else(|| "-".to_string());
                                        let on_remove = on_remove_house.clone();
                                        rsx! {
                                            div {
                                                key: "{id}",
                                                style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 4px; border-bottom: 1px solid #f3f4f6;",
                                                span { "{title}" }
                                                span {
                                                    style: "display: flex; gap: 10px; align-items: center;",
                                                    span { style: "color: #dc2626;", "{price}" }
                                                    button { onclick: move |_| on_remove(id), "删除" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }}

            div { style: "margin-top: 24px;" }
            ChartHeader { title: "关注的城市".to_string() }
            {match &*cities.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(items) => {
                    if items.is_empty() {
                        rsx! { div { style: "color: #9ca3af; padding: 12px;", "暂无关注城市" } }
                    } else {
                        rsx! {
                            div {
                                for city in items.iter() {
                                    {
                                        let id = city.favorite_id;
                                        let province = city.province_name.clone().unwrap_or_default();
                                        let price = city
                                            .city_avg_price
                                            .map(|p| format!("{} 元/㎡", format_number(p)))
                                            .unwrap_or_else(|| "-".to_string());
                                        let on_remove = on_remove_city.clone();
                                        rsx! {
                                            div {
                                                key: "{id}",
                                                style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 4px; border-bottom: 1px solid #f3f4f6;",
                                                span {
                                                    "{city.city_name} "
                                                    span { style: "color: #9ca3af; font-size: 12px;", "{province}" }
                                                }
                                                span {
                                                    style: "display: flex; gap: 10px; align-items: center;",
                                                    span { style: "color: #2563eb;", "{price}" }
                                                    button { onclick: move |_| on_remove(id), "删除" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }}

            div { style: "margin-top: 24px;" }
            ChartHeader { title: "收藏的报告".to_string() }
            {match &*reports.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(items) => {
                    if items.is_empty() {
                        rsx! { div { style: "color: #9ca3af; padding: 12px;", "暂无收藏报告" } }
                    } else {
                        rsx! {
                            div {
                                for report in items.iter() {
                                    {
                                        let id = report.favorite_id;
                                        let title = report.title.clone().unwrap_or_else(|| format!("报告 #{}", report.report_id));
                                        let on_remove = on_remove_report.clone();
                                        rsx! {
                                            div {
                                                key: "{id}",
                                                style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 4px; border-bottom: 1px solid #f3f4f6;",
                                                span { "{title}" }
                                                button { onclick: move |_| on_remove(id), "删除" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }}
        }
    }
}
