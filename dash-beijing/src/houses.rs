//! Listings tab: filterable, paginated house list.
//!
//! Every filter search and page click replaces the list wholesale: there
//! is no appending and no client-side cache of earlier pages. Stale
//! responses (a slow page 2 arriving after page 3 was requested) are
//! dropped via the sequence ticket.

use dioxus::prelude::*;

use rem_api::endpoints::metro::{self, HouseFilters};
use rem_api::models::PagedHouseList;
use rem_chart_ui::components::{ErrorDisplay, LoadingSpinner, Pagination};
use rem_chart_ui::panel::{PanelSeq, PanelState};
use rem_chart_ui::state::AppState;
use rem_data::format::format_number;
use rem_data::paging;

use crate::{Client, Ctx};

const PAGE_SIZE: u32 = 20;

const DISTRICT_OPTIONS: [&str; 8] =
    ["朝阳", "海淀", "西城", "东城", "丰台", "石景山", "通州", "昌平"];
const LAYOUT_OPTIONS: [&str; 5] = ["1室1厅", "2室1厅", "2室2厅", "3室1厅", "3室2厅"];

async fn load_houses(
    client: Client,
    mut panel: Signal<PanelState<PagedHouseList>>,
    seq: PanelSeq,
    filters: HouseFilters,
    page: u32,
) {
    let ticket = seq.issue();
    panel.set(PanelState::Loading);
    let result = metro::houses(&client, &filters, page, PAGE_SIZE).await;
    if !seq.is_current(ticket) {
        log::debug!("houses: dropping stale response");
        return;
    }
    match result {
        Ok(list) => panel.set(PanelState::Ready(list)),
        Err(e) => panel.set(PanelState::Failed(e.user_message())),
    }
}

#[component]
pub fn HousesTab(active_tab: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let state = use_context::<AppState>();
    let panel: Signal<PanelState<PagedHouseList>> = use_signal(|| PanelState::Loading);
    let mut loaded = use_signal(|| false);
    let seq = use_hook(PanelSeq::new);

    // Draft filter controls; nothing fires until the search button applies
    // them.
    let mut district_draft = use_signal(String::new);
    let mut layout_draft = use_signal(String::new);
    let mut price_draft = use_signal(String::new);
    // Filters actually in effect for the current list.
    let mut applied_filters = use_signal(HouseFilters::default);
    let mut current_page = use_signal(|| 1u32);

    // Lazy initial load.
    let initial_ctx = ctx.clone();
    let initial_seq = seq.clone();
    use_effect(move || {
        if active_tab() != "list" || *loaded.peek() {
            return;
        }
        loaded.set(true);
        spawn(load_houses(
            initial_ctx.client.clone(),
            panel,
            initial_seq.clone(),
            HouseFilters::default(),
            1,
        ));
    });

    let search_ctx = ctx.clone();
    let search_seq = seq.clone();
    let on_search = move |_| {
        let mut filters = HouseFilters {
            district: (!district_draft().is_empty()).then(|| district_draft()),
            layout: (!layout_draft().is_empty()).then(|| layout_draft()),
            min_price: None,
            max_price: None,
        };
        let price = price_draft();
        if !price.is_empty() {
            let mut parts = price.splitn(2, '-');
            filters.min_price = parts.next().and_then(|p| p.parse().ok());
            filters.max_price = parts.next().and_then(|p| p.parse().ok());
        }

        applied_filters.set(filters.clone());
        current_page.set(1);
        spawn(load_houses(
            search_ctx.client.clone(),
            panel,
            search_seq.clone(),
            filters,
            1,
        ));
    };

    let page_ctx = ctx.clone();
    let page_seq = seq.clone();
    let on_page = move |page: u32| {
        current_page.set(page);
        spawn(load_houses(
            page_ctx.client.clone(),
            panel,
            page_seq.clone(),
            applied_filters.peek().clone(),
            page,
        ));
    };

    let fav_ctx = ctx.clone();
    let on_favorite = move |house_id: i64| {
        let ctx = fav_ctx.clone();
        spawn(async move {
            match rem_api::endpoints::favorites::add_house(&ctx.client, house_id, None).await {
                Ok(()) => state.toast_success("已加入收藏"),
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    let selected_district = district_draft();
    let selected_layout = layout_draft();
    let selected_price = price_draft();

    rsx! {
        div {
            // Filter bar
            div {
                style: "display: flex; gap: 12px; margin-bottom: 12px; flex-wrap: wrap;",
                label {
                    "区域："
                    select {
                        onchange: move |evt| district_draft.set(evt.value()),
                        option { value: "", selected: selected_district.is_empty(), "不限" }
                        for district in DISTRICT_OPTIONS {
                            option {
                                key: "{district}",
                                value: "{district}",
                                selected: district == selected_district,
                                "{district}"
                            }
                        }
                    }
                }
                label {
                    "户型："
                    select {
                        onchange: move |evt| layout_draft.set(evt.value()),
                        option { value: "", selected: selected_layout.is_empty(), "不限" }
                        for layout in LAYOUT_OPTIONS {
                            option {
                                key: "{layout}",
                                value: "{layout}",
                                selected: layout == selected_layout,
                                "{layout}"
                            }
                        }
                    }
                }
                label {
                    "总价："
                    select {
                        onchange: move |evt| price_draft.set(evt.value()),
                        option { value: "", selected: selected_price.is_empty(), "不限" }
                        option { value: "0-300", selected: selected_price == "0-300", "300万以下" }
                        option { value: "300-500", selected: selected_price == "300-500", "300-500万" }
                        option { value: "500-800", selected: selected_price == "500-800", "500-800万" }
                        option { value: "800-10000", selected: selected_price == "800-10000", "800万以上" }
                    }
                }
                button { onclick: on_search, "筛选" }
            }

            {match &*panel.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(list) => {
                    let window = paging::window(list.page.max(1), list.total, PAGE_SIZE);
                    rsx! {
                        div {
                            style: "color: #6b7280; font-size: 13px; margin-bottom: 8px;",
                            "共 {list.total} 套房源"
                        }
                        if list.houses.is_empty() {
                            div {
                                style: "padding: 40px; text-align: center; color: #9ca3af;",
                                "暂无房源，请调整筛选条件"
                            }
                        }
                        for house in list.houses.iter() {
                            {
                                let house_id = house.house_id;
                                let title = format!(
                                    "{} · {}",
                                    house.region.as_deref().unwrap_or("北京"),
                                    house.layout.as_deref().unwrap_or("暂无户型"),
                                );
                                let area = house.area.map(|a| format!("{a}㎡")).unwrap_or_else(|| "-".to_string());
                                let orientation = house.orientation.clone().unwrap_or_else(|| "-".to_string());
                                let floor = house.floor.clone().unwrap_or_else(|| "-".to_string());
                                let total = house
                                    .total_price
                                    .map(|p| format!("{p:.0}"))
                                    .unwrap_or_else(|| "-".to_string());
                                let unit = house
                                    .price_per_sqm
                                    .map(format_number)
                                    .unwrap_or_else(|| "-".to_string());
                                let on_favorite = on_favorite.clone();
                                rsx! {
                                    div {
                                        key: "{house_id}",
                                        style: "display: flex; justify-content: space-between; align-items: center; padding: 12px; border: 1px solid #f3f4f6; border-radius: 6px; margin-bottom: 8px;",
                                        div {
                                            div { style: "font-weight: 600;", "{title}" }
                                            div {
                                                style: "color: #6b7280; font-size: 13px; margin-top: 4px;",
                                                "{area} · {orientation} · {floor}层"
                                            }
                                        }
                                        div {
                                            style: "text-align: right;",
                                            div { style: "color: #dc2626; font-weight: 600;", "{total}万" }
                                            div { style: "color: #9ca3af; font-size: 12px;", "{unit}元/㎡" }
                                            button {
                                                style: "margin-top: 4px; font-size: 12px;",
                                                onclick: move |_| on_favorite(house_id),
                                                "收藏"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        if let Some(window) = window {
                            Pagination { window, on_page: on_page.clone() }
                        }
                    }
                }
            }}
        }
    }
}
