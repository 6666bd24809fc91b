//! National overview page.
//!
//! Four independent panels load concurrently on mount: overview stat
//! cards, the province choropleth (weighted rollup of city rows), the
//! city ranking list and the price trend chart. Each panel owns its load
//! state, so a failed panel shows an inline error while its siblings stay
//! up. Filter changes re-run only their own panel's pipeline, guarded by
//! a sequence ticket against stale responses.

use std::rc::Rc;

use dioxus::prelude::*;
use futures::join;

use rem_api::endpoints::national;
use rem_api::models::{CityPricePoint, NationalOverview, RankingResponse};
use rem_api::transport::FetchTransport;
use rem_api::ApiClient;
use rem_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, SearchBox, StatCard, ToastStack,
};
use rem_chart_ui::js_bridge;
use rem_chart_ui::options::{self, CHINA_MAP};
use rem_chart_ui::panel::{PanelSeq, PanelState};
use rem_chart_ui::state::AppState;
use rem_data::format::{format_large_number, format_number};
use rem_data::ranking;
use rem_data::rollup::{self, ProvinceAggregate};
use rem_data::trend::{self, TrendSplit};
use rem_session::SessionGuard;

const API_BASE: &str = "/api";

const MAP_CHART_ID: &str = "china-map-chart";
const TREND_CHART_ID: &str = "trend-chart";

/// Ranking entries requested per tab.
const RANKING_LIMIT: u32 = 10;

/// Cities offered in the trend selector; empty value = national average.
const TREND_CITIES: [&str; 7] = ["北京", "上海", "深圳", "广州", "杭州", "成都", "武汉"];

type Client = Rc<ApiClient<FetchTransport>>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("national-root"))
        .launch(App);
}

/// `"0-10000"` style price band from the select control.
fn parse_price_range(range: &str) -> (Option<u64>, Option<u64>) {
    let mut parts = range.splitn(2, '-');
    let min = parts.next().and_then(|p| p.parse().ok());
    let max = parts.next().and_then(|p| p.parse().ok());
    (min, max)
}

async fn load_map_panel(
    client: Client,
    mut panel: Signal<PanelState<Vec<ProvinceAggregate>>>,
    seq: PanelSeq,
    province: Option<String>,
    price_range: Option<String>,
) {
    let ticket = seq.issue();
    panel.set(PanelState::Loading);

    let (min_price, max_price) = price_range
        .as_deref()
        .map(parse_price_range)
        .unwrap_or((None, None));

    let result = national::city_prices(&client, province.as_deref(), min_price, max_price).await;
    if !seq.is_current(ticket) {
        log::debug!("map: dropping stale response");
        return;
    }
    match result {
        Ok(resp) => panel.set(PanelState::Ready(rollup::province_rollup(&resp.cities))),
        Err(e) => panel.set(PanelState::Failed(e.user_message())),
    }
}

async fn load_ranking_panel(
    client: Client,
    mut panel: Signal<PanelState<RankingResponse>>,
    seq: PanelSeq,
    rank_type: String,
) {
    let ticket = seq.issue();
    panel.set(PanelState::Loading);
    let result = national::ranking(&client, &rank_type, RANKING_LIMIT).await;
    if !seq.is_current(ticket) {
        log::debug!("ranking: dropping stale response");
        return;
    }
    match result {
        Ok(resp) => panel.set(PanelState::Ready(resp)),
        Err(e) => panel.set(PanelState::Failed(e.user_message())),
    }
}

async fn load_trend_panel(
    client: Client,
    mut panel: Signal<PanelState<TrendSplit>>,
    seq: PanelSeq,
    city: Option<String>,
    year: Option<i32>,
) {
    let ticket = seq.issue();
    panel.set(PanelState::Loading);
    let result = national::trend(&client, city.as_deref(), year).await;
    if !seq.is_current(ticket) {
        log::debug!("trend: dropping stale response");
        return;
    }
    match result {
        Ok(resp) => panel.set(PanelState::Ready(trend::split_series(&resp.trends))),
        Err(e) => panel.set(PanelState::Failed(e.user_message())),
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let guard = use_hook(SessionGuard::browser);
    let client: Client = use_hook(|| {
        Rc::new(
            ApiClient::new(FetchTransport::new(API_BASE)).with_auth(Rc::new(guard.clone())),
        )
    });

    // Redirects and stops rendering when no session exists.
    let authed = use_hook(|| guard.require_auth());
    if !authed {
        return rsx! {};
    }

    let mut overview: Signal<PanelState<NationalOverview>> = use_signal(|| PanelState::Loading);
    let map_panel: Signal<PanelState<Vec<ProvinceAggregate>>> = use_signal(|| PanelState::Loading);
    let ranking_panel: Signal<PanelState<RankingResponse>> = use_signal(|| PanelState::Loading);
    let trend_panel: Signal<PanelState<TrendSplit>> = use_signal(|| PanelState::Loading);
    let mut provinces: Signal<Vec<String>> = use_signal(Vec::new);
    let mut search_results: Signal<Vec<CityPricePoint>> = use_signal(Vec::new);

    let province_filter = use_signal(String::new);
    let price_filter = use_signal(String::new);
    let rank_type = use_signal(|| "price".to_string());
    let trend_city = use_signal(String::new);
    let trend_year = use_signal(String::new);

    let map_seq = use_hook(PanelSeq::new);
    let ranking_seq = use_hook(PanelSeq::new);
    let trend_seq = use_hook(PanelSeq::new);
    let search_seq = use_hook(PanelSeq::new);

    // ─── Effect 1: one-time page setup ───
    let setup_guard = guard.clone();
    let setup_client = client.clone();
    use_effect(move || {
        state.user.set(setup_guard.current_user());
        js_bridge::init_charts();

        let client = setup_client.clone();
        spawn(async move {
            // Overview and province list are independent: join, not chain.
            let (overview_result, provinces_result) =
                join!(national::overview(&client), national::provinces(&client));

            match overview_result {
                Ok(data) => overview.set(PanelState::Ready(data)),
                Err(e) => overview.set(PanelState::Failed(e.user_message())),
            }
            match provinces_result {
                Ok(data) => provinces.set(data.provinces),
                Err(e) => {
                    // Secondary control; a toast is enough.
                    state.toast_error(e.user_message());
                }
            }
            state.loading.set(false);
        });
    });

    // ─── Effect 2: (re)load the map whenever its filters change ───
    let map_client = client.clone();
    let map_seq_handle = map_seq.clone();
    use_effect(move || {
        let province = province_filter();
        let price_range = price_filter();
        spawn(load_map_panel(
            map_client.clone(),
            map_panel,
            map_seq_handle.clone(),
            (!province.is_empty()).then_some(province),
            (!price_range.is_empty()).then_some(price_range),
        ));
    });

    // ─── Effect 3: ranking tab ───
    let ranking_client = client.clone();
    let ranking_seq_handle = ranking_seq.clone();
    use_effect(move || {
        spawn(load_ranking_panel(
            ranking_client.clone(),
            ranking_panel,
            ranking_seq_handle.clone(),
            rank_type(),
        ));
    });

    // ─── Effect 4: trend selectors ───
    let trend_client = client.clone();
    let trend_seq_handle = trend_seq.clone();
    use_effect(move || {
        let city = trend_city();
        let year = trend_year();
        spawn(load_trend_panel(
            trend_client.clone(),
            trend_panel,
            trend_seq_handle.clone(),
            (!city.is_empty()).then_some(city),
            year.parse().ok(),
        ));
    });

    // ─── Effect 5: bind the map chart when its data lands ───
    use_effect(move || {
        if let PanelState::Ready(aggregates) = &*map_panel.read() {
            let option = options::china_map_option(aggregates);
            let fallback = options::map_fallback_option(aggregates);
            js_bridge::bind_geo_chart(
                MAP_CHART_ID,
                CHINA_MAP,
                &option.to_string(),
                &fallback.to_string(),
            );
        }
    });

    // ─── Effect 6: bind the trend chart ───
    use_effect(move || {
        if let PanelState::Ready(split) = &*trend_panel.read() {
            js_bridge::bind_chart(TREND_CHART_ID, &options::trend_option(split).to_string());
        }
    });

    let on_search = {
        let client = client.clone();
        let seq = search_seq.clone();
        move |keyword: String| {
            if keyword.is_empty() {
                search_results.set(Vec::new());
                return;
            }
            let client = client.clone();
            let seq = seq.clone();
            spawn(async move {
                let ticket = seq.issue();
                match national::search(&client, &keyword).await {
                    Ok(resp) if seq.is_current(ticket) => search_results.set(resp.results),
                    Ok(_) => log::debug!("search: dropping stale response"),
                    Err(e) => log::warn!("city search failed: {e}"),
                }
            });
        }
    };

    let favorite_client = client.clone();
    let on_favorite_city = move |city_name: String| {
        let client = favorite_client.clone();
        spawn(async move {
            match rem_api::endpoints::favorites::add_city(&client, &city_name).await {
                Ok(()) => state.toast_success("已关注城市"),
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    let logout_guard = guard.clone();
    let logout_client = client.clone();
    let on_logout = move |_| {
        let guard = logout_guard.clone();
        let client = logout_client.clone();
        spawn(async move {
            guard.logout(&client).await;
        });
    };

    let display_name = state
        .user
        .read()
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "用户".to_string());

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            ToastStack {}

            // Header
            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h2 { style: "margin: 0;", "全国房价总览" }
                div {
                    style: "display: flex; gap: 12px; align-items: center;",
                    SearchBox {
                        placeholder: "搜索城市或省份".to_string(),
                        on_query: on_search,
                    }
                    span { style: "color: #6b7280;", "{display_name}" }
                    button { onclick: on_logout, "退出登录" }
                }
            }

            if !search_results.read().is_empty() {
                div {
                    style: "border: 1px solid #e5e7eb; border-radius: 6px; margin-bottom: 12px; background: #fff;",
                    for city in search_results.read().iter() {
                        {
                            let price = format_number(city.city_avg_price);
                            let city_name = city.city_name.clone();
                            let on_favorite = on_favorite_city.clone();
                            rsx! {
                                div {
                                    key: "{city.city_name}",
                                    style: "display: flex; justify-content: space-between; padding: 8px 12px; border-bottom: 1px solid #f3f4f6;",
                                    span { "{city.city_name} " span { style: "color: #9ca3af;", "{city.province_name}" } }
                                    span {
                                        style: "display: flex; gap: 10px; align-items: center;",
                                        span { style: "color: #2563eb;", "{price} 元/㎡" }
                                        button {
                                            style: "font-size: 12px;",
                                            onclick: move |_| on_favorite(city_name.clone()),
                                            "关注"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            OverviewCards { panel: overview }

            div {
                style: "display: flex; gap: 16px; align-items: flex-start; flex-wrap: wrap;",

                // Map panel with filters
                div {
                    style: "flex: 2; min-width: 480px;",
                    ChartHeader {
                        title: "省级均价地图".to_string(),
                        subtitle: "按挂牌量加权的省级均价（元/㎡）".to_string(),
                    }
                    MapFilters { provinces, province_filter, price_filter }
                    {match &*map_panel.read() {
                        PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                        s => rsx! {
                            ChartContainer {
                                id: MAP_CHART_ID.to_string(),
                                loading: s.is_loading(),
                                min_height: 460,
                            }
                        },
                    }}
                }

                // Ranking panel
                div {
                    style: "flex: 1; min-width: 300px;",
                    RankingPanel { panel: ranking_panel, rank_type }
                }
            }

            // Trend panel
            div {
                style: "margin-top: 16px;",
                ChartHeader {
                    title: "价格走势".to_string(),
                    subtitle: "选择2026年查看预测线".to_string(),
                }
                TrendFilters { trend_city, trend_year }
                {match &*trend_panel.read() {
                    PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                    s => rsx! {
                        ChartContainer {
                            id: TREND_CHART_ID.to_string(),
                            loading: s.is_loading(),
                            min_height: 360,
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn OverviewCards(panel: Signal<PanelState<NationalOverview>>) -> Element {
    match &*panel.read() {
        PanelState::Loading => rsx! { LoadingSpinner {} },
        PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
        PanelState::Ready(data) => {
            let highest = data
                .highest_city
                .as_ref()
                .map(|c| (format_number(c.price), c.name.clone()))
                .unwrap_or(("--".to_string(), "--".to_string()));
            let lowest = data
                .lowest_city
                .as_ref()
                .map(|c| (format_number(c.price), c.name.clone()))
                .unwrap_or(("--".to_string(), "--".to_string()));
            rsx! {
                div {
                    style: "display: flex; gap: 12px; margin-bottom: 16px; flex-wrap: wrap;",
                    StatCard {
                        label: "全国平均单价".to_string(),
                        value: format!("{} 元/㎡", format_number(data.national_avg_price)),
                        sub: format!("覆盖 {} 个城市", data.total_cities),
                    }
                    StatCard {
                        label: "最高城市".to_string(),
                        value: format!("{} 元/㎡", highest.0),
                        sub: highest.1,
                    }
                    StatCard {
                        label: "最低城市".to_string(),
                        value: format!("{} 元/㎡", lowest.0),
                        sub: lowest.1,
                    }
                    StatCard {
                        label: "挂牌总量".to_string(),
                        value: format_large_number(data.total_listings),
                        sub: "套".to_string(),
                    }
                }
            }
        }
    }
}

#[component]
fn MapFilters(
    provinces: Signal<Vec<String>>,
    province_filter: Signal<String>,
    price_filter: Signal<String>,
) -> Element {
    let mut province_filter = province_filter;
    let mut price_filter = price_filter;
    let names = provinces.read().clone();
    let selected_province = province_filter();
    let selected_price = price_filter();

    rsx! {
        div {
            style: "display: flex; gap: 12px; margin: 8px 0;",
            label {
                "省份："
                select {
                    onchange: move |evt| province_filter.set(evt.value()),
                    option { value: "", selected: selected_province.is_empty(), "全部" }
                    for name in names.iter() {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: *name == selected_province,
                            "{name}"
                        }
                    }
                }
            }
            label {
                "价格区间："
                select {
                    onchange: move |evt| price_filter.set(evt.value()),
                    option { value: "", selected: selected_price.is_empty(), "不限" }
                    option { value: "0-10000", selected: selected_price == "0-10000", "1万以下" }
                    option { value: "10000-20000", selected: selected_price == "10000-20000", "1-2万" }
                    option { value: "20000-40000", selected: selected_price == "20000-40000", "2-4万" }
                    option { value: "40000-200000", selected: selected_price == "40000-200000", "4万以上" }
                }
            }
        }
    }
}

#[component]
fn RankingPanel(panel: Signal<PanelState<RankingResponse>>, rank_type: Signal<String>) -> Element {
    let mut rank_type = rank_type;
    let current = rank_type();

    let tab = |value: &'static str, label: &'static str, current: &str| {
        let active = value == current;
        rsx! {
            button {
                style: if active {
                    "padding: 4px 10px; border: none; background: #2563eb; color: #fff; border-radius: 4px; cursor: pointer;"
                } else {
                    "padding: 4px 10px; border: none; background: #f3f4f6; color: #374151; border-radius: 4px; cursor: pointer;"
                },
                onclick: move |_| rank_type.set(value.to_string()),
                "{label}"
            }
        }
    };

    rsx! {
        ChartHeader { title: "城市排行".to_string() }
        div {
            style: "display: flex; gap: 6px; margin-bottom: 8px;",
            {tab("price", "房价榜", &current)}
            {tab("change", "涨幅榜", &current)}
            {tab("rent_ratio", "租售比", &current)}
        }
        {match &*panel.read() {
            PanelState::Loading => rsx! { LoadingSpinner {} },
            PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
            PanelState::Ready(response) => {
                let rows = ranking::rows(response);
                rsx! {
                    div {
                        for row in rows.iter() {
                            {
                                let color = match row.direction {
                                    ranking::Direction::Up => "#dc2626",
                                    ranking::Direction::Down => "#16a34a",
                                    ranking::Direction::Flat => "#6b7280",
                                };
                                let province = row.province_name.clone().unwrap_or_default();
                                let change = row.change_display.clone().unwrap_or_default();
                                let direction_class = row.direction.class();
                                rsx! {
                                    div {
                                        key: "{row.rank}",
                                        class: "ranking-item {direction_class}",
                                        style: "display: flex; align-items: center; gap: 10px; padding: 7px 4px; border-bottom: 1px solid #f3f4f6;",
                                        span { style: "width: 22px; color: #9ca3af;", "{row.rank}" }
                                        span { style: "flex: 1;",
                                            "{row.city_name} "
                                            span { style: "color: #9ca3af; font-size: 12px;", "{province}" }
                                        }
                                        span { style: "color: {color};", "{row.value_display}" }
                                        if !change.is_empty() {
                                            span { style: "color: {color}; font-size: 12px;", "{change}" }
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

#[component]
fn TrendFilters(trend_city: Signal<String>, trend_year: Signal<String>) -> Element {
    let mut trend_city = trend_city;
    let mut trend_year = trend_year;
    let selected_city = trend_city();
    let selected_year = trend_year();

    rsx! {
        div {
            style: "display: flex; gap: 12px; margin: 8px 0;",
            label {
                "城市："
                select {
                    onchange: move |evt| trend_city.set(evt.value()),
                    option { value: "", selected: selected_city.is_empty(), "全国" }
                    for city in TREND_CITIES.iter() {
                        option {
                            key: "{city}",
                            value: "{city}",
                            selected: *city == selected_city,
                            "{city}"
                        }
                    }
                }
            }
            label {
                "年份："
                select {
                    onchange: move |evt| trend_year.set(evt.value()),
                    option { value: "", selected: selected_year.is_empty(), "全部" }
                    for year in ["2023", "2024", "2025", "2026"] {
                        option {
                            key: "{year}",
                            value: "{year}",
                            selected: year == selected_year,
                            "{year}"
                        }
                    }
                }
            }
        }
    }
}
