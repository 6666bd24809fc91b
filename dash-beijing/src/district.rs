//! District tab: ranking list plus the district price bar chart.
//!
//! Loads eagerly (it is the landing tab). The two requests are
//! independent and joined; either side failing leaves the other rendered.

use dioxus::prelude::*;
use futures::join;

use rem_api::endpoints::metro;
use rem_api::models::{DistrictPrice, DistrictRankingEntry};
use rem_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner};
use rem_chart_ui::js_bridge;
use rem_chart_ui::options;
use rem_chart_ui::panel::PanelState;
use rem_data::format::{format_number, format_signed_percent};

use crate::Ctx;

const DISTRICT_CHART_ID: &str = "district-price-chart";

#[component]
pub fn DistrictTab(active_tab: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let mut ranking: Signal<PanelState<Vec<DistrictRankingEntry>>> =
        use_signal(|| PanelState::Loading);
    let mut prices: Signal<PanelState<Vec<DistrictPrice>>> = use_signal(|| PanelState::Loading);

    let load_ctx = ctx.clone();
    use_effect(move || {
        let client = load_ctx.client.clone();
        spawn(async move {
            let (ranking_result, prices_result) = join!(
                metro::district_ranking(&client),
                metro::district_prices(&client)
            );
            match ranking_result {
                Ok(resp) => ranking.set(PanelState::Ready(resp.ranking)),
                Err(e) => ranking.set(PanelState::Failed(e.user_message())),
            }
            match prices_result {
                Ok(resp) => prices.set(PanelState::Ready(resp.districts)),
                Err(e) => prices.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    // Bind the bar chart once the price rows land.
    use_effect(move || {
        if let PanelState::Ready(districts) = &*prices.read() {
            let option = options::category_bar_option(
                "区域均价",
                districts.iter().map(|d| d.name.clone()).collect(),
                districts.iter().map(|d| d.avg_price).collect(),
            );
            js_bridge::bind_chart(DISTRICT_CHART_ID, &option.to_string());
        }
    });

    rsx! {
        div {
            style: "display: flex; gap: 16px; align-items: flex-start; flex-wrap: wrap;",

            div {
                style: "flex: 1; min-width: 300px;",
                ChartHeader { title: "区域单价排名".to_string() }
                {match &*ranking.read() {
                    PanelState::Loading => rsx! { LoadingSpinner {} },
                    PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                    PanelState::Ready(entries) => rsx! {
                        div {
                            for (index, entry) in entries.iter().enumerate() {
                                {
                                    let change = entry.change.unwrap_or(0.0);
                                    let color = if change > 0.0 {
                                        "#dc2626"
                                    } else if change < 0.0 {
                                        "#16a34a"
                                    } else {
                                        "#6b7280"
                                    };
                                    let change_text = entry
                                        .change
                                        .map(format_signed_percent)
                                        .unwrap_or_else(|| "-".to_string());
                                    let price = format_number(entry.avg_price);
                                    let rank = index + 1;
                                    rsx! {
                                        div {
                                            key: "{entry.district}",
                                            style: "display: flex; align-items: center; gap: 10px; padding: 7px 4px; border-bottom: 1px solid #f3f4f6;",
                                            span { style: "width: 22px; color: #9ca3af;", "{rank}" }
                                            span { style: "flex: 1;",
                                                "{entry.district} "
                                                span { style: "color: #9ca3af; font-size: 12px;", "{entry.count}套" }
                                            }
                                            span { "{price} 元/㎡" }
                                            span { style: "color: {color}; font-size: 12px;", "{change_text}" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }}
            }

            div {
                style: "flex: 2; min-width: 460px;",
                ChartHeader {
                    title: "区域均价对比".to_string(),
                    subtitle: "元/㎡".to_string(),
                }
                {match &*prices.read() {
                    PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                    s => rsx! {
                        ChartContainer {
                            id: DISTRICT_CHART_ID.to_string(),
                            loading: s.is_loading(),
                            min_height: 420,
                        }
                    },
                }}
            }
        }
    }
}
