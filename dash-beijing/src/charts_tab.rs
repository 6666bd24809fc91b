//! Distribution-charts tab: area/price scatter and district boxplot.
//!
//! The boxplot loads once. The scatter reloads whenever the district
//! filter changes; a sequence ticket drops responses that a faster later
//! request has already superseded.

use dioxus::prelude::*;

use rem_api::endpoints::metro;
use rem_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay};
use rem_chart_ui::js_bridge;
use rem_chart_ui::options;
use rem_chart_ui::panel::{PanelSeq, PanelState};
use rem_data::{boxplot, scatter};

use crate::Ctx;

const SCATTER_CHART_ID: &str = "scatter-chart";
const BOXPLOT_CHART_ID: &str = "boxplot-chart";

/// Server-side sample bound for the scatter.
const SCATTER_LIMIT: u32 = 500;

const DISTRICT_FILTERS: [&str; 6] = ["朝阳", "海淀", "西城", "东城", "丰台", "通州"];

#[component]
pub fn ChartsTab(active_tab: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let mut scatter_panel: Signal<PanelState<serde_json::Value>> =
        use_signal(|| PanelState::Loading);
    let mut boxplot_panel: Signal<PanelState<serde_json::Value>> =
        use_signal(|| PanelState::Loading);
    let district_filter = use_signal(String::new);
    // District the scatter was last fetched for; None = never fetched.
    let mut scatter_loaded_for: Signal<Option<String>> = use_signal(|| None);
    let mut boxplot_loaded = use_signal(|| false);
    let scatter_seq = use_hook(PanelSeq::new);

    // Scatter: fetch on first open and on district change.
    let scatter_ctx = ctx.clone();
    let seq = scatter_seq.clone();
    use_effect(move || {
        let district = district_filter();
        if active_tab() != "chart" || scatter_loaded_for.peek().as_ref() == Some(&district) {
            return;
        }
        scatter_loaded_for.set(Some(district.clone()));

        let client = scatter_ctx.client.clone();
        let seq = seq.clone();
        spawn(async move {
            let ticket = seq.issue();
            scatter_panel.set(PanelState::Loading);
            let result = metro::scatter(
                &client,
                (!district.is_empty()).then_some(district.as_str()),
                SCATTER_LIMIT,
            )
            .await;
            if !seq.is_current(ticket) {
                log::debug!("scatter: dropping stale response");
                return;
            }
            match result {
                Ok(resp) => {
                    let series = scatter::group_by_district(&resp.points);
                    scatter_panel.set(PanelState::Ready(options::scatter_option(&series)));
                }
                Err(e) => scatter_panel.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    // Boxplot: once per page lifetime.
    let boxplot_ctx = ctx.clone();
    use_effect(move || {
        if active_tab() != "chart" || *boxplot_loaded.peek() {
            return;
        }
        boxplot_loaded.set(true);

        let client = boxplot_ctx.client.clone();
        spawn(async move {
            match metro::boxplot(&client).await {
                Ok(resp) => {
                    let summaries = boxplot::coerce_rows(&resp.boxplot);
                    boxplot_panel.set(PanelState::Ready(options::boxplot_option(&summaries)));
                }
                Err(e) => boxplot_panel.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    use_effect(move || {
        if let PanelState::Ready(option) = &*scatter_panel.read() {
            js_bridge::bind_chart(SCATTER_CHART_ID, &option.to_string());
        }
    });
    use_effect(move || {
        if let PanelState::Ready(option) = &*boxplot_panel.read() {
            js_bridge::bind_chart(BOXPLOT_CHART_ID, &option.to_string());
        }
    });

    let selected = district_filter();

    rsx! {
        div {
            ChartHeader {
                title: "面积-总价分布".to_string(),
                subtitle: "按行政区着色".to_string(),
            }
            div {
                style: "display: flex; gap: 6px; margin: 8px 0;",
                {chart_filter_button("", "全部", &selected, district_filter)}
                for district in DISTRICT_FILTERS {
                    {chart_filter_button(district, district, &selected, district_filter)}
                }
            }
            {match &*scatter_panel.read() {
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                s => rsx! {
                    ChartContainer {
                        id: SCATTER_CHART_ID.to_string(),
                        loading: s.is_loading(),
                        min_height: 400,
                    }
                },
            }}

            div { style: "margin-top: 20px;",
                ChartHeader {
                    title: "区域单价箱线图".to_string(),
                    subtitle: "五数概括（元/㎡）".to_string(),
                }
                {match &*boxplot_panel.read() {
                    PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                    s => rsx! {
                        ChartContainer {
                            id: BOXPLOT_CHART_ID.to_string(),
                            loading: s.is_loading(),
                            min_height: 400,
                        }
                    },
                }}
            }
        }
    }
}

fn chart_filter_button(
    value: &'static str,
    label: &'static str,
    selected: &str,
    district_filter: Signal<String>,
) -> Element {
    let active = value == selected;
    let mut district_filter = district_filter;
    rsx! {
        button {
            style: if active {
                "padding: 4px 12px; border: 1px solid #2563eb; color: #2563eb; background: #eff6ff; border-radius: 4px; cursor: pointer;"
            } else {
                "padding: 4px 12px; border: 1px solid #e5e7eb; color: #374151; background: #fff; border-radius: 4px; cursor: pointer;"
            },
            onclick: move |_| district_filter.set(value.to_string()),
            "{label}"
        }
    }
}
