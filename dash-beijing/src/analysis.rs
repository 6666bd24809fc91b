//! Feature-analysis tab: floor / layout / orientation / elevator charts.
//!
//! Lazy: the four requests fire together the first time the tab opens and
//! never again for this page lifetime. Each chart binds independently, so
//! one failed dataset blanks only its own panel.

use dioxus::prelude::*;
use futures::join;

use rem_api::endpoints::metro;
use rem_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay};
use rem_chart_ui::js_bridge;
use rem_chart_ui::options;
use rem_chart_ui::panel::PanelState;

use crate::Ctx;

const FLOOR_CHART_ID: &str = "floor-analysis-chart";
const LAYOUT_CHART_ID: &str = "layout-analysis-chart";
const ORIENTATION_CHART_ID: &str = "orientation-analysis-chart";
const ELEVATOR_CHART_ID: &str = "elevator-analysis-chart";

/// Option payloads are prebuilt here; binding happens per-panel below.
type OptionPanel = Signal<PanelState<serde_json::Value>>;

#[component]
pub fn AnalysisTab(active_tab: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let mut floor: OptionPanel = use_signal(|| PanelState::Loading);
    let mut layout: OptionPanel = use_signal(|| PanelState::Loading);
    let mut orientation: OptionPanel = use_signal(|| PanelState::Loading);
    let mut elevator: OptionPanel = use_signal(|| PanelState::Loading);
    let mut loaded = use_signal(|| false);

    let load_ctx = ctx.clone();
    use_effect(move || {
        if active_tab() != "analysis" || *loaded.peek() {
            return;
        }
        loaded.set(true);

        let client = load_ctx.client.clone();
        spawn(async move {
            let (floor_result, layout_result, orientation_result, elevator_result) = join!(
                metro::floor_analysis(&client),
                metro::layout_analysis(&client),
                metro::orientation_analysis(&client),
                metro::elevator_analysis(&client)
            );

            match floor_result {
                Ok(data) => floor.set(PanelState::Ready(options::category_bar_option(
                    "楼层均价",
                    data.floor_analysis.iter().map(|r| r.category.clone()).collect(),
                    data.floor_analysis.iter().map(|r| r.avg_price).collect(),
                ))),
                Err(e) => floor.set(PanelState::Failed(e.user_message())),
            }

            match layout_result {
                Ok(data) => layout.set(PanelState::Ready(options::category_bar_option(
                    "户型均价",
                    data.layout_analysis.iter().map(|r| r.layout.clone()).collect(),
                    data.layout_analysis.iter().map(|r| r.avg_price).collect(),
                ))),
                Err(e) => layout.set(PanelState::Failed(e.user_message())),
            }

            match orientation_result {
                Ok(data) => orientation.set(PanelState::Ready(options::pie_option(
                    "朝向分布",
                    data.orientation_analysis
                        .iter()
                        .map(|r| (r.orientation.clone(), r.count as f64))
                        .collect(),
                ))),
                Err(e) => orientation.set(PanelState::Failed(e.user_message())),
            }

            match elevator_result {
                Ok(data) => elevator.set(PanelState::Ready(options::category_bar_option(
                    "电梯均价",
                    data.elevator_analysis
                        .iter()
                        .map(|r| if r.has_elevator { "有电梯".to_string() } else { "无电梯".to_string() })
                        .collect(),
                    data.elevator_analysis.iter().map(|r| r.avg_price).collect(),
                ))),
                Err(e) => elevator.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    // One binding effect per chart; re-runs only when its option changes.
    use_effect(move || bind_panel(FLOOR_CHART_ID, &floor.read()));
    use_effect(move || bind_panel(LAYOUT_CHART_ID, &layout.read()));
    use_effect(move || bind_panel(ORIENTATION_CHART_ID, &orientation.read()));
    use_effect(move || bind_panel(ELEVATOR_CHART_ID, &elevator.read()));

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); gap: 16px;",
            AnalysisPanel { title: "楼层分析", chart_id: FLOOR_CHART_ID, panel: floor }
            AnalysisPanel { title: "户型分析", chart_id: LAYOUT_CHART_ID, panel: layout }
            AnalysisPanel { title: "朝向分析", chart_id: ORIENTATION_CHART_ID, panel: orientation }
            AnalysisPanel { title: "电梯分析", chart_id: ELEVATOR_CHART_ID, panel: elevator }
        }
    }
}

fn bind_panel(chart_id: &str, panel: &PanelState<serde_json::Value>) {
    if let PanelState::Ready(option) = panel {
        js_bridge::bind_chart(chart_id, &option.to_string());
    }
}

#[component]
fn AnalysisPanel(title: &'static str, chart_id: &'static str, panel: OptionPanel) -> Element {
    rsx! {
        div {
            ChartHeader { title: title.to_string() }
            {match &*panel.read() {
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                s => rsx! {
                    ChartContainer {
                        id: chart_id.to_string(),
                        loading: s.is_loading(),
                        min_height: 320,
                    }
                },
            }}
        }
    }
}
