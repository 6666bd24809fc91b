//! Reports page.
//!
//! Three regions: the report library (public list + my reports, loaded
//! together on mount), a synchronous generation form, and the async AI
//! generation flow. The async flow creates a server task and drives the
//! cancellable backoff polling loop; progress renders live and the cancel
//! button flips the shared token.

use std::rc::Rc;

use dioxus::prelude::*;
use futures::join;

use rem_api::endpoints::reports;
use rem_api::models::{GenerateReportRequest, ReportDetail, ReportSummary, ReportType};
use rem_api::tasks::{poll_report_task, CancelToken, PollOptions};
use rem_api::transport::FetchTransport;
use rem_api::ApiClient;
use rem_chart_ui::components::{ChartHeader, ErrorDisplay, LoadingSpinner, ToastStack};
use rem_chart_ui::panel::PanelState;
use rem_chart_ui::state::AppState;
use rem_session::SessionGuard;

const API_BASE: &str = "/api";

type Client = Rc<ApiClient<FetchTransport>>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("reports-root"))
        .launch(App);
}

/// State of the async AI generation flow.
#[derive(Clone, PartialEq, Default)]
enum AiFlow {
    #[default]
    Idle,
    Running {
        progress: u8,
        message: String,
    },
    Done(i64),
    Failed(String),
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let guard = use_hook(SessionGuard::browser);
    let client: Client = use_hook(|| {
        Rc::new(ApiClient::new(FetchTransport::new(API_BASE)).with_auth(Rc::new(guard.clone())))
    });

    let authed = use_hook(|| guard.require_auth());
    if !authed {
        return rsx! {};
    }

    let mut types: Signal<Vec<ReportType>> = use_signal(Vec::new);
    let mut library: Signal<PanelState<Vec<ReportSummary>>> = use_signal(|| PanelState::Loading);
    let mut mine: Signal<PanelState<Vec<ReportSummary>>> = use_signal(|| PanelState::Loading);
    let mut detail: Signal<Option<ReportDetail>> = use_signal(|| None);

    let mut selected_type = use_signal(String::new);
    let mut target_city = use_signal(String::new);
    let mut generating = use_signal(|| false);
    let ai_flow: Signal<AiFlow> = use_signal(AiFlow::default);
    let mut cancel_slot: Signal<Option<CancelToken>> = use_signal(|| None);

    // Mount: types + library + my reports, joined.
    let setup_guard = guard.clone();
    let setup_client = client.clone();
    use_effect(move || {
        state.user.set(setup_guard.current_user());
        let client = setup_client.clone();
        spawn(async move {
            let (types_result, list_result, mine_result) = join!(
                reports::types(&client),
                reports::list(&client),
                reports::mine(&client)
            );
            match types_result {
                Ok(data) => {
                    if let Some(first) = data.types.first() {
                        selected_type.set(first.id.clone());
                    }
                    types.set(data.types);
                }
                Err(e) => state.toast_error(e.user_message()),
            }
            match list_result {
                Ok(data) => library.set(PanelState::Ready(data.reports)),
                Err(e) => library.set(PanelState::Failed(e.user_message())),
            }
            match mine_result {
                Ok(data) => mine.set(PanelState::Ready(data.reports)),
                Err(e) => mine.set(PanelState::Failed(e.user_message())),
            }
            state.loading.set(false);
        });
    });

    let open_client = client.clone();
    let on_open = move |report_id: i64| {
        let client = open_client.clone();
        spawn(async move {
            match reports::detail(&client, report_id).await {
                Ok(data) => detail.set(Some(data)),
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    // Synchronous generation: user-initiated blocking action, failure is
    // surfaced as a blocking alert-style toast.
    let generate_client = client.clone();
    let on_generate = move |_| {
        if generating() {
            return;
        }
        let request = GenerateReportRequest {
            report_type: selected_type(),
            city: (!target_city().is_empty()).then(|| target_city()),
            district: None,
        };
        if request.report_type.is_empty() {
            state.toast_error("请选择报告类型");
            return;
        }
        generating.set(true);

        let client = generate_client.clone();
        spawn(async move {
            match reports::generate(&client, &request).await {
                Ok(report) => {
                    state.toast_success("报告生成完成");
                    detail.set(Some(report));
                    if let Ok(data) = reports::mine(&client).await {
                        mine.set(PanelState::Ready(data.reports));
                    }
                }
                Err(e) => state.toast_error(e.user_message()),
            }
            generating.set(false);
        });
    };

    // Async AI generation with cancellable polling.
    let ai_client = client.clone();
    let on_generate_ai = move |_| {
        if matches!(*ai_flow.peek(), AiFlow::Running { .. }) {
            return;
        }
        let request = GenerateReportRequest {
            report_type: selected_type(),
            city: (!target_city().is_empty()).then(|| target_city()),
            district: None,
        };
        if request.report_type.is_empty() {
            state.toast_error("请选择报告类型");
            return;
        }

        let cancel = CancelToken::new();
        cancel_slot.set(Some(cancel.clone()));
        let mut ai_flow = ai_flow;
        ai_flow.set(AiFlow::Running {
            progress: 0,
            message: "任务创建中".to_string(),
        });

        let client = ai_client.clone();
        spawn(async move {
            let created = match reports::generate_ai_async(&client, &request).await {
                Ok(created) => created,
                Err(e) => {
                    ai_flow.set(AiFlow::Failed(e.user_message()));
                    return;
                }
            };

            let outcome = poll_report_task(
                &client,
                &created.task_id,
                PollOptions::default(),
                cancel,
                |task| {
                    ai_flow.set(AiFlow::Running {
                        progress: task.progress,
                        message: task
                            .message
                            .clone()
                            .unwrap_or_else(|| "生成中".to_string()),
                    });
                },
            )
            .await;

            match outcome {
                Ok(task) => {
                    let report_id = task
                        .result
                        .as_ref()
                        .and_then(|r| r.get("report_id"))
                        .and_then(|v| v.as_i64())
                        .unwrap_or_default();
                    ai_flow.set(AiFlow::Done(report_id));
                    if let Ok(data) = reports::mine(&client).await {
                        mine.set(PanelState::Ready(data.reports));
                    }
                }
                Err(e) => ai_flow.set(AiFlow::Failed(e.user_message())),
            }
            cancel_slot.set(None);
        });
    };

    let on_cancel_ai = move |_| {
        if let Some(token) = &*cancel_slot.peek() {
            token.cancel();
        }
    };

    let favorite_client = client.clone();
    let on_favorite_report = move |report_id: i64| {
        let client = favorite_client.clone();
        spawn(async move {
            match rem_api::endpoints::favorites::add_report(&client, report_id).await {
                Ok(()) => state.toast_success("已收藏报告"),
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

    let type_options = types.read().clone();
    let current_type = selected_type();
    let flow = ai_flow.read().clone();
    let is_generating = generating();

    rsx! {
        div {
            style: "max-width: 1000px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            ToastStack {}

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h2 { style: "margin: 0;", "市场分析报告" }
                button { onclick: on_logout, "退出登录" }
            }

            // Generation form
            div {
                style: "padding: 16px; border: 1px solid #e5e7eb; border-radius: 8px; margin-bottom: 16px;",
                ChartHeader { title: "生成报告".to_string() }
                div {
                    style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                    label {
                        "类型："
                        select {
                            onchange: move |evt| selected_type.set(evt.value()),
                            for report_type in type_options.iter() {
                                option {
                                    key: "{report_type.id}",
                                    value: "{report_type.id}",
                                    selected: report_type.id == current_type,
                                    "{report_type.name}"
                                }
                            }
                        }
                    }
                    label {
                        "城市："
                        input {
                            placeholder: "默认全国",
                            value: "{target_city}",
                            oninput: move |evt| target_city.set(evt.value()),
                        }
                    }
                    button {
                        disabled: is_generating,
                        onclick: on_generate,
                        if is_generating { "生成中..." } else { "立即生成" }
                    }
                    button { onclick: on_generate_ai, "AI 深度报告" }
                }

                {match &flow {
                    AiFlow::Idle => rsx! {},
                    AiFlow::Running { progress, message } => rsx! {
                        div {
                            style: "margin-top: 12px; display: flex; align-items: center; gap: 12px;",
                            div {
                                style: "flex: 1; height: 8px; background: #f3f4f6; border-radius: 4px; overflow: hidden;",
                                div {
                                    style: "height: 100%; width: {progress}%; background: #2563eb;",
                                }
                            }
                            span { style: "font-size: 13px; color: #6b7280;", "{message} ({progress}%)" }
                            button { onclick: on_cancel_ai, "取消" }
                        }
                    },
                    AiFlow::Done(report_id) => rsx! {
                        div {
                            style: "margin-top: 12px; color: #16a34a;",
                            "AI 报告已生成（#{report_id}），可在我的报告中查看。"
                        }
                    },
                    AiFlow::Failed(msg) => rsx! {
                        div { style: "margin-top: 12px; color: #C62828;", "{msg}" }
                    },
                }}
            }

            div {
                style: "display: flex; gap: 16px; align-items: flex-start; flex-wrap: wrap;",
                div {
                    style: "flex: 1; min-width: 300px;",
                    ReportList { title: "报告库", panel: library, on_open: on_open.clone() }
                }
                div {
                    style: "flex: 1; min-width: 300px;",
                    ReportList { title: "我的报告", panel: mine, on_open }
                }
            }

            if let Some(report) = detail.read().as_ref() {
                {
                    let report_id = report.id;
                    rsx! {
                        div {
                            style: "margin-top: 16px; padding: 16px; border: 1px solid #e5e7eb; border-radius: 8px; background: #fff;",
                            div {
                                style: "display: flex; justify-content: space-between; align-items: center;",
                                h3 { "{report.title}" }
                                button { onclick: move |_| on_favorite_report(report_id), "收藏" }
                            }
                            p {
                                style: "white-space: pre-wrap; font-size: 14px; color: #374151;",
                                {report.content.clone().unwrap_or_else(|| "（无内容）".to_string())}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ReportList(
    title: &'static str,
    panel: Signal<PanelState<Vec<ReportSummary>>>,
    on_open: EventHandler<i64>,
) -> Element {
    rsx! {
        ChartHeader { title: title.to_string() }
        {match &*panel.read() {
            PanelState::Loading => rsx! { LoadingSpinner {} },
            PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
            PanelState::Ready(items) => {
                if items.is_empty() {
                    rsx! { div { style: "color: #9ca3af; padding: 16px;", "暂无报告" } }
                } else {
                    rsx! {
                        div {
                            for report in items.iter() {
                                {
                                    let id = report.id;
                                    let created = report.created_at.clone().unwrap_or_default();
                                    rsx! {
                                        div {
                                            key: "{id}",
                                            style: "display: flex; justify-content: space-between; padding: 8px 4px; border-bottom: 1px solid #f3f4f6; cursor: pointer;",
                                            onclick: move |_| on_open.call(id),
                                            span { "{report.title}" }
                                            span { style: "color: #9ca3af; font-size: 12px;", "{created}" }
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
