//! AI-assistant tab: recommendation form, chat, valuation.
//!
//! Chat history loads lazily the first time the tab opens; the session id
//! the server hands back threads the conversation. Form submissions are
//! user-initiated blocking actions, so their failures surface directly in
//! the affected region rather than as toasts.

use dioxus::prelude::*;

use rem_api::endpoints::ai;
use rem_api::models::{ChatMessage, House, RecommendRequest, ValuationRequest, ValuationResult};
use rem_chart_ui::components::ChartHeader;
use rem_chart_ui::panel::PanelState;
use rem_data::format::format_number;

use crate::Ctx;

const DISTRICT_OPTIONS: [&str; 6] = ["朝阳", "海淀", "西城", "东城", "丰台", "通州"];
const LAYOUT_OPTIONS: [&str; 4] = ["1室1厅", "2室1厅", "2室2厅", "3室2厅"];

fn parse_u64(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

#[component]
pub fn AiTab(active_tab: Signal<String>) -> Element {
    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(360px, 1fr)); gap: 20px;",
            RecommendPanel {}
            ChatPanel { active_tab }
            ValuationPanel {}
        }
    }
}

#[component]
fn RecommendPanel() -> Element {
    let ctx = use_context::<Ctx>();
    let mut budget_min = use_signal(String::new);
    let mut budget_max = use_signal(String::new);
    let mut district = use_signal(String::new);
    let mut layout = use_signal(String::new);
    let mut result: Signal<Option<PanelState<(u64, Vec<House>)>>> = use_signal(|| None);

    let submit_ctx = ctx.clone();
    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();

        // Empty inputs are omitted from the request body entirely.
        let request = RecommendRequest {
            budget_min: parse_u64(&budget_min()),
            budget_max: parse_u64(&budget_max()),
            district: (!district().is_empty()).then(|| district()),
            layout: (!layout().is_empty()).then(|| layout()),
            ..RecommendRequest::default()
        };

        result.set(Some(PanelState::Loading));
        let client = submit_ctx.client.clone();
        spawn(async move {
            match ai::recommend(&client, &request).await {
                Ok(resp) => result.set(Some(PanelState::Ready((
                    resp.total_matched,
                    resp.recommendations,
                )))),
                Err(e) => result.set(Some(PanelState::Failed(e.user_message()))),
            }
        });
    };

    let selected_district = district();
    let selected_layout = layout();

    rsx! {
        div {
            ChartHeader { title: "智能推荐".to_string() }
            form {
                onsubmit: on_submit,
                style: "display: flex; flex-direction: column; gap: 8px;",
                div {
                    "预算(万)："
                    input {
                        r#type: "number",
                        placeholder: "最低",
                        style: "width: 80px;",
                        value: "{budget_min}",
                        oninput: move |evt| budget_min.set(evt.value()),
                    }
                    " - "
                    input {
                        r#type: "number",
                        placeholder: "最高",
                        style: "width: 80px;",
                        value: "{budget_max}",
                        oninput: move |evt| budget_max.set(evt.value()),
                    }
                }
                label {
                    "意向区域："
                    select {
                        onchange: move |evt| district.set(evt.value()),
                        option { value: "", selected: selected_district.is_empty(), "不限" }
                        for d in DISTRICT_OPTIONS {
                            option { key: "{d}", value: "{d}", selected: d == selected_district, "{d}" }
                        }
                    }
                }
                label {
                    "意向户型："
                    select {
                        onchange: move |evt| layout.set(evt.value()),
                        option { value: "", selected: selected_layout.is_empty(), "不限" }
                        for l in LAYOUT_OPTIONS {
                            option { key: "{l}", value: "{l}", selected: l == selected_layout, "{l}" }
                        }
                    }
                }
                button { r#type: "submit", "获取推荐" }
            }

            {match &*result.read() {
                None => rsx! {},
                Some(PanelState::Loading) => rsx! {
                    div { style: "padding: 16px; color: #666;", "推荐生成中..." }
                },
                Some(PanelState::Failed(msg)) => rsx! {
                    div {
                        style: "padding: 12px; color: #C62828;",
                        "推荐失败：{msg}"
                    }
                },
                Some(PanelState::Ready((total, houses))) => rsx! {
                    div {
                        style: "margin-top: 8px; font-size: 13px; color: #6b7280;",
                        "共找到 {total} 套匹配房源"
                    }
                    for house in houses.iter() {
                        {
                            let title = format!(
                                "{} · {}",
                                house.region.as_deref().unwrap_or("北京"),
                                house.layout.as_deref().unwrap_or("-"),
                            );
                            let price = house
                                .total_price
                                .map(|p| format!("{p:.0}万"))
                                .unwrap_or_else(|| "-".to_string());
                            rsx! {
                                div {
                                    key: "{house.house_id}",
                                    style: "display: flex; justify-content: space-between; padding: 8px 4px; border-bottom: 1px solid #f3f4f6;",
                                    span { "{title}" }
                                    span { style: "color: #dc2626;", "{price}" }
                                }
                            }
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn ChatPanel(active_tab: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let mut messages: Signal<Vec<ChatMessage>> = use_signal(Vec::new);
    let mut session_id: Signal<Option<String>> = use_signal(|| None);
    let mut input = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut history_loaded = use_signal(|| false);

    // Lazy history load on first open.
    let history_ctx = ctx.clone();
    use_effect(move || {
        if active_tab() != "ai" || *history_loaded.peek() {
            return;
        }
        history_loaded.set(true);

        let client = history_ctx.client.clone();
        spawn(async move {
            match ai::chat_history(&client).await {
                Ok(history) => {
                    messages.set(history.messages);
                    session_id.set(history.session_id);
                }
                Err(e) => log::warn!("chat history unavailable: {e}"),
            }
        });
    });

    let send_ctx = ctx.clone();
    let send = move || {
        let text = input().trim().to_string();
        if text.is_empty() || sending() {
            return;
        }
        input.set(String::new());
        sending.set(true);
        messages.write().push(ChatMessage {
            role: "user".to_string(),
            content: text.clone(),
            created_at: None,
        });

        let client = send_ctx.client.clone();
        spawn(async move {
            let current_session = session_id.peek().clone();
            let reply = match ai::chat(&client, &text, current_session.as_deref()).await {
                Ok(reply) => {
                    if reply.session_id.is_some() {
                        session_id.set(reply.session_id.clone());
                    }
                    reply.reply
                }
                Err(e) => {
                    log::warn!("chat failed: {e}");
                    "抱歉，我遇到了一些问题，请稍后再试。".to_string()
                }
            };
            messages.write().push(ChatMessage {
                role: "assistant".to_string(),
                content: reply,
                created_at: None,
            });
            sending.set(false);
        });
    };

    let mut send_on_key = send.clone();
    let mut send_on_click = send;
    let is_sending = sending();

    rsx! {
        div {
            ChartHeader { title: "AI 问答".to_string() }
            div {
                style: "height: 280px; overflow-y: auto; border: 1px solid #e5e7eb; border-radius: 6px; padding: 8px; margin-bottom: 8px; background: #fafafa;",
                for (index, message) in messages.read().iter().enumerate() {
                    {
                        let own = message.role == "user";
                        let align = if own { "flex-end" } else { "flex-start" };
                        let background = if own { "#dbeafe" } else { "#fff" };
                        rsx! {
                            div {
                                key: "{index}",
                                style: "display: flex; justify-content: {align}; margin-bottom: 6px;",
                                span {
                                    style: "max-width: 80%; padding: 6px 10px; border-radius: 8px; background: {background}; border: 1px solid #e5e7eb; font-size: 13px; white-space: pre-wrap;",
                                    "{message.content}"
                                }
                            }
                        }
                    }
                }
            }
            div {
                style: "display: flex; gap: 6px;",
                input {
                    style: "flex: 1; padding: 6px 10px; border: 1px solid #d1d5db; border-radius: 6px;",
                    placeholder: "问问北京哪里值得买...",
                    value: "{input}",
                    oninput: move |evt| input.set(evt.value()),
                    onkeypress: move |evt| {
                        if evt.key() == Key::Enter {
                            send_on_key();
                        }
                    },
                }
                button {
                    disabled: is_sending,
                    onclick: move |_| send_on_click(),
                    "发送"
                }
            }
        }
    }
}

#[component]
fn ValuationPanel() -> Element {
    let ctx = use_context::<Ctx>();
    let mut district = use_signal(|| "朝阳".to_string());
    let mut area = use_signal(String::new);
    let mut result: Signal<Option<PanelState<ValuationResult>>> = use_signal(|| None);

    let submit_ctx = ctx.clone();
    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();

        let Ok(area_value) = area().trim().parse::<f64>() else {
            result.set(Some(PanelState::Failed("请输入有效的面积".to_string())));
            return;
        };
        let request = ValuationRequest {
            district: district(),
            area: area_value,
            layout: None,
            floor: None,
            orientation: None,
        };

        result.set(Some(PanelState::Loading));
        let client = submit_ctx.client.clone();
        spawn(async move {
            match ai::valuation(&client, &request).await {
                Ok(v) => result.set(Some(PanelState::Ready(v))),
                Err(e) => result.set(Some(PanelState::Failed(e.user_message()))),
            }
        });
    };

    let selected_district = district();

    rsx! {
        div {
            ChartHeader { title: "房价估值".to_string() }
            form {
                onsubmit: on_submit,
                style: "display: flex; gap: 8px; align-items: center; flex-wrap: wrap;",
                label {
                    "区域："
                    select {
                        onchange: move |evt| district.set(evt.value()),
                        for d in DISTRICT_OPTIONS {
                            option { key: "{d}", value: "{d}", selected: d == selected_district, "{d}" }
                        }
                    }
                }
                label {
                    "面积(㎡)："
                    input {
                        r#type: "number",
                        style: "width: 80px;",
                        value: "{area}",
                        oninput: move |evt| area.set(evt.value()),
                    }
                }
                button { r#type: "submit", "估值" }
            }

            {match &*result.read() {
                None => rsx! {},
                Some(PanelState::Loading) => rsx! {
                    div { style: "padding: 16px; color: #666;", "估值计算中..." }
                },
                Some(PanelState::Failed(msg)) => rsx! {
                    div { style: "padding: 12px; color: #C62828;", "{msg}" }
                },
                Some(PanelState::Ready(valuation)) => {
                    let total = valuation
                        .estimated_total
                        .map(|t| format!("约 {t:.0} 万"))
                        .unwrap_or_default();
                    let analysis = valuation.analysis.clone().unwrap_or_default();
                    let unit_price = format_number(valuation.estimated_price);
                    rsx! {
                        div {
                            style: "margin-top: 10px; padding: 12px; background: #f0fdf4; border: 1px solid #bbf7d0; border-radius: 6px;",
                            div {
                                style: "font-size: 18px; font-weight: 600;",
                                "{unit_price} 元/㎡"
                            }
                            if !total.is_empty() {
                                div { style: "color: #6b7280; margin-top: 4px;", "{total}" }
                            }
                            if !analysis.is_empty() {
                                p { style: "font-size: 13px; color: #374151; margin-top: 8px;", "{analysis}" }
                            }
                        }
                    }
                }
            }}
        }
    }
}
