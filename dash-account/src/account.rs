//! Profile, password, notifications and system-info sections.

use dioxus::prelude::*;
use futures::join;

use rem_api::endpoints::{system, user};
use rem_api::models::{Notification, NotificationSettings, Profile};
use rem_chart_ui::components::{ChartHeader, ErrorDisplay, LoadingSpinner};
use rem_chart_ui::panel::PanelState;
use rem_chart_ui::state::AppState;

use crate::Ctx;

#[component]
pub fn ProfileSection(section: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let state = use_context::<AppState>();
    let mut profile: Signal<PanelState<Profile>> = use_signal(|| PanelState::Loading);
    let mut nickname_draft = use_signal(String::new);
    let mut email_draft = use_signal(String::new);
    let mut old_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut loaded = use_signal(|| false);

    let load_ctx = ctx.clone();
    use_effect(move || {
        if section() != "profile" || *loaded.peek() {
            return;
        }
        loaded.set(true);
        let client = load_ctx.client.clone();
        spawn(async move {
            match user::profile(&client).await {
                Ok(data) => {
                    nickname_draft.set(data.nickname.clone().unwrap_or_default());
                    email_draft.set(data.email.clone().unwrap_or_default());
                    profile.set(PanelState::Ready(data));
                }
                Err(e) => profile.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    let save_ctx = ctx.clone();
    let on_save = move |_| {
        let current = match profile.peek().ready().cloned() {
            Some(p) => p,
            None => return,
        };
        let updated = Profile {
            nickname: (!nickname_draft().is_empty()).then(|| nickname_draft()),
            email: (!email_draft().is_empty()).then(|| email_draft()),
            ..current
        };
        let client = save_ctx.client.clone();
        spawn(async move {
            match user::update_profile(&client, &updated).await {
                Ok(()) => {
                    state.toast_success("资料已保存");
                    profile.set(PanelState::Ready(updated));
                }
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    let password_ctx = ctx.clone();
    let on_change_password = move |_| {
        if new_password().len() < 6 {
            state.toast_error("新密码至少6位");
            return;
        }
        let client = password_ctx.client.clone();
        spawn(async move {
            match user::change_password(&client, &old_password(), &new_password()).await {
                Ok(()) => {
                    state.toast_success("密码已修改");
                    old_password.set(String::new());
                    new_password.set(String::new());
                }
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    rsx! {
        div {
            {match &*profile.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(data) => rsx! {
                    div {
                        style: "display: flex; flex-direction: column; gap: 10px; max-width: 420px;",
                        ChartHeader { title: "个人资料".to_string() }
                        div { style: "color: #6b7280; font-size: 13px;", "用户名：{data.username}" }
                        label {
                            "昵称："
                            input {
                                value: "{nickname_draft}",
                                oninput: move |evt| nickname_draft.set(evt.value()),
                            }
                        }
                        label {
                            "邮箱："
                            input {
                                r#type: "email",
                                value: "{email_draft}",
                                oninput: move |evt| email_draft.set(evt.value()),
                            }
                        }
                        button { onclick: on_save.clone(), "保存资料" }
                    }
                },
            }}

            div {
                style: "display: flex; flex-direction: column; gap: 10px; max-width: 420px; margin-top: 28px;",
                ChartHeader { title: "修改密码".to_string() }
                input {
                    r#type: "password",
                    placeholder: "当前密码",
                    value: "{old_password}",
                    oninput: move |evt| old_password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "新密码（至少6位）",
                    value: "{new_password}",
                    oninput: move |evt| new_password.set(evt.value()),
                }
                button { onclick: on_change_password, "修改密码" }
            }
        }
    }
}

#[component]
pub fn NotificationsSection(section: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let state = use_context::<AppState>();
    let mut settings: Signal<PanelState<NotificationSettings>> =
        use_signal(|| PanelState::Loading);
    let mut notifications: Signal<PanelState<Vec<Notification>>> =
        use_signal(|| PanelState::Loading);
    let mut loaded = use_signal(|| false);

    let load_ctx = ctx.clone();
    use_effect(move || {
        if section() != "notifications" || *loaded.peek() {
            return;
        }
        loaded.set(true);
        let client = load_ctx.client.clone();
        spawn(async move {
            let (settings_result, list_result) = join!(
                user::notification_settings(&client),
                user::notifications(&client)
            );
            match settings_result {
                Ok(data) => settings.set(PanelState::Ready(data)),
                Err(e) => settings.set(PanelState::Failed(e.user_message())),
            }
            match list_result {
                Ok(data) => notifications.set(PanelState::Ready(data.notifications)),
                Err(e) => notifications.set(PanelState::Failed(e.user_message())),
            }
        });
    });

    let toggle_ctx = ctx.clone();
    let toggle = move |update: fn(&mut NotificationSettings, bool), value: bool| {
        let mut current = match settings.peek().ready().cloned() {
            Some(s) => s,
            None => return,
        };
        update(&mut current, value);
        settings.set(PanelState::Ready(current.clone()));

        let client = toggle_ctx.client.clone();
        spawn(async move {
            if let Err(e) = user::update_notification_settings(&client, &current).await {
                state.toast_error(e.user_message());
            }
        });
    };

    let mut toggle_price = toggle.clone();
    let mut toggle_report = toggle.clone();
    let mut toggle_system = toggle;

    rsx! {
        div {
            ChartHeader { title: "通知设置".to_string() }
            {match &*settings.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(data) => rsx! {
                    div {
                        style: "display: flex; flex-direction: column; gap: 8px; margin-bottom: 20px;",
                        label {
                            input {
                                r#type: "checkbox",
                                checked: data.price_alerts,
                                onchange: move |evt| toggle_price(
                                    |s, v| s.price_alerts = v,
                                    evt.checked(),
                                ),
                            }
                            " 价格波动提醒"
                        }
                        label {
                            input {
                                r#type: "checkbox",
                                checked: data.report_ready,
                                onchange: move |evt| toggle_report(
                                    |s, v| s.report_ready = v,
                                    evt.checked(),
                                ),
                            }
                            " 报告生成完成通知"
                        }
                        label {
                            input {
                                r#type: "checkbox",
                                checked: data.system_notices,
                                onchange: move |evt| toggle_system(
                                    |s, v| s.system_notices = v,
                                    evt.checked(),
                                ),
                            }
                            " 系统公告"
                        }
                    }
                },
            }}

            ChartHeader { title: "通知列表".to_string() }
            {match &*notifications.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready(items) => {
                    if items.is_empty() {
                        rsx! { div { style: "color: #9ca3af; padding: 16px;", "暂无通知" } }
                    } else {
                        rsx! {
                            div {
                                for item in items.iter() {
                                    {
                                        let created = item.created_at.clone().unwrap_or_default();
                                        let weight = if item.read { "400" } else { "600" };
                                        rsx! {
                                            div {
                                                key: "{item.id}",
                                                style: "padding: 8px 4px; border-bottom: 1px solid #f3f4f6; font-weight: {weight};",
                                                div { "{item.title}" }
                                                div {
                                                    style: "color: #9ca3af; font-size: 12px;",
                                                    "{created}"
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
        }
    }
}

#[component]
pub fn SystemSection(section: Signal<String>) -> Element {
    let ctx = use_context::<Ctx>();
    let state = use_context::<AppState>();
    let mut info: Signal<PanelState<(String, String)>> = use_signal(|| PanelState::Loading);
    let mut announcement: Signal<Option<String>> = use_signal(|| None);
    let mut feedback_text = use_signal(String::new);
    let mut loaded = use_signal(|| false);

    let load_ctx = ctx.clone();
    use_effect(move || {
        if section() != "system" || *loaded.peek() {
            return;
        }
        loaded.set(true);
        let client = load_ctx.client.clone();
        spawn(async move {
            let (version_result, update_result, config_result) = join!(
                system::version(&client),
                system::data_update_time(&client),
                system::config(&client)
            );
            match (version_result, update_result) {
                (Ok(version), Ok(updated)) => {
                    info.set(PanelState::Ready((version.version, updated.updated_at)));
                }
                (Err(e), _) | (_, Err(e)) => info.set(PanelState::Failed(e.user_message())),
            }
            match config_result {
                Ok(config) => announcement.set(config.announcement),
                Err(e) => log::warn!("system config unavailable: {e}"),
            }
        });
    });

    let feedback_ctx = ctx.clone();
    let on_feedback = move |_| {
        let content = feedback_text().trim().to_string();
        if content.is_empty() {
            state.toast_error("请填写反馈内容");
            return;
        }
        let client = feedback_ctx.client.clone();
        spawn(async move {
            match system::feedback(&client, &content, None).await {
                Ok(()) => {
                    state.toast_success("感谢反馈！");
                    feedback_text.set(String::new());
                }
                Err(e) => state.toast_error(e.user_message()),
            }
        });
    };

    rsx! {
        div {
            ChartHeader { title: "关于系统".to_string() }
            {match &*info.read() {
                PanelState::Loading => rsx! { LoadingSpinner {} },
                PanelState::Failed(msg) => rsx! { ErrorDisplay { message: msg.clone() } },
                PanelState::Ready((version, updated)) => rsx! {
                    div { style: "color: #374151;", "版本：{version}" }
                    div { style: "color: #374151; margin-top: 4px;", "数据更新时间：{updated}" }
                },
            }}

            if let Some(notice) = announcement.read().as_ref() {
                div {
                    style: "margin-top: 12px; padding: 10px 12px; background: #fffbeb; border: 1px solid #fde68a; border-radius: 6px; font-size: 13px;",
                    "{notice}"
                }
            }

            div {
                style: "margin-top: 24px; max-width: 480px;",
                ChartHeader { title: "意见反馈".to_string() }
                textarea {
                    style: "width: 100%; min-height: 90px; border: 1px solid #d1d5db; border-radius: 6px; padding: 8px;",
                    placeholder: "告诉我们哪里可以做得更好...",
                    value: "{feedback_text}",
                    oninput: move |evt| feedback_text.set(evt.value()),
                }
                button { style: "margin-top: 8px;", onclick: on_feedback, "提交反馈" }
            }
        }
    }
}
