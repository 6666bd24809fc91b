//! Login and registration forms.
//!
//! Validation is resolved entirely client-side and blocks submission; it
//! never reaches the network. On successful login the session is stored
//! and the remembered username updated per the checkbox.

use dioxus::prelude::*;

use rem_api::endpoints::auth;
use rem_api::models::RegisterRequest;
use rem_api::ApiError;
use rem_chart_ui::state::AppState;

use crate::Ctx;

/// Minimum password length accepted by the forms.
const MIN_PASSWORD_LEN: usize = 6;

fn validate_login(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::Validation("请输入用户名".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("请输入密码".to_string()));
    }
    Ok(())
}

fn validate_register(
    username: &str,
    password: &str,
    confirm: &str,
    email: &str,
) -> Result<(), ApiError> {
    if username.trim().len() < 3 {
        return Err(ApiError::Validation("用户名至少3个字符".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!("密码至少{MIN_PASSWORD_LEN}位")));
    }
    if password != confirm {
        return Err(ApiError::Validation("两次输入的密码不一致".to_string()));
    }
    if !email.is_empty() && !email.contains('@') {
        return Err(ApiError::Validation("邮箱格式不正确".to_string()));
    }
    Ok(())
}

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<Ctx>();
    let mut state = use_context::<AppState>();
    let mut registering = use_signal(|| false);

    let mut username = use_signal(|| ctx.guard.remembered_username().unwrap_or_default());
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut remember = use_signal(|| ctx.guard.remembered_username().is_some());
    let mut form_error: Signal<Option<String>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let submit_ctx = ctx.clone();
    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        if busy() {
            return;
        }

        let validation = if registering() {
            validate_register(&username(), &password(), &confirm(), &email())
        } else {
            validate_login(&username(), &password())
        };
        if let Err(e) = validation {
            form_error.set(Some(e.user_message()));
            return;
        }
        form_error.set(None);
        busy.set(true);

        let ctx = submit_ctx.clone();
        spawn(async move {
            if registering() {
                let request = RegisterRequest {
                    username: username().trim().to_string(),
                    password: password(),
                    email: (!email().is_empty()).then(|| email()),
                    nickname: None,
                };
                match auth::register(&ctx.client, &request).await {
                    Ok(_) => {
                        state.toast_success("注册成功，请登录");
                        registering.set(false);
                        password.set(String::new());
                        confirm.set(String::new());
                    }
                    Err(e) => form_error.set(Some(e.user_message())),
                }
            } else {
                match auth::login(&ctx.client, username().trim(), &password()).await {
                    Ok(resp) => {
                        ctx.guard.store_session(&resp.token, &resp.user);
                        if remember() {
                            ctx.guard.remember_username(&resp.user.username);
                        } else {
                            ctx.guard.forget_username();
                        }
                        state.user.set(Some(resp.user));
                        state.toast_success("登录成功");
                    }
                    Err(e) => form_error.set(Some(e.user_message())),
                }
            }
            busy.set(false);
        });
    };

    let is_registering = registering();
    let error = form_error.read().clone();
    let is_busy = busy();

    rsx! {
        div {
            style: "max-width: 380px; margin: 60px auto; padding: 24px; border: 1px solid #e5e7eb; border-radius: 10px; background: #fff;",
            h2 {
                style: "text-align: center; margin-top: 0;",
                if is_registering { "注册账号" } else { "欢迎回来" }
            }

            if let Some(msg) = error {
                div {
                    style: "padding: 8px 12px; margin-bottom: 12px; background: #FFEBEE; color: #C62828; border-radius: 4px; font-size: 13px;",
                    "{msg}"
                }
            }

            form {
                onsubmit: on_submit,
                style: "display: flex; flex-direction: column; gap: 10px;",
                input {
                    placeholder: "用户名",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                if is_registering {
                    input {
                        r#type: "email",
                        placeholder: "邮箱（选填）",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                input {
                    r#type: "password",
                    placeholder: "密码",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if is_registering {
                    input {
                        r#type: "password",
                        placeholder: "确认密码",
                        value: "{confirm}",
                        oninput: move |evt| confirm.set(evt.value()),
                    }
                } else {
                    label {
                        style: "font-size: 13px; color: #6b7280;",
                        input {
                            r#type: "checkbox",
                            checked: remember(),
                            onchange: move |evt| remember.set(evt.checked()),
                        }
                        " 记住用户名"
                    }
                }
                button {
                    r#type: "submit",
                    disabled: is_busy,
                    style: "padding: 8px; background: #2563eb; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    if is_busy { "请稍候..." } else if is_registering { "注册" } else { "登录" }
                }
            }

            div {
                style: "text-align: center; margin-top: 12px; font-size: 13px;",
                button {
                    style: "border: none; background: none; color: #2563eb; cursor: pointer;",
                    onclick: move |_| {
                        form_error.set(None);
                        registering.set(!registering());
                    },
                    if is_registering { "已有账号？去登录" } else { "没有账号？去注册" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("", "pw").is_err());
        assert!(validate_login("user", "").is_err());
        assert!(validate_login("user", "pw").is_ok());
    }

    #[test]
    fn register_checks_password_rules() {
        assert!(validate_register("abc", "short", "short", "").is_err());
        assert!(validate_register("abc", "longenough", "different", "").is_err());
        assert!(validate_register("ab", "longenough", "longenough", "").is_err());
        assert!(validate_register("abc", "longenough", "longenough", "not-an-email").is_err());
        assert!(validate_register("abc", "longenough", "longenough", "a@b.cn").is_ok());
    }
}
