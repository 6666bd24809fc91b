//! Toast overlay fed by the AppState queue.

use dioxus::prelude::*;
use gloo_timers::callback::Timeout;

use crate::state::{AppState, TOAST_DURATION_MS};

/// Renders active toasts and expires each one after its duration.
#[component]
pub fn ToastStack() -> Element {
    let state = use_context::<AppState>();
    let toasts = state.toasts.read().clone();

    // Arm an expiry timer for the newest toast. Dismissal by id is
    // idempotent, so an already-clicked-away toast is a no-op here.
    use_effect(move || {
        if let Some(toast) = state.toasts.read().last() {
            let id = toast.id;
            Timeout::new(TOAST_DURATION_MS, move || {
                state.dismiss_toast(id);
            })
            .forget();
        }
    });

    rsx! {
        div {
            style: "position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 1000;",
            for toast in toasts.iter() {
                {
                    let id = toast.id;
                    let class_name = toast.kind.class();
                    let background = match toast.kind {
                        crate::state::ToastKind::Success => "#ecfdf5",
                        crate::state::ToastKind::Error => "#fef2f2",
                        crate::state::ToastKind::Info => "#eff6ff",
                    };
                    rsx! {
                        div {
                            key: "{id}",
                            class: "{class_name}",
                            style: "padding: 10px 16px; background: {background}; border: 1px solid #e5e7eb; border-radius: 6px; cursor: pointer; font-size: 13px;",
                            onclick: move |_| state.dismiss_toast(id),
                            "{toast.message}"
                        }
                    }
                }
            }
        }
    }
}
