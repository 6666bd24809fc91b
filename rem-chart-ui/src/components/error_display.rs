//! Inline error panel, scoped to the region whose request failed.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// When present, renders a retry button.
    #[props(default)]
    pub on_retry: Option<EventHandler<()>>,
}

/// Displays an error message in a styled box, optionally with retry.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "加载失败：" }
            "{props.message}"
            if let Some(handler) = props.on_retry {
                button {
                    style: "margin-left: 12px; padding: 2px 10px; cursor: pointer;",
                    onclick: move |_| handler.call(()),
                    "重试"
                }
            }
        }
    }
}
