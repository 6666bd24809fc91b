//! Overview stat card (one number plus context).

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatCardProps {
    pub label: String,
    /// Pre-formatted value; `--` when the datum is absent.
    pub value: String,
    #[props(default = String::new())]
    pub sub: String,
}

#[component]
pub fn StatCard(props: StatCardProps) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-width: 160px; padding: 16px; background: #fff; border: 1px solid #e5e7eb; border-radius: 8px;",
            div {
                style: "font-size: 12px; color: #6b7280; margin-bottom: 6px;",
                "{props.label}"
            }
            div {
                style: "font-size: 24px; font-weight: 600; color: #1f2937;",
                "{props.value}"
            }
            if !props.sub.is_empty() {
                div {
                    style: "font-size: 12px; color: #9ca3af; margin-top: 4px;",
                    "{props.sub}"
                }
            }
        }
    }
}
