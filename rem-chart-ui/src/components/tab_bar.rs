//! Horizontal tab strip writing the active tab id into a shared signal.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct TabBarProps {
    /// `(id, label)` pairs in display order.
    pub tabs: Vec<(String, String)>,
    /// The active tab id; clicking a tab writes it.
    pub active: Signal<String>,
}

#[component]
pub fn TabBar(props: TabBarProps) -> Element {
    let mut active = props.active;
    let current = active();

    rsx! {
        div {
            style: "display: flex; gap: 4px; border-bottom: 1px solid #e5e7eb; margin-bottom: 12px;",
            for (id, label) in props.tabs.iter() {
                {
                    let key_id = id.clone();
                    let id = id.clone();
                    let selected = id == current;
                    rsx! {
                        button {
                            key: "{key_id}",
                            style: if selected {
                                "padding: 8px 16px; border: none; border-bottom: 2px solid #2563eb; background: none; color: #2563eb; cursor: pointer;"
                            } else {
                                "padding: 8px 16px; border: none; background: none; color: #6b7280; cursor: pointer;"
                            },
                            onclick: move |_| active.set(id.clone()),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
