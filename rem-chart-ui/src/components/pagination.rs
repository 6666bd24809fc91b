//! Page-button strip rendered from a computed page window.

use dioxus::prelude::*;
use rem_data::paging::{PageItem, PageWindow};

#[derive(Props, Clone, PartialEq)]
pub struct PaginationProps {
    pub window: PageWindow,
    pub on_page: EventHandler<u32>,
}

#[component]
pub fn Pagination(props: PaginationProps) -> Element {
    let w = props.window.clone();
    let prev = w.current.saturating_sub(1);
    let next = w.current + 1;

    rsx! {
        div {
            style: "display: flex; gap: 6px; justify-content: center; margin: 12px 0;",
            button {
                disabled: !w.has_prev,
                onclick: move |_| props.on_page.call(prev),
                "上一页"
            }
            for (i, item) in w.items.iter().enumerate() {
                {match item {
                    PageItem::Page(page) => {
                        let page = *page;
                        let active = page == w.current;
                        rsx! {
                            button {
                                key: "{i}",
                                style: if active { "font-weight: 700; border-color: #2563eb;" } else { "" },
                                onclick: move |_| props.on_page.call(page),
                                "{page}"
                            }
                        }
                    }
                    PageItem::Ellipsis => rsx! {
                        span {
                            key: "{i}",
                            style: "color: #9ca3af; align-self: center;",
                            "…"
                        }
                    },
                }}
            }
            button {
                disabled: !w.has_next,
                onclick: move |_| props.on_page.call(next),
                "下一页"
            }
        }
    }
}
