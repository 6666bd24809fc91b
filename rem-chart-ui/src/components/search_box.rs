//! Debounced free-text search input.
//!
//! Keystrokes update the local value immediately; the query is committed
//! to `on_query` only after input pauses for [`DEBOUNCE_MS`]. An empty
//! value commits immediately so the caller can close its dropdown.

use dioxus::prelude::*;

use crate::debounce::{Debouncer, DEBOUNCE_MS};

#[derive(Props, Clone, PartialEq)]
pub struct SearchBoxProps {
    #[props(default = String::new())]
    pub placeholder: String,
    /// Fired with the final input value once typing pauses.
    pub on_query: EventHandler<String>,
}

#[component]
pub fn SearchBox(props: SearchBoxProps) -> Element {
    let mut value = use_signal(String::new);
    let debouncer = use_hook(Debouncer::new);

    let on_input = move |evt: Event<FormData>| {
        let keyword = evt.value();
        value.set(keyword.clone());

        let keyword = keyword.trim().to_string();
        if keyword.is_empty() {
            debouncer.cancel();
            props.on_query.call(String::new());
            return;
        }
        let on_query = props.on_query;
        debouncer.run(DEBOUNCE_MS, move || {
            on_query.call(keyword);
        });
    };

    rsx! {
        input {
            r#type: "search",
            value: "{value}",
            placeholder: "{props.placeholder}",
            style: "padding: 6px 10px; border: 1px solid #d1d5db; border-radius: 6px; width: 220px;",
            oninput: on_input,
        }
    }
}
