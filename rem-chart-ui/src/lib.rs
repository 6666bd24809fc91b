//! Shared Dioxus components and ECharts bridge for the dashboard apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the ECharts instance registry via `js_sys::eval()`
//! - `options`: pure chart-option builders (aggregate in, `serde_json::Value` out)
//! - `state`: reactive AppState with Dioxus Signals and a toast queue
//! - `panel`: per-panel load state and stale-response sequence tickets
//! - `debounce`: trailing-edge debouncer for free-text inputs
//! - `components`: reusable RSX components (cards, containers, pager, tabs)

pub mod components;
pub mod debounce;
pub mod js_bridge;
pub mod options;
pub mod panel;
pub mod state;
