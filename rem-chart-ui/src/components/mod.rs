//! Reusable Dioxus RSX components for the dashboard apps.

mod chart_container;
mod chart_header;
mod error_display;
mod loading_spinner;
mod pagination;
mod search_box;
mod stat_card;
mod tab_bar;
mod toast_stack;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use pagination::Pagination;
pub use search_box::SearchBox;
pub use stat_card::StatCard;
pub use tab_bar::TabBar;
pub use toast_stack::ToastStack;
