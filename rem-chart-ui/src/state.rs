//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the cross-page reactive signals (current user, page
//! load flag, toast queue) into a single struct provided via
//! `use_context_provider`. Page-specific filter state stays local to each
//! app; only what every page shares lives here.

use dioxus::prelude::*;
use rem_api::models::User;

/// How long a toast stays up, in milliseconds.
pub const TOAST_DURATION_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Info => "toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Shared application state for all dashboard apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Logged-in user (None until the session guard resolves)
    pub user: Signal<Option<User>>,
    /// Whether the page is still in its initial load
    pub loading: Signal<bool>,
    /// Page-level fatal error, rendered instead of content
    pub error_msg: Signal<Option<String>>,
    /// Active toast notifications
    pub toasts: Signal<Vec<Toast>>,
    /// Toast id counter
    toast_seq: Signal<u64>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            user: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            toasts: Signal::new(Vec::new()),
            toast_seq: Signal::new(0),
        }
    }

    fn push_toast(&self, kind: ToastKind, message: impl Into<String>) {
        let mut seq = self.toast_seq;
        let mut toasts = self.toasts;
        let id = seq() + 1;
        seq.set(id);
        toasts.write().push(Toast {
            id,
            kind,
            message: message.into(),
        });
    }

    pub fn toast_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message);
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message);
    }

    pub fn toast_info(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Info, message);
    }

    pub fn dismiss_toast(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().retain(|t| t.id != id);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
