//! Per-panel load state and stale-response protection.
//!
//! Each independently loaded UI region (a chart, a list, a stat block)
//! owns one `PanelState` and one `PanelSeq`. Every outgoing request takes
//! a ticket; when the response lands, it is applied only if its ticket is
//! still the latest issued for that panel. A slow response superseded by a
//! newer request is dropped instead of overwriting fresher state.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Monotonically increasing request sequence for one panel.
#[derive(Debug, Clone, Default)]
pub struct PanelSeq(Rc<Cell<u64>>);

impl PanelSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a request about to be issued. Issuing invalidates
    /// every earlier ticket.
    pub fn issue(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    /// Whether a response holding `ticket` may still be applied.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let seq = PanelSeq::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first), "superseded response must be dropped");
        assert!(seq.is_current(second));
    }

    #[test]
    fn clones_share_the_counter() {
        let seq = PanelSeq::new();
        let handle = seq.clone();
        let ticket = seq.issue();
        assert!(handle.is_current(ticket));
        handle.issue();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn panel_state_accessors() {
        let loading: PanelState<i32> = PanelState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.ready(), None);

        let ready = PanelState::Ready(5);
        assert_eq!(ready.ready(), Some(&5));

        let failed: PanelState<i32> = PanelState::Failed("网络连接失败".to_string());
        assert_eq!(failed.error(), Some("网络连接失败"));
    }
}
