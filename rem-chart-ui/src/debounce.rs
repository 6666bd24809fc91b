//! Trailing-edge debounce for free-text inputs.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Delay between the last keystroke and the committed query.
pub const DEBOUNCE_MS: u32 = 300;

/// Each `run` cancels the previously scheduled callback, so a burst of
/// keystrokes fires exactly once, `delay_ms` after the last one, with
/// whatever value the final call captured.
#[derive(Clone, Default)]
pub struct Debouncer {
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self, delay_ms: u32, callback: impl FnOnce() + 'static) {
        let timeout = Timeout::new(delay_ms, callback);
        // Dropping the previous Timeout cancels it; an already-fired one
        // drops as a no-op.
        *self.pending.borrow_mut() = Some(timeout);
    }

    /// Cancel the pending callback, if any.
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}
