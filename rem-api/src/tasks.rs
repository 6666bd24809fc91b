//! Cancellable polling for async report-generation tasks.
//!
//! The server creates a task and the client polls `GET /reports/task/:id`
//! until it reaches a terminal state. The loop backs off exponentially,
//! gives up after a bounded number of attempts, and checks a cancel token
//! before every wait so the UI can abandon a generation cleanly.

use std::cell::Cell;
use std::rc::Rc;

use crate::client::ApiClient;
use crate::endpoints::reports;
use crate::error::ApiError;
use crate::models::{ReportTask, TaskStatus};
use crate::transport::Transport;

/// Shared cancellation flag; clone it into the UI's cancel button.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollOptions {
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Delay multiplier applied after each attempt.
    pub backoff: f64,
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1_000,
            max_delay_ms: 10_000,
            backoff: 1.5,
            max_attempts: 30,
        }
    }
}

/// The delay before each poll attempt, as a pure schedule.
pub fn poll_schedule(opts: &PollOptions) -> Vec<u64> {
    let mut delays = Vec::with_capacity(opts.max_attempts as usize);
    let mut delay = opts.initial_delay_ms as f64;
    for _ in 0..opts.max_attempts {
        delays.push(delay.min(opts.max_delay_ms as f64) as u64);
        delay *= opts.backoff;
    }
    delays
}

/// Outcome of a polling run that ended without a completed report.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEnd {
    Cancelled,
    TimedOut,
    Failed(String),
}

impl From<PollEnd> for ApiError {
    fn from(end: PollEnd) -> Self {
        match end {
            PollEnd::Cancelled => ApiError::RequestFailed {
                code: 0,
                message: "已取消".to_string(),
            },
            PollEnd::TimedOut => ApiError::RequestFailed {
                code: 0,
                message: "生成超时，请稍后在我的报告中查看".to_string(),
            },
            PollEnd::Failed(msg) => ApiError::RequestFailed {
                code: 0,
                message: msg,
            },
        }
    }
}

#[cfg(any(feature = "web", feature = "native"))]
async fn sleep_ms(ms: u64) {
    #[cfg(feature = "web")]
    {
        gloo_timers::future::TimeoutFuture::new(ms as u32).await;
    }
    #[cfg(all(feature = "native", not(feature = "web")))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// Poll a report task to completion.
///
/// `on_progress` fires after every successful status fetch so the UI can
/// render the task's progress bar. Individual transient fetch failures do
/// not abort the loop; they consume an attempt and the loop keeps going.
#[cfg(any(feature = "web", feature = "native"))]
pub async fn poll_report_task<T: Transport>(
    client: &ApiClient<T>,
    task_id: &str,
    opts: PollOptions,
    cancel: CancelToken,
    mut on_progress: impl FnMut(&ReportTask),
) -> Result<ReportTask, ApiError> {
    for delay in poll_schedule(&opts) {
        if cancel.is_cancelled() {
            return Err(PollEnd::Cancelled.into());
        }
        sleep_ms(delay).await;
        if cancel.is_cancelled() {
            return Err(PollEnd::Cancelled.into());
        }

        match reports::task_status(client, task_id).await {
            Ok(task) => {
                on_progress(&task);
                match task.status {
                    TaskStatus::Completed => return Ok(task),
                    TaskStatus::Failed => {
                        let msg = task
                            .error
                            .clone()
                            .unwrap_or_else(|| "报告生成失败".to_string());
                        return Err(PollEnd::Failed(msg).into());
                    }
                    TaskStatus::Pending | TaskStatus::Processing => {}
                }
            }
            // Session loss is terminal; anything else is transient here.
            Err(ApiError::AuthExpired) => return Err(ApiError::AuthExpired),
            Err(err) => log::warn!("task {task_id}: status poll failed: {err}"),
        }
    }

    Err(PollEnd::TimedOut.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_monotone_and_capped() {
        let opts = PollOptions {
            initial_delay_ms: 1_000,
            max_delay_ms: 8_000,
            backoff: 2.0,
            max_attempts: 6,
        };
        let delays = poll_schedule(&opts);
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 8_000, 8_000]);
    }

    #[test]
    fn schedule_length_matches_max_attempts() {
        let opts = PollOptions::default();
        assert_eq!(poll_schedule(&opts).len(), opts.max_attempts as usize);
    }

    #[test]
    fn unit_backoff_keeps_a_fixed_interval() {
        let opts = PollOptions {
            initial_delay_ms: 2_000,
            max_delay_ms: 10_000,
            backoff: 1.0,
            max_attempts: 4,
        };
        assert_eq!(poll_schedule(&opts), vec![2_000; 4]);
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
