//! Terminal driver for the generation status tracker.
//!
//! Requests immediately, then once per interval, until the tracker reports a
//! terminal state. Failed requests are logged and polling carries on at the
//! same interval.

use tracing::warn;
use wire::{GenerationStatus, PollPolicy, StatusTracker, Transition};

use crate::api::ApiClient;
use crate::error::CliError;

/// Where status snapshots come from. Lets tests script a backend.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, screen_id: i64) -> Result<GenerationStatus, CliError>;
}

#[async_trait::async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, screen_id: i64) -> Result<GenerationStatus, CliError> {
        self.status(screen_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowOutcome {
    Completed(GenerationStatus),
    Failed(Option<String>),
}

/// Polls `screen_id` until it completes or fails, calling `on_change` for
/// every snapshot whose state differs from the previous one.
pub async fn follow<S, F>(source: &S, screen_id: i64, policy: PollPolicy, mut on_change: F) -> FollowOutcome
where
    S: StatusSource + ?Sized,
    F: FnMut(&GenerationStatus),
{
    let mut tracker = StatusTracker::new();
    let epoch = tracker.start(screen_id);

    while tracker.should_poll() {
        match source.fetch_status(screen_id).await {
            Ok(status) => {
                let snapshot = status.clone();
                match tracker.observe(epoch, status) {
                    Transition::Changed(_) => on_change(&snapshot),
                    Transition::Completed => {
                        on_change(&snapshot);
                        return FollowOutcome::Completed(snapshot);
                    }
                    Transition::Failed(message) => {
                        on_change(&snapshot);
                        return FollowOutcome::Failed(message);
                    }
                    Transition::Unchanged | Transition::Stale => {}
                }
            }
            Err(e) => {
                if tracker.record_error(epoch, e.to_string()) {
                    warn!(screen_id, error = %e, "status request failed; retrying");
                }
            }
        }
        tokio::time::sleep(policy.interval).await;
    }

    FollowOutcome::Failed(tracker.last_error().map(str::to_owned))
}

/// One-line rendering of a status snapshot.
#[must_use]
pub fn progress_line(status: &GenerationStatus) -> String {
    let mut line = format!("[{:>3}%] {}", status.progress(), status.generation_status.label());
    if let Some(message) = status.generation_message.as_deref().filter(|m| !m.trim().is_empty()) {
        line.push_str(" - ");
        line.push_str(message);
    }
    if let Some(retry) = status.retry_label() {
        line.push_str(&format!(" ({retry})"));
    }
    line
}

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;
