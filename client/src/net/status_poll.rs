//! Generation status polling.
//!
//! SYSTEM CONTEXT
//! ==============
//! After the generate request is acknowledged, the workspace page hands the
//! job's epoch to [`poll_job`]. The loop asks the backend right away, then
//! once per [`PollPolicy::interval`], until the job settles or the host stops
//! wanting updates (dialog closed, page left, job restarted).
//!
//! Request and timer live behind [`PollHost`] so the browser supplies
//! `gloo-net`/`gloo-timers` and tests supply a scripted backend on a virtual
//! clock.

#[cfg(test)]
#[path = "status_poll_test.rs"]
mod status_poll_test;

use std::time::Duration;

use wire::{GenerationStatus, PollPolicy, Transition};

pub trait PollHost {
    /// Whether another request for `epoch` is still wanted.
    fn keeps_polling(&self, epoch: u64) -> bool;
    fn apply(&self, epoch: u64, status: GenerationStatus) -> Transition;
    fn poll_failed(&self, epoch: u64, error: &str);
    fn fetch(&self, screen_id: i64) -> impl Future<Output = Result<GenerationStatus, String>>;
    fn pause(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Polls `screen_id` until the job completes or fails, returning that
/// transition. Returns `None` when the host gave up on the job first.
pub async fn poll_job<H: PollHost>(
    host: &H,
    screen_id: i64,
    epoch: u64,
    policy: &PollPolicy,
) -> Option<Transition> {
    while host.keeps_polling(epoch) {
        let reply = host.fetch(screen_id).await;
        if !host.keeps_polling(epoch) {
            break;
        }
        match reply {
            Ok(status) => match host.apply(epoch, status) {
                terminal @ (Transition::Completed | Transition::Failed(_)) => return Some(terminal),
                Transition::Stale | Transition::Unchanged | Transition::Changed(_) => {}
            },
            Err(e) => {
                log::debug!("status poll: screen {screen_id} request failed: {e}");
                host.poll_failed(epoch, &e);
            }
        }
        host.pause(policy.interval).await;
    }
    None
}
