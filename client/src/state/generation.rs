//! Generation progress as shown by the progress dialog.
//!
//! SYSTEM CONTEXT
//! ==============
//! The workspace page starts generation, then a `spawn_local` loop polls
//! `/api/ai/status/{id}` and feeds each result through [`GenerationView::apply`].
//! The loop captures the epoch returned by [`GenerationView::begin`]; once the
//! job is reset, late responses carrying an old epoch are dropped by the
//! tracker.

#[cfg(test)]
#[path = "generation_test.rs"]
mod generation_test;

use wire::api::GenerateReply;
use wire::status::{PROGRESS_STEPS, ProgressStep, StepProgress, step_progress};
use wire::{GenerationState, GenerationStatus, StatusTracker, Transition};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationView {
    pub tracker: StatusTracker,
    pub dialog_open: bool,
    /// The generate request itself is still in flight.
    pub starting: bool,
    pub ack_message: Option<String>,
    pub error: Option<String>,
    /// Bumped once per completion so the workspace reloads the screen.
    pub completed_seq: u64,
}

impl GenerationView {
    /// Open the dialog for a new job and return its epoch.
    pub fn begin(&mut self, screen_id: i64) -> u64 {
        self.dialog_open = true;
        self.starting = true;
        self.ack_message = None;
        self.error = None;
        self.tracker.start(screen_id)
    }

    /// Record the reply to the generate request. Returns the prototype when
    /// the backend answered synchronously, in which case there is nothing to
    /// poll.
    pub fn started(&mut self, epoch: u64, reply: GenerateReply) -> Option<String> {
        if epoch != self.tracker.epoch() {
            return None;
        }
        self.starting = false;
        match reply {
            GenerateReply::Started(ack) => {
                self.ack_message = Some(ack.message).filter(|m| !m.trim().is_empty());
                None
            }
            GenerateReply::Finished(response) => {
                self.tracker.disable();
                self.completed_seq += 1;
                response.prototype_html
            }
        }
    }

    pub fn start_failed(&mut self, epoch: u64, error: String) {
        if epoch != self.tracker.epoch() {
            return;
        }
        self.starting = false;
        self.tracker.disable();
        self.error = Some(error);
    }

    /// Feed one poll result.
    pub fn apply(&mut self, epoch: u64, status: GenerationStatus) -> Transition {
        let transition = self.tracker.observe(epoch, status);
        match &transition {
            Transition::Completed => {
                self.completed_seq += 1;
                self.error = None;
            }
            Transition::Failed(message) => {
                self.error = Some(message.clone().unwrap_or_else(|| "Generation failed".to_owned()));
            }
            Transition::Changed(_) | Transition::Unchanged | Transition::Stale => {}
        }
        transition
    }

    /// Record a failed poll request; polling continues.
    pub fn poll_failed(&mut self, epoch: u64, error: &str) {
        self.tracker.record_error(epoch, error);
    }

    /// Whether the poll loop for `epoch` should issue another request.
    #[must_use]
    pub fn keeps_polling(&self, epoch: u64) -> bool {
        epoch == self.tracker.epoch() && self.tracker.should_poll()
    }

    /// Close the dialog. Closing mid-run stops polling.
    pub fn close(&mut self) {
        self.dialog_open = false;
        self.starting = false;
        if self.tracker.should_poll() {
            self.tracker.disable();
        }
    }

    #[must_use]
    pub fn latest(&self) -> Option<&GenerationStatus> {
        self.tracker.latest()
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.latest().map_or(0, GenerationStatus::progress)
    }

    /// Nothing left to wait for: finished, failed, or never started.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.starting && !self.tracker.should_poll()
    }

    /// Header label and tone for the dialog.
    #[must_use]
    pub fn headline(&self) -> (&'static str, &'static str) {
        if self.error.is_some() {
            let failed = GenerationState::Failed;
            return (failed.label(), failed.tone());
        }
        if let Some(status) = self.latest() {
            return (status.generation_status.label(), status.generation_status.tone());
        }
        if self.starting {
            return ("Sending generation request", "active");
        }
        let state = if self.is_settled() { GenerationState::Completed } else { GenerationState::Pending };
        (state.label(), state.tone())
    }

    /// Checklist rows for the dialog.
    #[must_use]
    pub fn checklist(&self) -> Vec<(ProgressStep, StepProgress)> {
        PROGRESS_STEPS.iter().map(|step| (*step, step_progress(self.latest(), step.id))).collect()
    }
}
