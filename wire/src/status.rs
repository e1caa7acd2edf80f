//! Generation job status and the poll-side transition tracker.
//!
//! SYSTEM CONTEXT
//! ==============
//! Generation runs asynchronously on the backend. Clients poll
//! `GET /api/ai/status/{screen_id}` on a fixed interval and must fire their
//! "completed" side effects exactly once per transition into `completed`.
//!
//! DESIGN
//! ======
//! [`StatusTracker`] holds the only memory the poll loop needs: the last
//! observed state and a job epoch. Every (re)start bumps the epoch, so a
//! response belonging to an abandoned job is recognised and dropped when it
//! finally resolves. The tracker does no I/O; the browser and CLI drivers own
//! their timers.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay between status requests.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Retry ceiling the backend applies while waiting for quota. Display only.
pub const MAX_QUOTA_RETRIES: u32 = 10;

/// Backend generation state. Unrecognised values map to `Unknown` so a new
/// backend state never breaks polling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
    Idle,
    Pending,
    Running,
    SavingWizard,
    RequestingAi,
    WaitingQuota,
    Generating,
    Validating,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl GenerationState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::SavingWizard => "saving_wizard",
            Self::RequestingAi => "requesting_ai",
            Self::WaitingQuota => "waiting_quota",
            Self::Generating => "generating",
            Self::Validating => "validating",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Human label for the progress dialog header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle | Self::Pending | Self::Unknown => "Waiting to start",
            Self::Running | Self::Generating => "Generating prototype",
            Self::SavingWizard => "Saving wizard data",
            Self::RequestingAi => "Sending AI request",
            Self::WaitingQuota => "Waiting for API quota",
            Self::Validating => "Validating output",
            Self::Completed => "Generation complete",
            Self::Failed => "Generation failed",
        }
    }

    /// Colour family used for the progress bar and status icon.
    #[must_use]
    pub fn tone(self) -> &'static str {
        match self {
            Self::Completed => "success",
            Self::Failed => "error",
            Self::WaitingQuota => "warning",
            _ => "active",
        }
    }
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /api/ai/status/{screen_id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub screen_id: i64,
    pub generation_status: GenerationState,
    #[serde(default)]
    pub generation_progress: u8,
    #[serde(default)]
    pub generation_message: Option<String>,
    #[serde(default)]
    pub generation_step: u8,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub has_prototype: bool,
}

impl GenerationStatus {
    /// Progress clamped to `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.generation_progress.min(100)
    }

    /// `retry N / 10` badge text while waiting for quota.
    #[must_use]
    pub fn retry_label(&self) -> Option<String> {
        (self.generation_status == GenerationState::WaitingQuota)
            .then(|| format!("retry {} / {MAX_QUOTA_RETRIES}", self.retry_count))
    }
}

/// One row of the four-step progress checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressStep {
    pub id: u8,
    pub name: &'static str,
    pub min_progress: u8,
}

pub const PROGRESS_STEPS: [ProgressStep; 4] = [
    ProgressStep { id: 1, name: "Save wizard data", min_progress: 0 },
    ProgressStep { id: 2, name: "AI API request", min_progress: 25 },
    ProgressStep { id: 3, name: "AI code generation", min_progress: 50 },
    ProgressStep { id: 4, name: "Validation and completion", min_progress: 85 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepProgress {
    Pending,
    InProgress,
    Completed,
}

/// Checklist state of `step_id` given the latest status (if any).
#[must_use]
pub fn step_progress(status: Option<&GenerationStatus>, step_id: u8) -> StepProgress {
    let Some(status) = status else {
        return StepProgress::Pending;
    };
    if status.generation_status == GenerationState::Completed || status.generation_step > step_id {
        StepProgress::Completed
    } else if status.generation_step == step_id {
        StepProgress::InProgress
    } else {
        StepProgress::Pending
    }
}

/// Timing knobs for the poll loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Delay between observing `completed` and closing the progress dialog.
    pub completion_linger: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            completion_linger: Duration::from_millis(1500),
        }
    }
}

/// Outcome of feeding one poll result into the tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Response belongs to a job that was reset; ignore it.
    Stale,
    /// Same state as last time.
    Unchanged,
    /// Moved to a new non-terminal state.
    Changed(GenerationState),
    /// Moved into `completed`. Reported once per transition.
    Completed,
    /// Moved into `failed`.
    Failed(Option<String>),
}

/// Remembers the previous status of the current job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTracker {
    job: Option<i64>,
    epoch: u64,
    previous: Option<GenerationState>,
    latest: Option<GenerationStatus>,
    last_error: Option<String>,
    stopped: bool,
}

impl StatusTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking `job`. Always clears the remembered status and returns
    /// the epoch the caller must attach to its requests.
    pub fn start(&mut self, job: i64) -> u64 {
        self.job = Some(job);
        self.reset_memory();
        self.epoch
    }

    /// Stop tracking (polling disabled). Clears the remembered status.
    pub fn disable(&mut self) {
        self.job = None;
        self.reset_memory();
    }

    fn reset_memory(&mut self) {
        self.epoch += 1;
        self.previous = None;
        self.latest = None;
        self.last_error = None;
        self.stopped = false;
    }

    #[must_use]
    pub fn job(&self) -> Option<i64> {
        self.job
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the driver should issue another request.
    #[must_use]
    pub fn should_poll(&self) -> bool {
        self.job.is_some() && !self.stopped
    }

    #[must_use]
    pub fn latest(&self) -> Option<&GenerationStatus> {
        self.latest.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record a successful poll response taken under `epoch`.
    pub fn observe(&mut self, epoch: u64, status: GenerationStatus) -> Transition {
        if epoch != self.epoch || self.job.is_none() {
            return Transition::Stale;
        }
        let state = status.generation_status;
        let changed = self.previous != Some(state);
        let message = status.generation_message.clone();
        self.previous = Some(state);
        self.last_error = None;
        self.latest = Some(status);
        if state.is_terminal() {
            self.stopped = true;
        }

        if !changed {
            return Transition::Unchanged;
        }
        match state {
            GenerationState::Completed => Transition::Completed,
            GenerationState::Failed => Transition::Failed(message),
            other => Transition::Changed(other),
        }
    }

    /// Record a failed request taken under `epoch`. Polling continues.
    /// Returns `false` when the error belongs to an abandoned job.
    pub fn record_error(&mut self, epoch: u64, message: impl Into<String>) -> bool {
        if epoch != self.epoch || self.job.is_none() {
            return false;
        }
        self.last_error = Some(message.into());
        true
    }
}
