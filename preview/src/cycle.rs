//! Host-side model of one preview render.
//!
//! The mount loop itself runs inside the frame; the frame reports every phase
//! change back through `PREVIEW_STATUS` and [`RenderCycle::observe`] accepts
//! only the transitions the loop can legally make. Reports that belong to a
//! previous document (different content key) are dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::document::{PreviewDocument, build_document, content_key};

/// Bounds for the in-frame registration wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountPolicy {
    pub max_attempts: u32,
    pub retry_interval: Duration,
}

impl Default for MountPolicy {
    fn default() -> Self {
        Self { max_attempts: 50, retry_interval: Duration::from_millis(100) }
    }
}

impl MountPolicy {
    /// Upper bound on how long the frame waits before falling back.
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.retry_interval * self.max_attempts
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPhase {
    #[default]
    Idle,
    Sanitizing,
    Bootstrapping,
    AwaitingRegistration,
    Mounted,
    NotFound,
    EvalFallback,
    DiagnosticShown,
    Failed,
}

impl RenderPhase {
    /// Phases after which the frame never reports again for the same input.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Mounted | Self::DiagnosticShown | Self::Failed)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Generate code to see the prototype",
            Self::Sanitizing => "Preparing source",
            Self::Bootstrapping => "Loading runtime",
            Self::AwaitingRegistration => "Waiting for component",
            Self::Mounted => "Rendered",
            Self::NotFound => "Component not registered",
            Self::EvalFallback => "Retrying by name",
            Self::DiagnosticShown => "Component not found",
            Self::Failed => "Rendering error",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderCycle {
    policy: MountPolicy,
    phase: RenderPhase,
    attempts: u32,
    key: Option<String>,
}

impl RenderCycle {
    #[must_use]
    pub fn new(policy: MountPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    #[must_use]
    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn policy(&self) -> MountPolicy {
        self.policy
    }

    /// Starts a render for `source`.
    ///
    /// Returns the document to install, or `None` when the frame should be
    /// left alone: either the input is empty (the cycle returns to `Idle`) or
    /// the content key matches the document already installed.
    pub fn begin(&mut self, source: &str) -> Option<PreviewDocument> {
        if source.trim().is_empty() {
            self.clear();
            return None;
        }
        let key = content_key(source);
        if self.key.as_deref() == Some(key.as_str()) {
            return None;
        }

        self.phase = RenderPhase::Sanitizing;
        self.attempts = 0;
        let document = build_document(source, &self.policy);
        self.phase = RenderPhase::Bootstrapping;
        self.key = Some(document.content_key.clone());
        Some(document)
    }

    pub fn clear(&mut self) {
        self.phase = RenderPhase::Idle;
        self.attempts = 0;
        self.key = None;
    }

    /// Applies a phase report from the frame. Returns whether it was accepted.
    pub fn observe(&mut self, key: &str, phase: RenderPhase, attempts: u32) -> bool {
        if self.key.as_deref() != Some(key) || !self.allows(phase, attempts) {
            return false;
        }
        self.phase = phase;
        self.attempts = self.attempts.max(attempts);
        true
    }

    fn allows(&self, next: RenderPhase, attempts: u32) -> bool {
        use RenderPhase as P;

        let within_budget = attempts <= self.policy.max_attempts;
        match (self.phase, next) {
            (P::Bootstrapping, P::AwaitingRegistration) => attempts >= 1 && within_budget,
            (P::AwaitingRegistration, P::AwaitingRegistration) => attempts > self.attempts && within_budget,
            (P::AwaitingRegistration, P::NotFound) => attempts == self.policy.max_attempts,
            (P::Bootstrapping | P::AwaitingRegistration | P::EvalFallback, P::Mounted) => within_budget,
            (P::NotFound, P::EvalFallback | P::DiagnosticShown)
            | (P::EvalFallback, P::DiagnosticShown)
            | (P::Bootstrapping | P::AwaitingRegistration | P::EvalFallback | P::Mounted, P::Failed) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "cycle_test.rs"]
mod cycle_test;
