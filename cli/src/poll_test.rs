use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use wire::GenerationState;

use super::*;

// =========================================================================
// ScriptedSource
// =========================================================================

struct ScriptedSource {
    replies: Mutex<VecDeque<Result<GenerationStatus, CliError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(replies: Vec<Result<GenerationStatus, CliError>>) -> Self {
        Self { replies: Mutex::new(replies.into()), calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_status(&self, screen_id: i64) -> Result<GenerationStatus, CliError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(status(screen_id, GenerationState::Running)))
    }
}

fn status(screen_id: i64, state: GenerationState) -> GenerationStatus {
    GenerationStatus { screen_id, generation_status: state, ..GenerationStatus::default() }
}

fn offline() -> CliError {
    CliError::Api(wire::ApiError::Network("connection refused".into()))
}

// =========================================================================
// follow
// =========================================================================

#[tokio::test(start_paused = true)]
async fn stops_at_completion_and_reports_each_change_once() {
    let source = ScriptedSource::new(vec![
        Ok(status(7, GenerationState::Pending)),
        Ok(status(7, GenerationState::Pending)),
        Ok(status(7, GenerationState::Running)),
        Ok(status(7, GenerationState::Completed)),
    ]);
    let mut seen = Vec::new();

    let outcome = follow(&source, 7, PollPolicy::default(), |s| seen.push(s.generation_status)).await;

    assert!(matches!(outcome, FollowOutcome::Completed(ref s) if s.screen_id == 7));
    assert_eq!(seen, vec![GenerationState::Pending, GenerationState::Running, GenerationState::Completed]);
    assert_eq!(source.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn failure_carries_backend_message() {
    let mut failed = status(7, GenerationState::Failed);
    failed.generation_message = Some("model overloaded".into());
    let source = ScriptedSource::new(vec![Ok(status(7, GenerationState::Running)), Ok(failed)]);

    let outcome = follow(&source, 7, PollPolicy::default(), |_| {}).await;

    assert_eq!(outcome, FollowOutcome::Failed(Some("model overloaded".into())));
}

#[tokio::test(start_paused = true)]
async fn request_errors_do_not_stop_polling() {
    let source = ScriptedSource::new(vec![Err(offline()), Err(offline()), Ok(status(7, GenerationState::Completed))]);

    let outcome = follow(&source, 7, PollPolicy::default(), |_| {}).await;

    assert!(matches!(outcome, FollowOutcome::Completed(_)));
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn polls_on_the_policy_interval() {
    let source = ScriptedSource::new(vec![
        Ok(status(1, GenerationState::Pending)),
        Ok(status(1, GenerationState::Completed)),
    ]);
    let started = tokio::time::Instant::now();

    follow(&source, 1, PollPolicy::default(), |_| {}).await;

    assert_eq!(started.elapsed(), PollPolicy::default().interval);
}

// =========================================================================
// progress_line
// =========================================================================

#[test]
fn progress_line_includes_message_and_retry_badge() {
    let mut s = status(3, GenerationState::WaitingQuota);
    s.generation_progress = 30;
    s.generation_message = Some("quota exhausted".into());
    s.retry_count = 2;
    let line = progress_line(&s);
    assert!(line.starts_with("[ 30%] "));
    assert!(line.contains(" - quota exhausted"));
    assert!(line.ends_with("(retry 2 / 10)"));
}

#[test]
fn progress_line_skips_blank_message() {
    let mut s = status(3, GenerationState::Completed);
    s.generation_progress = 100;
    s.generation_message = Some("  ".into());
    assert!(!progress_line(&s).contains(" - "));
}
