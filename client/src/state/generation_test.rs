use super::*;
use wire::api::{GenerateAck, GenerateResponse};

fn status(state: GenerationState, step: u8, progress: u8) -> GenerationStatus {
    GenerationStatus {
        screen_id: 3,
        generation_status: state,
        generation_progress: progress,
        generation_step: step,
        ..GenerationStatus::default()
    }
}

fn ack() -> GenerateReply {
    GenerateReply::Started(GenerateAck {
        screen_id: 3,
        message: "Generation started".into(),
        started: true,
        previous_prototype_cleared: true,
    })
}

#[test]
fn begin_opens_dialog_and_polls() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    assert!(view.dialog_open);
    assert!(view.starting);
    assert!(view.keeps_polling(epoch));
    assert!(!view.is_settled());
}

#[test]
fn ack_keeps_polling_until_completed() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    assert!(view.started(epoch, ack()).is_none());
    assert_eq!(view.ack_message.as_deref(), Some("Generation started"));

    view.apply(epoch, status(GenerationState::Generating, 3, 60));
    assert_eq!(view.progress(), 60);
    assert!(view.keeps_polling(epoch));

    assert_eq!(view.apply(epoch, status(GenerationState::Completed, 4, 100)), Transition::Completed);
    assert_eq!(view.completed_seq, 1);
    assert!(!view.keeps_polling(epoch));
    assert!(view.is_settled());
}

#[test]
fn synchronous_reply_completes_immediately() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    let reply = GenerateReply::Finished(GenerateResponse {
        prototype_html: Some("function App() { return null; }".into()),
        ..GenerateResponse::default()
    });
    assert_eq!(view.started(epoch, reply).as_deref(), Some("function App() { return null; }"));
    assert_eq!(view.completed_seq, 1);
    assert!(!view.keeps_polling(epoch));
}

#[test]
fn start_failure_shows_error_and_stops() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    view.start_failed(epoch, "AI API quota exceeded, try again shortly".into());
    assert_eq!(view.error.as_deref(), Some("AI API quota exceeded, try again shortly"));
    assert!(view.is_settled());
}

#[test]
fn failed_status_without_message_gets_generic_text() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    view.started(epoch, ack());
    view.apply(epoch, status(GenerationState::Failed, 3, 50));
    assert_eq!(view.error.as_deref(), Some("Generation failed"));
    assert_eq!(view.completed_seq, 0);
}

#[test]
fn poll_errors_do_not_stop_polling() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    view.poll_failed(epoch, "network error: offline");
    assert!(view.keeps_polling(epoch));
    assert_eq!(view.tracker.last_error(), Some("network error: offline"));
}

#[test]
fn restarted_job_drops_results_of_the_old_loop() {
    let mut view = GenerationView::default();
    let old = view.begin(3);
    let new = view.begin(3);
    assert!(!view.keeps_polling(old));
    assert!(view.started(old, ack()).is_none());
    assert!(view.starting);
    assert_eq!(view.apply(old, status(GenerationState::Completed, 4, 100)), Transition::Stale);
    assert_eq!(view.completed_seq, 0);
    assert!(view.keeps_polling(new));
}

#[test]
fn closing_mid_run_stops_polling() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    view.close();
    assert!(!view.dialog_open);
    assert!(!view.keeps_polling(epoch));
}

#[test]
fn checklist_follows_generation_step() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    view.apply(epoch, status(GenerationState::RequestingAi, 2, 30));
    let rows: Vec<StepProgress> = view.checklist().into_iter().map(|(_, p)| p).collect();
    assert_eq!(
        rows,
        vec![StepProgress::Completed, StepProgress::InProgress, StepProgress::Pending, StepProgress::Pending]
    );
}

#[test]
fn headline_tracks_request_status_and_errors() {
    let mut view = GenerationView::default();
    let epoch = view.begin(3);
    assert_eq!(view.headline(), ("Sending generation request", "active"));

    view.started(epoch, ack());
    view.apply(epoch, status(GenerationState::WaitingQuota, 2, 30));
    assert_eq!(view.headline(), ("Waiting for API quota", "warning"));

    view.apply(epoch, status(GenerationState::Failed, 2, 30));
    assert_eq!(view.headline(), ("Generation failed", "error"));
}
