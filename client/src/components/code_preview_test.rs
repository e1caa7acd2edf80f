use super::*;

#[test]
fn manual_label_defaults_to_numbered_capture() {
    assert_eq!(manual_label("   ", 2), "Capture 3");
    assert_eq!(manual_label(" Filter panel ", 2), "Filter panel");
}

#[test]
fn phase_text_shows_attempts_while_waiting() {
    assert!(phase_text(RenderPhase::AwaitingRegistration, 7, "Orders").ends_with("(7)"));
    assert!(phase_text(RenderPhase::Mounted, 7, "Orders").ends_with("<Orders/>"));
    assert_eq!(phase_text(RenderPhase::Idle, 0, ""), RenderPhase::Idle.label());
}

#[test]
fn terminal_failures_have_error_tone() {
    assert_eq!(phase_tone(RenderPhase::Mounted), "ok");
    assert_eq!(phase_tone(RenderPhase::DiagnosticShown), "error");
    assert_eq!(phase_tone(RenderPhase::EvalFallback), "busy");
}
