use super::*;

fn screen(prototype: Option<&str>) -> Screen {
    serde_json::from_value(serde_json::json!({
        "id": 9,
        "menu_id": 2,
        "name": "Orders",
        "prototype_html": prototype,
        "status": "draft"
    }))
    .unwrap()
}

#[test]
fn open_lands_on_preview_only_with_a_prototype() {
    let mut state = WorkspaceState::default();
    state.open(screen(None), "Production".into());
    assert_eq!(state.tab, WorkspaceTab::Wizard);
    assert_eq!(state.screen_id(), Some(9));
    assert_eq!(state.screen_name(), "Orders");

    state.open(screen(Some("function Orders() {}")), "Production".into());
    assert_eq!(state.tab, WorkspaceTab::Preview);
}

#[test]
fn blank_prototype_counts_as_missing() {
    let mut state = WorkspaceState::default();
    state.open(screen(Some("  \n")), "Production".into());
    assert!(state.prototype().is_none());

    state.set_prototype("function Orders() {}".into());
    assert_eq!(state.prototype(), Some("function Orders() {}"));
    assert_eq!(state.tab, WorkspaceTab::Preview);
}

#[test]
fn begin_loading_forgets_previous_screen() {
    let mut state = WorkspaceState::default();
    state.open(screen(None), "Production".into());
    state.add_manual_shot(Screenshot { label: "Grid".into(), png: vec![1] });
    state.begin_loading();
    assert!(state.loading);
    assert!(state.screen.is_none());
    assert!(state.manual_shots.is_empty());
}

#[test]
fn capture_requires_mounted_preview() {
    let mut state = WorkspaceState::default();
    state.preview_status(RenderPhase::AwaitingRegistration, 12);
    assert!(!state.can_capture());
    state.preview_status(RenderPhase::Mounted, 13);
    assert!(state.can_capture());
    assert_eq!(state.preview_attempts, 13);
}

#[test]
fn only_one_document_at_a_time() {
    let mut state = WorkspaceState::default();
    assert!(state.begin_document(DocumentKind::Design));
    assert!(!state.begin_document(DocumentKind::TestPlan));

    state.document_saved(DocumentKind::Design, "Orders_design.docx");
    assert_eq!(state.notice.as_deref(), Some("Design document saved as Orders_design.docx"));
    assert!(state.begin_document(DocumentKind::TestPlan));

    state.document_failed(DocumentKind::TestPlan, "request failed with status 500".into());
    assert_eq!(state.error.as_deref(), Some("Test plan failed: request failed with status 500"));
    assert!(state.busy.is_none());
}

#[test]
fn markdown_documents_have_paths_and_suffixes() {
    assert_eq!(DocumentKind::TestPlan.generate_path(), Some("/api/ai/generate_test_plan"));
    assert_eq!(DocumentKind::Manual.markdown_kind(), Some("manual"));
    assert!(DocumentKind::Design.generate_path().is_none());
}

#[test]
fn manual_shots_remove_by_index_and_ignore_out_of_range() {
    let mut state = WorkspaceState::default();
    state.add_manual_shot(Screenshot { label: "A".into(), png: vec![1] });
    state.add_manual_shot(Screenshot { label: "B".into(), png: vec![2] });
    state.remove_manual_shot(5);
    state.remove_manual_shot(0);
    let labels: Vec<&str> = state.manual_shots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["B"]);
}
