use super::*;
use wire::WizardData;
use wire::wizard::{ComponentType, LayoutType};

fn draft(has_draft: bool) -> WizardDraft {
    let mut data = WizardData::default();
    data.step1.screen_name = "Saved orders".into();
    WizardDraft {
        has_draft,
        wizard_data: Some(data),
        saved_at: Some("2026-10-01T09:00:00".into()),
        screen_name: None,
        menu_name: None,
    }
}

fn ready_state() -> WizardState {
    let mut state = WizardState::default();
    state.open_screen(4, "Orders");
    state.wizard.select_builtin_layout(LayoutType::SearchGrid);
    state.wizard.go_to_step(5);
    state
}

#[test]
fn open_screen_prefills_name_and_clears_previous_screen() {
    let mut state = WizardState::default();
    state.open_screen(1, "First");
    state.wizard.go_to_step(3);
    state.error = Some("old".into());

    state.open_screen(2, "Second");
    assert_eq!(state.screen_id, Some(2));
    assert_eq!(state.wizard.current_step(), 1);
    assert_eq!(state.wizard.data().step1.screen_name, "Second");
    assert!(state.error.is_none());
}

#[test]
fn only_flagged_drafts_are_offered() {
    let mut state = WizardState::default();
    assert!(!state.offer_draft(draft(false)));
    assert!(state.pending_draft.is_none());
    assert!(state.offer_draft(draft(true)));
}

#[test]
fn restore_replaces_aggregate_and_returns_to_first_step() {
    let mut state = WizardState::default();
    state.open_screen(1, "Orders");
    state.wizard.go_to_step(4);
    state.offer_draft(draft(true));

    state.restore_draft();
    assert!(state.pending_draft.is_none());
    assert_eq!(state.wizard.current_step(), 1);
    assert_eq!(state.wizard.data().step1.screen_name, "Saved orders");
    assert_eq!(state.notice.as_deref(), Some("Draft restored (saved 2026-10-01T09:00:00)"));
}

#[test]
fn discard_keeps_fresh_wizard() {
    let mut state = WizardState::default();
    state.open_screen(1, "Orders");
    state.offer_draft(draft(true));
    state.discard_draft();
    state.restore_draft();
    assert_eq!(state.wizard.data().step1.screen_name, "Orders");
}

#[test]
fn save_lifecycle_reports_size_or_error() {
    let mut state = WizardState::default();
    assert!(!state.begin_save());

    state.open_screen(1, "Orders");
    assert!(state.begin_save());
    assert!(!state.begin_save());
    state.draft_saved(&DraftSaveResponse { data_size: 512, saved_at: None });
    assert!(!state.saving);
    assert_eq!(state.notice.as_deref(), Some("Draft saved (512 bytes)"));

    state.begin_save();
    state.draft_failed("network error: offline".into());
    assert_eq!(state.error.as_deref(), Some("Draft save failed: network error: offline"));
}

#[test]
fn edit_records_rule_violations() {
    let mut state = ready_state();
    let added = state.edit(|w| w.add_component(ComponentType::Button, "Search"));
    assert!(added.is_none());
    assert_eq!(state.error.as_deref(), Some("select a layout area before adding components"));

    state.edit(|w| w.select_area("search-area"));
    assert!(state.error.is_none());
    assert!(state.edit(|w| w.add_component(ComponentType::Button, "Search")).is_some());
}

#[test]
fn generate_request_requires_review_step_and_screen() {
    let mut state = ready_state();
    let request = state.generate_request("Production").unwrap();
    assert_eq!(request.screen_id, 4);
    assert_eq!(request.menu_name, "Production");
    assert_eq!(request.screen_name, "Orders");
    assert!(request.wizard_data.is_some());

    state.wizard.go_to_step(2);
    assert!(state.generate_request("Production").is_none());

    let unbound = WizardState::default();
    assert!(unbound.generate_request("Production").is_none());
}
