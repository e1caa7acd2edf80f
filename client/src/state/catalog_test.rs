use super::*;

#[test]
fn default_state_already_offers_builtin_catalog() {
    let state = CatalogState::default();
    assert!(!state.loaded);
    assert_eq!(state.catalog.layouts.len(), 5);
    assert_eq!(state.catalog.actions.len(), 6);
}

#[test]
fn begin_load_runs_once() {
    let mut state = CatalogState::default();
    assert!(state.begin_load());
    assert!(!state.begin_load());
    state.loaded(&WizardResources::default());
    assert!(!state.begin_load());
}

#[test]
fn empty_backend_collections_raise_fallback_notice() {
    let mut state = CatalogState::default();
    state.begin_load();
    state.loaded(&WizardResources::default());
    assert!(!state.loading);
    assert_eq!(state.notice.as_deref(), Some(FALLBACK_NOTICE));
}

#[test]
fn load_failure_keeps_builtin_tables_and_explains() {
    let mut state = CatalogState::default();
    state.begin_load();
    state.load_failed("network error: offline");
    assert!(state.catalog.used_fallback);
    assert_eq!(state.catalog.components.len(), 18);
    assert!(state.notice.as_deref().is_some_and(|n| n.contains("network error: offline")));
}
