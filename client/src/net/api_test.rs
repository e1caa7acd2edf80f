use super::*;

#[test]
fn failure_message_uses_backend_detail() {
    assert_eq!(failure_message(404, r#"{"detail":"screen not found"}"#), "not found: screen not found");
}

#[test]
fn generate_failure_message_explains_missing_wizard_data() {
    let msg = generate_failure_message(502, r#"{"detail":{"error_type":"missing_wizard_data"}}"#);
    assert!(msg.starts_with("wizard data is required"));
}

#[test]
fn generate_failure_message_reports_quota() {
    assert_eq!(generate_failure_message(429, ""), "AI API quota exceeded, try again shortly");
}

#[test]
fn stored_design_404_has_its_own_wording() {
    assert_eq!(stored_design_failure_message(404, ""), "no design document has been generated yet");
    assert_eq!(stored_design_failure_message(500, ""), "request failed with status 500");
}

#[test]
fn network_message_prefixes_transport_errors() {
    assert_eq!(network_message("connection refused"), "network error: connection refused");
}

#[test]
fn menu_delete_without_detail_explains_attached_screens() {
    assert_eq!(menu_delete_failure_message(400, ""), "the menu still has screens and cannot be deleted");
    assert_eq!(
        menu_delete_failure_message(400, r#"{"detail":"Menu has 2 screens"}"#),
        "Menu has 2 screens"
    );
    assert_eq!(menu_delete_failure_message(404, r#"{"detail":"Menu 9"}"#), "not found: Menu 9");
}
