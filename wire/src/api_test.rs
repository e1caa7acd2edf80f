use super::*;

#[test]
fn endpoint_paths_format_ids() {
    assert_eq!(status_path(12), "/api/ai/status/12");
    assert_eq!(wizard_draft_path(12), "/api/ai/screens/12/wizard-draft");
    assert_eq!(design_download_path(12), "/api/ai/screens/12/documents/design/download");
    assert_eq!(screen_approve_path(5), "/api/screens/5/approve");
}

#[test]
fn resource_collection_path_has_no_query() {
    assert_eq!(resource_collection_path(ResourceKind::Layouts), "/api/resources/layouts");
}

#[test]
fn resource_list_path_applies_query() {
    assert_eq!(
        resource_list_path(ResourceKind::Components, false, None),
        "/api/resources/components?include_inactive=false"
    );
    assert_eq!(
        resource_list_path(ResourceKind::Actions, true, Some("data fetch")),
        "/api/resources/actions?include_inactive=true&category=data%20fetch"
    );
}

#[test]
fn generate_reply_accepts_ack_and_legacy_shapes() {
    let ack: GenerateReply = serde_json::from_str(
        r#"{"screen_id":4,"message":"started","started":true,"previous_prototype_cleared":true}"#,
    )
    .unwrap();
    assert!(matches!(ack, GenerateReply::Started(GenerateAck { screen_id: 4, started: true, .. })));

    let legacy: GenerateReply = serde_json::from_str(r##"{"prototype_html":"<div/>","design_doc":"# Doc"}"##).unwrap();
    match legacy {
        GenerateReply::Finished(resp) => assert_eq!(resp.prototype_html.as_deref(), Some("<div/>")),
        GenerateReply::Started(_) => panic!("expected legacy response"),
    }
}

#[test]
fn generate_request_omits_absent_prompt() {
    let req = GenerateRequest {
        screen_id: 1,
        prompt: None,
        wizard_data: Some(WizardData::default()),
        menu_name: "Production".into(),
        screen_name: "Orders".into(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert!(json.get("prompt").is_none());
    assert!(json["wizard_data"]["step1"].is_object());
}

#[test]
fn document_text_prefers_specific_fields() {
    let resp = GenerateResponse { design_doc: Some("design".into()), test_plan: Some("plan".into()), ..Default::default() };
    assert_eq!(resp.document_text(), Some("plan"));
    let blank = GenerateResponse { design_doc: Some("   ".into()), ..Default::default() };
    assert_eq!(blank.document_text(), None);
}

#[test]
fn draft_is_restorable_only_when_flagged() {
    let draft: WizardDraft =
        serde_json::from_str(r#"{"has_draft":false,"wizard_data":{"step1":{"screenName":"x","description":""}}}"#)
            .unwrap();
    assert!(draft.restorable().is_none());

    let draft: WizardDraft = serde_json::from_str(r#"{"has_draft":true,"wizard_data":{}}"#).unwrap();
    assert!(draft.restorable().is_some());
}

#[test]
fn flatten_menus_orders_by_index_and_tracks_depth() {
    let raw = r#"[
        {"id":2,"name":"Quality","is_folder":true,"order_index":2,"children":[]},
        {"id":1,"name":"Production","is_folder":true,"order_index":1,"children":[
            {"id":3,"name":"Orders","order_index":1}
        ]}
    ]"#;
    let menus: Vec<Menu> = serde_json::from_str(raw).unwrap();
    let flat: Vec<(usize, &str)> = flatten_menus(&menus).into_iter().map(|(d, m)| (d, m.name.as_str())).collect();
    assert_eq!(flat, vec![(0, "Production"), (1, "Orders"), (0, "Quality")]);
}

#[test]
fn screen_status_accepts_in_review() {
    let screen: Screen = serde_json::from_str(r#"{"id":1,"menu_id":2,"name":"A","status":"in_review"}"#).unwrap();
    assert_eq!(screen.status, ScreenStatus::InReview);
}

fn listing(raw: &str) -> Vec<Menu> {
    let list: crate::catalog::ListResponse<Menu> = serde_json::from_str(raw).unwrap();
    build_menu_tree(list.items)
}

#[test]
fn flat_listing_nests_children_under_parent() {
    let tree = listing(
        r#"{"total":4,"items":[
            {"id":3,"name":"Orders","parent_id":1,"order_index":1},
            {"id":1,"name":"Production","is_folder":true,"parent_id":null,"order_index":1},
            {"id":4,"name":"Lots","parent_id":1,"order_index":0},
            {"id":9,"name":"Orphan","parent_id":42,"order_index":0}
        ]}"#,
    );
    let flat: Vec<(usize, &str)> = flatten_menus(&tree).into_iter().map(|(d, m)| (d, m.name.as_str())).collect();
    assert_eq!(flat, vec![(0, "Production"), (1, "Lots"), (1, "Orders")]);
    assert_eq!(tree[0].children.as_ref().map(Vec::len), Some(2));
}

#[test]
fn new_folder_goes_after_existing_roots() {
    let tree = listing(
        r#"{"total":2,"items":[
            {"id":1,"name":"Production","is_folder":true,"order_index":4},
            {"id":2,"name":"Quality","is_folder":true,"order_index":7}
        ]}"#,
    );
    let body = MenuCreate::folder("  Logistics ", &tree).unwrap();
    assert_eq!(body.name, "Logistics");
    assert!(body.is_folder);
    assert_eq!(body.parent_id, None);
    assert_eq!(body.order_index, 8);
    assert_eq!(MenuCreate::folder("First", &[]).unwrap().order_index, 1);
}

#[test]
fn new_child_menu_goes_after_its_siblings() {
    let tree = listing(
        r#"{"total":3,"items":[
            {"id":1,"name":"Production","is_folder":true,"order_index":1},
            {"id":3,"name":"Orders","parent_id":1,"order_index":0},
            {"id":4,"name":"Lots","parent_id":1,"order_index":5},
            {"id":2,"name":"Quality","is_folder":true,"order_index":2}
        ]}"#,
    );
    let body = MenuCreate::child("Shipments", &tree[0]).unwrap();
    assert_eq!((body.parent_id, body.order_index, body.is_folder), (Some(1), 6, false));
    assert_eq!(MenuCreate::child("Audits", &tree[1]).unwrap().order_index, 0);

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["parent_id"], 1);
    assert_eq!(json["description"], "");
}

#[test]
fn menu_and_screen_names_are_validated() {
    assert_eq!(MenuCreate::folder("   ", &[]), Err(NameError::Empty));
    assert_eq!(ScreenCreate::new(1, &"x".repeat(MAX_NAME_CHARS + 1), ""), Err(NameError::TooLong));
    assert!(ScreenCreate::new(1, &"x".repeat(MAX_NAME_CHARS), "").is_ok());
}

#[test]
fn screen_body_omits_blank_description() {
    let body = ScreenCreate::new(7, " Order entry ", "  ").unwrap();
    assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"menu_id":7,"name":"Order entry"}"#);
    let body = ScreenCreate::new(7, "Order entry", " Daily orders ").unwrap();
    assert_eq!(body.description.as_deref(), Some("Daily orders"));
}

#[test]
fn default_screen_is_named_after_its_menu() {
    let menu: Menu = serde_json::from_str(r#"{"id":3,"name":"Orders","parent_id":1}"#).unwrap();
    let body = ScreenCreate::for_menu(&menu);
    assert_eq!(body.menu_id, 3);
    assert_eq!(body.name, "Orders Screen");
    assert_eq!(body.description.as_deref(), Some("Screen for Orders."));

    let menu = Menu { description: Some("Open orders".into()), ..menu };
    assert_eq!(ScreenCreate::for_menu(&menu).description.as_deref(), Some("Open orders"));
}

// =============================================================
// Download names
// =============================================================

#[test]
fn filename_from_quoted_disposition() {
    assert_eq!(
        download_filename(Some(r#"attachment; filename="orders_design.docx""#), "Orders"),
        "orders_design.docx"
    );
}

#[test]
fn filename_is_percent_decoded() {
    assert_eq!(
        download_filename(Some("attachment; filename=%EC%84%A4%EA%B3%84.docx"), "Orders"),
        "\u{c124}\u{acc4}.docx"
    );
}

#[test]
fn rfc5987_filename_wins_over_plain() {
    assert_eq!(
        download_filename(Some("attachment; filename=fallback.docx; filename*=UTF-8''real%20name.docx"), "Orders"),
        "real name.docx"
    );
}

#[test]
fn missing_disposition_uses_screen_name() {
    assert_eq!(download_filename(None, "Orders"), "Orders_design.docx");
    assert_eq!(download_filename(Some("inline"), "Orders"), "Orders_design.docx");
}

#[test]
fn percent_decode_keeps_malformed_escapes() {
    assert_eq!(percent_decode("100%zz"), "100%zz");
    assert_eq!(percent_decode("a%2"), "a%2");
}

#[test]
fn markdown_filename_uses_kind_suffix() {
    assert_eq!(markdown_filename("Orders", "test_plan"), "Orders_test_plan.md");
    assert_eq!(markdown_filename("  ", "manual"), "manual.md");
}
