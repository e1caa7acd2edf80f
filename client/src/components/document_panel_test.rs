use super::*;
use wire::Wizard;
use wire::wizard::{ComponentType, InteractionDraft, LayoutType};

fn wizard_with_modals(titles: &[&str]) -> Wizard {
    let mut wizard = Wizard::new();
    wizard.select_builtin_layout(LayoutType::SearchGrid);
    wizard.select_area("grid-toolbar").unwrap();
    let button = wizard.add_component(ComponentType::Button, "New").unwrap();
    for title in titles {
        wizard
            .add_interaction(InteractionDraft {
                trigger_component_id: button.clone(),
                action_type: "open-modal".into(),
                modal_title: (*title).into(),
                ..InteractionDraft::default()
            })
            .unwrap();
    }
    wizard
}

#[test]
fn plan_without_modals_is_main_screen_only() {
    let steps = capture_steps(wizard_with_modals(&[]).data());
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].modal_id, None);
}

#[test]
fn plan_lists_each_modal_after_main_screen() {
    let steps = capture_steps(wizard_with_modals(&["Create order", "Details"]).data());
    let labels: Vec<&str> = steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels[1..], ["Create order", "Details"]);
    assert_eq!(steps[1].modal_id.as_deref(), Some("modal-0"));
}

#[test]
fn shared_modal_is_captured_once() {
    let mut data = wizard_with_modals(&["Create order"]).data().clone();
    let duplicate = data.step4.interactions[0].clone();
    data.step4.interactions.push(duplicate);
    assert_eq!(capture_steps(&data).len(), 2);
}

#[test]
fn markdown_download_only_for_markdown_kinds() {
    let (name, bytes) = markdown_download(DocumentKind::Manual, "Orders", "# Manual").unwrap();
    assert_eq!(name, "Orders_manual.md");
    assert_eq!(bytes, b"# Manual");
    assert!(markdown_download(DocumentKind::Design, "Orders", "x").is_none());
}

#[test]
fn summary_mentions_manual_shots_only_when_present() {
    assert_eq!(upload_summary(2, 0), "2 automatic screenshot(s)");
    assert_eq!(upload_summary(1, 3), "1 automatic + 3 manual screenshot(s)");
}
