use super::*;
use wire::Wizard;
use wire::wizard::{ComponentType, InteractionDraft, LayoutType};

fn wizard() -> Wizard {
    let mut wizard = Wizard::new();
    wizard.select_builtin_layout(LayoutType::SearchGrid);
    wizard.select_area("grid-toolbar").unwrap();
    wizard.add_component(ComponentType::Button, "New").unwrap();
    wizard
}

#[test]
fn areas_list_their_labels_or_empty_marker() {
    let summaries = area_summaries(wizard().data());
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].1, "(empty)");
    assert_eq!(summaries[1].1, "New");
}

#[test]
fn modal_count_only_counts_open_modal_interactions() {
    let mut wizard = wizard();
    let button = wizard.data().step3.components[0].id.clone();
    let draft = InteractionDraft {
        trigger_component_id: button.clone(),
        action_type: "open-modal".into(),
        modal_title: "Create".into(),
        ..InteractionDraft::default()
    };
    wizard.add_interaction(draft).unwrap();
    wizard
        .add_interaction(InteractionDraft {
            trigger_component_id: button,
            action_type: "navigate".into(),
            ..InteractionDraft::default()
        })
        .unwrap();
    assert_eq!(modal_count(wizard.data()), 1);
}
