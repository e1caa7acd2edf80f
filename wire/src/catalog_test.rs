use super::*;

fn layout(id: &str, sort: &str, active: bool) -> Layout {
    Layout {
        id: id.to_owned(),
        name: id.to_uppercase(),
        description: None,
        html_template: String::new(),
        areas: Vec::new(),
        thumbnail: None,
        category: "general".to_owned(),
        is_active: active,
        sort_order: sort.to_owned(),
        created_at: None,
        updated_at: None,
    }
}

fn action(id: &str, sort: &str, active: bool) -> ActionResource {
    ActionResource {
        id: id.to_owned(),
        name: id.to_owned(),
        description: None,
        category: "data".to_owned(),
        icon: None,
        params_schema: None,
        code_template: None,
        is_active: active,
        sort_order: sort.to_owned(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn component_library_covers_every_type_once() {
    for ty in ComponentType::ALL {
        let count = COMPONENT_LIBRARY.iter().filter(|d| d.component_type == ty).count();
        assert_eq!(count, 1, "{ty:?}");
    }
}

#[test]
fn only_divider_is_not_interactable() {
    let blocked: Vec<ComponentType> = ComponentType::ALL.into_iter().filter(|t| !is_interactable(*t)).collect();
    assert_eq!(blocked, vec![ComponentType::Divider]);
}

#[test]
fn grid_fires_row_and_cell_clicks() {
    assert_eq!(
        trigger_events(ComponentType::Grid),
        &[TriggerEvent::RowClick, TriggerEvent::CellClick, TriggerEvent::DoubleClick]
    );
}

#[test]
fn target_area_and_modal_rules() {
    assert!(needs_target_area("fetch-data"));
    assert!(needs_target_area("clear"));
    assert!(needs_target_area("validate"));
    assert!(!needs_target_area("submit"));
    assert!(needs_modal("open-modal"));
    assert!(!needs_modal("navigate"));
}

#[test]
fn every_layout_has_four_or_fewer_areas_with_suggestions() {
    for layout in LayoutType::ALL {
        let areas = fallback_areas(layout);
        assert!((3..=4).contains(&areas.len()), "{layout:?}");
        assert!(areas.iter().all(|a| a.suggested_components.as_ref().is_some_and(|s| !s.is_empty())));
    }
}

#[test]
fn resolve_without_backend_uses_builtin_tables() {
    let catalog = Catalog::resolve(None);
    assert!(catalog.used_fallback);
    assert_eq!(catalog.layouts.len(), 5);
    assert_eq!(catalog.components.len(), 18);
    assert_eq!(catalog.actions.len(), 6);
    assert_eq!(catalog.components_in_category("data-display").len(), 5);
}

#[test]
fn resolve_filters_inactive_and_sorts_numerically() {
    let resources = WizardResources {
        layouts: vec![layout("kanban", "10", true), layout("form", "2", true), layout("dashboard", "1", false)],
        components: Vec::new(),
        actions: vec![action("submit", "3", true), action("navigate", "12", true), action("clear", "1", false)],
    };
    let catalog = Catalog::resolve(Some(&resources));

    let layouts: Vec<LayoutType> = catalog.layouts.iter().map(|l| l.layout).collect();
    assert_eq!(layouts, vec![LayoutType::Form, LayoutType::Kanban]);
    assert_eq!(catalog.layout(LayoutType::Form).unwrap().areas.len(), 4);

    let actions: Vec<&str> = catalog.actions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(actions, vec!["submit", "navigate"]);

    // Components came back empty, so only that collection fell back.
    assert!(catalog.used_fallback);
    assert_eq!(catalog.components.len(), 18);
}

#[test]
fn backend_component_events_override_builtin_table() {
    let raw = serde_json::json!({
        "layouts": [],
        "actions": [],
        "components": [{
            "id": "btn",
            "name": "Button",
            "type": "button",
            "category": "form",
            "icon": "mouse-pointer",
            "available_events": ["click", "hover", "bogus"],
            "is_active": true,
            "sort_order": "1"
        }]
    });
    let resources: WizardResources = serde_json::from_value(raw).unwrap();
    let catalog = Catalog::resolve(Some(&resources));
    assert_eq!(catalog.events_for(ComponentType::Button), vec![TriggerEvent::Click, TriggerEvent::Hover]);
    assert_eq!(catalog.events_for(ComponentType::Grid), trigger_events(ComponentType::Grid).to_vec());
}

#[test]
fn resource_kind_accepts_singular_names() {
    assert_eq!(ResourceKind::parse("layout"), Some(ResourceKind::Layouts));
    assert_eq!(ResourceKind::parse("actions"), Some(ResourceKind::Actions));
    assert_eq!(ResourceKind::parse("menus"), None);
}
