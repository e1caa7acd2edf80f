//! Resource catalog: layouts, components and actions offered to the wizard.
//!
//! The backend serves the catalog from `/api/resources/*`. When it is down or
//! returns empty collections, the wizard still works from the built-in tables
//! in this module. [`Catalog::resolve`] merges the two.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wizard::{ComponentType, LayoutArea, LayoutType, TriggerEvent};

// =============================================================================
// REST RECORDS
// =============================================================================

/// `{ total, items }` envelope used by every list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_template: String,
    #[serde(default)]
    pub areas: Vec<LayoutArea>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentResource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub default_props: Option<Value>,
    #[serde(default)]
    pub jsx_template: Option<String>,
    #[serde(default)]
    pub available_events: Option<Vec<String>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionParamSchema {
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionResource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub params_schema: Option<BTreeMap<String, ActionParamSchema>>,
    #[serde(default)]
    pub code_template: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response of `GET /api/resources/wizard`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardResources {
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub components: Vec<ComponentResource>,
    #[serde(default)]
    pub actions: Vec<ActionResource>,
}

fn default_active() -> bool {
    true
}

/// Catalog collections addressable under `/api/resources/{kind}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Layouts,
    Components,
    Actions,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layouts => "layouts",
            Self::Components => "components",
            Self::Actions => "actions",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "layouts" | "layout" => Some(Self::Layouts),
            "components" | "component" => Some(Self::Components),
            "actions" | "action" => Some(Self::Actions),
            _ => None,
        }
    }
}

// =============================================================================
// BUILT-IN TABLES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentCategory {
    Form,
    DataDisplay,
    Layout,
}

impl ComponentCategory {
    pub const ALL: [Self; 3] = [Self::Form, Self::DataDisplay, Self::Layout];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::DataDisplay => "data-display",
            Self::Layout => "layout",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Form => "Form Controls",
            Self::DataDisplay => "Data Display",
            Self::Layout => "Layout",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentDefinition {
    pub component_type: ComponentType,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: ComponentCategory,
}

const fn def(
    component_type: ComponentType,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: ComponentCategory,
) -> ComponentDefinition {
    ComponentDefinition { component_type, name, description, icon, category }
}

pub const COMPONENT_LIBRARY: [ComponentDefinition; 18] = [
    def(ComponentType::Button, "Button", "Clickable button", "mouse-pointer", ComponentCategory::Form),
    def(ComponentType::Textbox, "Textbox", "Single-line text input", "type", ComponentCategory::Form),
    def(ComponentType::Codeview, "Code view", "Code lookup (textbox + search icon)", "search", ComponentCategory::Form),
    def(ComponentType::Combo, "Combo box", "Dropdown selection", "list", ComponentCategory::Form),
    def(ComponentType::Checkbox, "Checkbox", "Multiple choice", "check-square", ComponentCategory::Form),
    def(ComponentType::Radio, "Radio", "Single choice", "circle", ComponentCategory::Form),
    def(ComponentType::DatePicker, "Date picker", "Date input", "calendar", ComponentCategory::Form),
    def(ComponentType::TimePicker, "Time picker", "Time input", "clock", ComponentCategory::Form),
    def(ComponentType::NumberInput, "Number input", "Numeric input only", "hash", ComponentCategory::Form),
    def(ComponentType::Textarea, "Text area", "Multi-line text", "file-text", ComponentCategory::Form),
    def(ComponentType::FileUpload, "File upload", "File attachment", "upload", ComponentCategory::Form),
    def(ComponentType::Grid, "Grid", "Data table", "table", ComponentCategory::DataDisplay),
    def(ComponentType::Chart, "Chart", "Data visualisation", "bar-chart-3", ComponentCategory::DataDisplay),
    def(ComponentType::Card, "Card", "Information card", "credit-card", ComponentCategory::DataDisplay),
    def(ComponentType::Badge, "Badge", "Status indicator", "tag", ComponentCategory::DataDisplay),
    def(ComponentType::ProgressBar, "Progress bar", "Progress status", "trending-up", ComponentCategory::DataDisplay),
    def(ComponentType::Divider, "Divider", "Section separator", "minus", ComponentCategory::Layout),
    def(ComponentType::Label, "Label", "Static text", "tag", ComponentCategory::Layout),
];

#[must_use]
pub fn component_definition(component_type: ComponentType) -> Option<&'static ComponentDefinition> {
    COMPONENT_LIBRARY.iter().find(|d| d.component_type == component_type)
}

/// Events each component type can fire. An empty slice means the component
/// cannot trigger interactions.
#[must_use]
pub fn trigger_events(component_type: ComponentType) -> &'static [TriggerEvent] {
    use TriggerEvent::{CellClick, Change, Click, DoubleClick, Hover, RowClick, Select, Submit};
    match component_type {
        ComponentType::Button => &[Click, DoubleClick],
        ComponentType::Textbox | ComponentType::NumberInput => &[Change, Submit],
        ComponentType::Codeview => &[Click, Change, Submit],
        ComponentType::Combo | ComponentType::DatePicker | ComponentType::TimePicker => &[Change, Select],
        ComponentType::Checkbox | ComponentType::Radio | ComponentType::Textarea | ComponentType::FileUpload => {
            &[Change]
        }
        ComponentType::Grid => &[RowClick, CellClick, DoubleClick],
        ComponentType::Chart | ComponentType::Card => &[Click, Hover],
        ComponentType::Badge | ComponentType::ProgressBar | ComponentType::Label => &[Click],
        ComponentType::Divider => &[],
    }
}

#[must_use]
pub fn is_interactable(component_type: ComponentType) -> bool {
    !trigger_events(component_type).is_empty()
}

#[must_use]
pub fn trigger_event_label(event: TriggerEvent) -> &'static str {
    match event {
        TriggerEvent::Click => "Click",
        TriggerEvent::DoubleClick => "Double click",
        TriggerEvent::RowClick => "Row click",
        TriggerEvent::CellClick => "Cell click",
        TriggerEvent::Change => "Value change",
        TriggerEvent::Submit => "Submit (Enter)",
        TriggerEvent::Hover => "Hover",
        TriggerEvent::Select => "Select",
    }
}

/// Actions that act on a layout area and so require one.
#[must_use]
pub fn needs_target_area(action_id: &str) -> bool {
    matches!(action_id, "fetch-data" | "clear" | "validate")
}

/// Actions that open a popup and so require a modal configuration.
#[must_use]
pub fn needs_modal(action_id: &str) -> bool {
    action_id == "open-modal"
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutTemplate {
    pub layout: LayoutType,
    pub name: &'static str,
    pub description: &'static str,
}

pub const LAYOUT_TEMPLATES: [LayoutTemplate; 5] = [
    LayoutTemplate {
        layout: LayoutType::SearchGrid,
        name: "SearchGrid",
        description: "Search + grid (work order lookup, material list)",
    },
    LayoutTemplate {
        layout: LayoutType::MasterDetail,
        name: "MasterDetail",
        description: "Master-detail (work order sheet, equipment info)",
    },
    LayoutTemplate {
        layout: LayoutType::Dashboard,
        name: "Dashboard",
        description: "Dashboard (production status board, live monitoring)",
    },
    LayoutTemplate {
        layout: LayoutType::Kanban,
        name: "Kanban",
        description: "Kanban board (task progress, process management)",
    },
    LayoutTemplate {
        layout: LayoutType::Form,
        name: "Form",
        description: "Input form (task registration, quality inspection)",
    },
];

type AreaRow = (&'static str, &'static str, &'static str, &'static [&'static str]);

const SEARCH_GRID_AREAS: &[AreaRow] = &[
    (
        "search-area",
        "Search area",
        "Search criteria at the top",
        &["textbox", "codeview", "combo", "date-picker", "number-input", "button"],
    ),
    ("grid-toolbar", "Grid toolbar", "Action buttons above the grid", &["button", "file-upload"]),
    ("grid-area", "Grid area", "Data display", &["grid", "badge", "progress-bar"]),
];

const MASTER_DETAIL_AREAS: &[AreaRow] = &[
    ("master-toolbar", "Master toolbar", "Above the left list", &["button", "textbox", "codeview"]),
    ("master-list", "Master list", "Left item list", &["card", "badge"]),
    ("detail-header", "Detail header", "Top right summary", &["button", "badge"]),
    (
        "detail-form",
        "Detail form",
        "Right detail content",
        &["textbox", "codeview", "combo", "textarea", "date-picker", "number-input", "checkbox", "radio"],
    ),
];

const DASHBOARD_AREAS: &[AreaRow] = &[
    ("kpi-area", "KPI cards", "Key indicators at the top", &["card", "badge", "progress-bar"]),
    ("chart-left", "Left chart", "Statistics chart on the left", &["chart", "combo", "date-picker"]),
    ("chart-right", "Right chart", "Statistics chart on the right", &["chart", "combo", "progress-bar"]),
    ("data-table", "Data table", "Detailed data below", &["grid", "button", "badge"]),
];

const KANBAN_AREAS: &[AreaRow] = &[
    (
        "kanban-header",
        "Kanban header",
        "Filters and actions at the top",
        &["combo", "button", "textbox", "codeview", "date-picker"],
    ),
    ("todo-column", "To Do column", "Planned work", &["card", "badge", "button"]),
    ("inprogress-column", "In Progress column", "Work in progress", &["card", "badge", "progress-bar", "button"]),
    ("done-column", "Done column", "Finished work", &["card", "badge", "button"]),
];

const FORM_AREAS: &[AreaRow] = &[
    ("form-header", "Form header", "Title and description", &["label", "divider"]),
    (
        "form-section1",
        "Basic information",
        "First section",
        &["textbox", "codeview", "combo", "date-picker", "time-picker", "number-input", "checkbox", "radio"],
    ),
    (
        "form-section2",
        "Additional information",
        "Second section",
        &["textarea", "file-upload", "checkbox", "combo", "codeview"],
    ),
    ("form-actions", "Action buttons", "Save and cancel at the bottom", &["button"]),
];

/// Built-in area list for a layout.
#[must_use]
pub fn fallback_areas(layout: LayoutType) -> Vec<LayoutArea> {
    let rows = match layout {
        LayoutType::SearchGrid => SEARCH_GRID_AREAS,
        LayoutType::MasterDetail => MASTER_DETAIL_AREAS,
        LayoutType::Dashboard => DASHBOARD_AREAS,
        LayoutType::Kanban => KANBAN_AREAS,
        LayoutType::Form => FORM_AREAS,
    };
    rows.iter()
        .map(|&(id, name, description, suggested)| LayoutArea {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            suggested_components: Some(suggested.iter().map(|s| (*s).to_owned()).collect()),
        })
        .collect()
}

pub const BUILTIN_ACTIONS: [(&str, &str, &str); 6] = [
    ("fetch-data", "Fetch data", "Load data into a target area"),
    ("submit", "Submit", "Save the entered data"),
    ("clear", "Clear", "Reset inputs in a target area"),
    ("open-modal", "Open modal", "Open a popup dialog"),
    ("validate", "Validate", "Check inputs in a target area"),
    ("navigate", "Navigate", "Move to another screen"),
];

// =============================================================================
// RESOLVED CATALOG
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOption {
    pub layout: LayoutType,
    pub name: String,
    pub description: String,
    pub areas: Vec<LayoutArea>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentOption {
    pub component_type: ComponentType,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub events: Vec<TriggerEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOption {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// What the wizard offers, after merging backend resources with the
/// built-in tables.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    pub layouts: Vec<LayoutOption>,
    pub components: Vec<ComponentOption>,
    pub actions: Vec<ActionOption>,
    /// True when any collection came from the built-in tables.
    pub used_fallback: bool,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl Catalog {
    /// Build the wizard catalog. Each collection falls back to the built-in
    /// table independently when the backend returned nothing usable for it.
    #[must_use]
    pub fn resolve(resources: Option<&WizardResources>) -> Self {
        let empty = WizardResources::default();
        let resources = resources.unwrap_or(&empty);
        let mut used_fallback = false;

        let mut layouts = backend_layouts(&resources.layouts);
        if layouts.is_empty() {
            used_fallback = true;
            layouts = builtin_layouts();
        }

        let mut components = backend_components(&resources.components);
        if components.is_empty() {
            used_fallback = true;
            components = builtin_components();
        }

        let mut actions = backend_actions(&resources.actions);
        if actions.is_empty() {
            used_fallback = true;
            actions = builtin_actions();
        }

        Self { layouts, components, actions, used_fallback }
    }

    #[must_use]
    pub fn layout(&self, layout: LayoutType) -> Option<&LayoutOption> {
        self.layouts.iter().find(|l| l.layout == layout)
    }

    #[must_use]
    pub fn component(&self, component_type: ComponentType) -> Option<&ComponentOption> {
        self.components.iter().find(|c| c.component_type == component_type)
    }

    #[must_use]
    pub fn components_in_category(&self, category: &str) -> Vec<&ComponentOption> {
        self.components.iter().filter(|c| c.category == category).collect()
    }

    #[must_use]
    pub fn action(&self, id: &str) -> Option<&ActionOption> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Trigger events for a component, preferring the catalog's list.
    #[must_use]
    pub fn events_for(&self, component_type: ComponentType) -> Vec<TriggerEvent> {
        self.component(component_type)
            .map_or_else(|| trigger_events(component_type).to_vec(), |c| c.events.clone())
    }
}

fn sort_key(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

fn backend_layouts(layouts: &[Layout]) -> Vec<LayoutOption> {
    let mut active: Vec<&Layout> = layouts.iter().filter(|l| l.is_active).collect();
    active.sort_by_key(|l| sort_key(&l.sort_order));
    active
        .into_iter()
        .filter_map(|l| {
            let layout = LayoutType::parse(&l.id)?;
            let areas = if l.areas.is_empty() { fallback_areas(layout) } else { l.areas.clone() };
            Some(LayoutOption {
                layout,
                name: l.name.clone(),
                description: l.description.clone().unwrap_or_default(),
                areas,
            })
        })
        .collect()
}

fn builtin_layouts() -> Vec<LayoutOption> {
    LAYOUT_TEMPLATES
        .iter()
        .map(|t| LayoutOption {
            layout: t.layout,
            name: t.name.to_owned(),
            description: t.description.to_owned(),
            areas: fallback_areas(t.layout),
        })
        .collect()
}

fn backend_components(components: &[ComponentResource]) -> Vec<ComponentOption> {
    let mut active: Vec<&ComponentResource> = components.iter().filter(|c| c.is_active).collect();
    active.sort_by_key(|c| sort_key(&c.sort_order));
    active
        .into_iter()
        .filter_map(|c| {
            let component_type = ComponentType::parse(&c.component_type)?;
            let events: Vec<TriggerEvent> = c
                .available_events
                .as_deref()
                .map(|raw| raw.iter().filter_map(|e| TriggerEvent::parse(e)).collect())
                .unwrap_or_default();
            let events = if events.is_empty() { trigger_events(component_type).to_vec() } else { events };
            Some(ComponentOption {
                component_type,
                name: c.name.clone(),
                description: c.description.clone().unwrap_or_default(),
                icon: c.icon.clone(),
                category: c.category.clone(),
                events,
            })
        })
        .collect()
}

fn builtin_components() -> Vec<ComponentOption> {
    COMPONENT_LIBRARY
        .iter()
        .map(|d| ComponentOption {
            component_type: d.component_type,
            name: d.name.to_owned(),
            description: d.description.to_owned(),
            icon: d.icon.to_owned(),
            category: d.category.as_str().to_owned(),
            events: trigger_events(d.component_type).to_vec(),
        })
        .collect()
}

fn backend_actions(actions: &[ActionResource]) -> Vec<ActionOption> {
    let mut active: Vec<&ActionResource> = actions.iter().filter(|a| a.is_active).collect();
    active.sort_by_key(|a| sort_key(&a.sort_order));
    active
        .into_iter()
        .map(|a| ActionOption {
            id: a.id.clone(),
            name: a.name.clone(),
            description: a.description.clone().unwrap_or_default(),
        })
        .collect()
}

fn builtin_actions() -> Vec<ActionOption> {
    BUILTIN_ACTIONS
        .iter()
        .map(|&(id, name, description)| ActionOption {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
        })
        .collect()
}
