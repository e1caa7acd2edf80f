//! Wizard aggregate: five-step screen specification and its navigation.
//!
//! DESIGN
//! ======
//! `WizardData` is the JSON document the backend stores as a draft and feeds
//! to generation, so its field names follow the backend (camelCase). The
//! `Wizard` controller wraps it with step navigation and the editing rules the
//! step screens enforce, so the browser and the CLI apply the same checks.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use serde::{Deserialize, Serialize};

use crate::catalog;

/// Number of wizard steps (overview, layout, components, interactions, review).
pub const STEP_COUNT: u8 = 5;

/// Layout families a screen can be built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    SearchGrid,
    MasterDetail,
    Dashboard,
    Kanban,
    Form,
}

impl LayoutType {
    pub const ALL: [Self; 5] = [Self::SearchGrid, Self::MasterDetail, Self::Dashboard, Self::Kanban, Self::Form];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchGrid => "search-grid",
            Self::MasterDetail => "master-detail",
            Self::Dashboard => "dashboard",
            Self::Kanban => "kanban",
            Self::Form => "form",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == raw)
    }
}

/// Kinds of components that can be placed in a layout area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Button,
    Textbox,
    Codeview,
    Combo,
    Checkbox,
    Radio,
    DatePicker,
    TimePicker,
    NumberInput,
    Textarea,
    FileUpload,
    Grid,
    Chart,
    Card,
    Badge,
    ProgressBar,
    Divider,
    Label,
}

impl ComponentType {
    pub const ALL: [Self; 18] = [
        Self::Button,
        Self::Textbox,
        Self::Codeview,
        Self::Combo,
        Self::Checkbox,
        Self::Radio,
        Self::DatePicker,
        Self::TimePicker,
        Self::NumberInput,
        Self::Textarea,
        Self::FileUpload,
        Self::Grid,
        Self::Chart,
        Self::Card,
        Self::Badge,
        Self::ProgressBar,
        Self::Divider,
        Self::Label,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Textbox => "textbox",
            Self::Codeview => "codeview",
            Self::Combo => "combo",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::DatePicker => "date-picker",
            Self::TimePicker => "time-picker",
            Self::NumberInput => "number-input",
            Self::Textarea => "textarea",
            Self::FileUpload => "file-upload",
            Self::Grid => "grid",
            Self::Chart => "chart",
            Self::Card => "card",
            Self::Badge => "badge",
            Self::ProgressBar => "progress-bar",
            Self::Divider => "divider",
            Self::Label => "label",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

/// Events a placed component can fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerEvent {
    #[default]
    Click,
    DoubleClick,
    RowClick,
    CellClick,
    Change,
    Submit,
    Hover,
    Select,
}

impl TriggerEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "double-click",
            Self::RowClick => "row-click",
            Self::CellClick => "cell-click",
            Self::Change => "change",
            Self::Submit => "submit",
            Self::Hover => "hover",
            Self::Select => "select",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        [
            Self::Click,
            Self::DoubleClick,
            Self::RowClick,
            Self::CellClick,
            Self::Change,
            Self::Submit,
            Self::Hover,
            Self::Select,
        ]
        .into_iter()
        .find(|e| e.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    Full,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    #[default]
    Form,
    Detail,
    Confirm,
    Custom,
}

/// Input field rendered inside a form modal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: ComponentType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Popup opened by an `open-modal` interaction.
///
/// The `id` is the handle the preview frame protocol uses (`OPEN_MODAL`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub size: ModalSize,
    #[serde(rename = "type", default)]
    pub kind: ModalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<ModalField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_components: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub label: String,
    pub area_id: String,
}

/// Trigger -> action rule. `action_type` is a catalog action id, usually one
/// of the built-in ids (`fetch-data`, `open-modal`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub trigger_component_id: String,
    pub trigger_event: TriggerEvent,
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_component_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_area_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_config: Option<ModalConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step1Data {
    pub screen_name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step2Data {
    pub selected_layout: Option<LayoutType>,
    #[serde(default)]
    pub layout_areas: Vec<LayoutArea>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step3Data {
    #[serde(default)]
    pub components: Vec<PlacedComponent>,
    #[serde(default)]
    pub selected_area_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step4Data {
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Everything the wizard collects, in the shape the backend persists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardData {
    #[serde(default)]
    pub step1: Step1Data,
    #[serde(default)]
    pub step2: Step2Data,
    #[serde(default)]
    pub step3: Step3Data,
    #[serde(default)]
    pub step4: Step4Data,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Current,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WizardStep {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

const STEP_TITLES: [(&str, &str); STEP_COUNT as usize] = [
    ("Overview", "Basic screen information"),
    ("Layout", "Choose the screen structure"),
    ("Components", "Place components in areas"),
    ("Interactions", "Define behaviour"),
    ("Review", "Final check"),
];

/// Step list with `current` marked and the statuses derived from it.
#[must_use]
pub fn steps_for(current: u8) -> Vec<WizardStep> {
    STEP_TITLES
        .iter()
        .zip(1..=STEP_COUNT)
        .map(|(&(title, description), id)| WizardStep {
            id,
            title,
            description,
            status: step_status(id, current),
        })
        .collect()
}

fn step_status(id: u8, current: u8) -> StepStatus {
    match id.cmp(&current) {
        std::cmp::Ordering::Less => StepStatus::Completed,
        std::cmp::Ordering::Equal => StepStatus::Current,
        std::cmp::Ordering::Greater => StepStatus::Pending,
    }
}

/// Editing rule violations reported by [`Wizard`] mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("select a layout area before adding components")]
    NoAreaSelected,
    #[error("component label must not be empty")]
    EmptyLabel,
    #[error("unknown layout area: {0}")]
    UnknownArea(String),
    #[error("unknown component: {0}")]
    UnknownComponent(String),
    #[error("component `{0}` has no trigger events")]
    NotInteractable(String),
    #[error("select an action")]
    MissingAction,
    #[error("action `{0}` needs a target area")]
    MissingTargetArea(String),
    #[error("modal title must not be empty")]
    MissingModalTitle,
}

/// Interaction fields as entered on the interactions step, before the
/// wizard assigns ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionDraft {
    pub trigger_component_id: String,
    pub trigger_event: TriggerEvent,
    pub action_type: String,
    pub target_area_id: Option<String>,
    pub modal_title: String,
    pub modal_size: ModalSize,
    pub modal_kind: ModalKind,
    pub modal_fields: Vec<ModalField>,
    pub modal_content: String,
    pub description: String,
}

/// Wizard controller: the current step plus the aggregate being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct Wizard {
    current: u8,
    data: WizardData,
}

impl Default for Wizard {
    fn default() -> Self {
        Self { current: 1, data: WizardData::default() }
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on step 1 with previously saved data.
    #[must_use]
    pub fn with_data(data: WizardData) -> Self {
        let mut wizard = Self { current: 1, data };
        wizard.renumber_modals();
        wizard
    }

    #[must_use]
    pub fn current_step(&self) -> u8 {
        self.current
    }

    #[must_use]
    pub fn steps(&self) -> Vec<WizardStep> {
        steps_for(self.current)
    }

    #[must_use]
    pub fn data(&self) -> &WizardData {
        &self.data
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current == STEP_COUNT
    }

    /// Jump to `step`. Targets outside `1..=5` are ignored.
    pub fn go_to_step(&mut self, step: u8) {
        if (1..=STEP_COUNT).contains(&step) {
            self.current = step;
        }
    }

    pub fn next_step(&mut self) {
        if self.current < STEP_COUNT {
            self.current += 1;
        }
    }

    pub fn prev_step(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the aggregate (draft restore).
    pub fn load(&mut self, data: WizardData) {
        self.data = data;
        self.renumber_modals();
    }

    pub fn update_step1(&mut self, step1: Step1Data) {
        self.data.step1 = step1;
    }

    pub fn update_step2(&mut self, step2: Step2Data) {
        self.data.step2 = step2;
    }

    pub fn update_step3(&mut self, step3: Step3Data) {
        self.data.step3 = step3;
    }

    pub fn update_step4(&mut self, step4: Step4Data) {
        self.data.step4 = step4;
        self.renumber_modals();
    }

    /// Choose a layout and install its areas. Components placed in areas the
    /// new layout does not have are dropped along with their interactions.
    pub fn select_layout(&mut self, layout: LayoutType, areas: Vec<LayoutArea>) {
        self.data.step2 = Step2Data { selected_layout: Some(layout), layout_areas: areas };
        let orphaned: Vec<String> = self
            .data
            .step3
            .components
            .iter()
            .filter(|c| !self.has_area(&c.area_id))
            .map(|c| c.id.clone())
            .collect();
        for id in orphaned {
            self.remove_component(&id);
        }
        if !self.has_area(&self.data.step3.selected_area_id) {
            self.data.step3.selected_area_id.clear();
        }
    }

    /// Choose a layout using the built-in area table.
    pub fn select_builtin_layout(&mut self, layout: LayoutType) {
        self.select_layout(layout, catalog::fallback_areas(layout));
    }

    /// Select the area new components are placed into.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::UnknownArea`] when the current layout has no
    /// such area.
    pub fn select_area(&mut self, area_id: &str) -> Result<(), WizardError> {
        if !self.has_area(area_id) {
            return Err(WizardError::UnknownArea(area_id.to_owned()));
        }
        area_id.clone_into(&mut self.data.step3.selected_area_id);
        Ok(())
    }

    /// Place a component in the selected area and return its id.
    ///
    /// # Errors
    ///
    /// Fails when no area is selected or the trimmed label is empty.
    pub fn add_component(&mut self, component_type: ComponentType, label: &str) -> Result<String, WizardError> {
        let label = label.trim();
        if self.data.step3.selected_area_id.is_empty() {
            return Err(WizardError::NoAreaSelected);
        }
        if label.is_empty() {
            return Err(WizardError::EmptyLabel);
        }
        let id = self.unique_component_id(component_type);
        self.data.step3.components.push(PlacedComponent {
            id: id.clone(),
            component_type,
            label: label.to_owned(),
            area_id: self.data.step3.selected_area_id.clone(),
        });
        Ok(id)
    }

    /// Remove a component and every interaction it triggers or targets.
    pub fn remove_component(&mut self, id: &str) {
        self.data.step3.components.retain(|c| c.id != id);
        self.data
            .step4
            .interactions
            .retain(|i| i.trigger_component_id != id && i.target_component_id.as_deref() != Some(id));
        self.renumber_modals();
    }

    #[must_use]
    pub fn components_in_area(&self, area_id: &str) -> Vec<&PlacedComponent> {
        self.data.step3.components.iter().filter(|c| c.area_id == area_id).collect()
    }

    /// Components that can trigger an interaction.
    #[must_use]
    pub fn interactable_components(&self) -> Vec<&PlacedComponent> {
        self.data
            .step3
            .components
            .iter()
            .filter(|c| catalog::is_interactable(c.component_type))
            .collect()
    }

    /// Validate `draft` and append it as an interaction, returning its id.
    ///
    /// Modal ids are positional (`modal-0` for the first `open-modal`
    /// interaction, `modal-1` for the second, ...) to match the
    /// `isModal{N}Open` state the generated code declares. They are
    /// renumbered whenever the interaction list changes.
    ///
    /// # Errors
    ///
    /// Fails when the trigger is unknown or not interactable, the action is
    /// missing, a target-area action has no area, or an `open-modal` action
    /// has no title.
    pub fn add_interaction(&mut self, draft: InteractionDraft) -> Result<String, WizardError> {
        let trigger = self
            .data
            .step3
            .components
            .iter()
            .find(|c| c.id == draft.trigger_component_id)
            .ok_or_else(|| WizardError::UnknownComponent(draft.trigger_component_id.clone()))?;
        if !catalog::is_interactable(trigger.component_type) {
            return Err(WizardError::NotInteractable(trigger.id.clone()));
        }
        let action = draft.action_type.trim();
        if action.is_empty() {
            return Err(WizardError::MissingAction);
        }

        let target_area_id = if catalog::needs_target_area(action) {
            let area = draft
                .target_area_id
                .as_deref()
                .filter(|a| !a.is_empty())
                .ok_or_else(|| WizardError::MissingTargetArea(action.to_owned()))?;
            if !self.has_area(area) {
                return Err(WizardError::UnknownArea(area.to_owned()));
            }
            Some(area.to_owned())
        } else {
            None
        };

        let modal_config = if catalog::needs_modal(action) {
            let title = draft.modal_title.trim();
            if title.is_empty() {
                return Err(WizardError::MissingModalTitle);
            }
            let content = draft.modal_content.trim();
            Some(ModalConfig {
                id: String::new(),
                title: title.to_owned(),
                size: draft.modal_size,
                kind: draft.modal_kind,
                fields: (draft.modal_kind == ModalKind::Form).then_some(draft.modal_fields),
                content: (!content.is_empty()).then(|| content.to_owned()),
            })
        } else {
            None
        };

        let description = draft.description.trim();
        let id = self.unique_interaction_id();
        self.data.step4.interactions.push(Interaction {
            id: id.clone(),
            trigger_component_id: draft.trigger_component_id,
            trigger_event: draft.trigger_event,
            action_type: action.to_owned(),
            target_component_id: None,
            target_area_id,
            modal_config,
            description: (!description.is_empty()).then(|| description.to_owned()),
        });
        self.renumber_modals();
        Ok(id)
    }

    pub fn remove_interaction(&mut self, id: &str) {
        self.data.step4.interactions.retain(|i| i.id != id);
        self.renumber_modals();
    }

    /// Whether the given step's inputs are complete enough to move on.
    #[must_use]
    pub fn is_step_valid(&self, step: u8) -> bool {
        match step {
            1 => !self.data.step1.screen_name.trim().is_empty(),
            2 => self.data.step2.selected_layout.is_some(),
            3 | 4 => true,
            5 => (1..STEP_COUNT).all(|s| self.is_step_valid(s)),
            _ => false,
        }
    }

    /// Generation is offered only on the review step with all steps valid.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.is_last_step() && self.is_step_valid(STEP_COUNT)
    }

    fn has_area(&self, area_id: &str) -> bool {
        self.data.step2.layout_areas.iter().any(|a| a.id == area_id)
    }

    fn unique_component_id(&self, component_type: ComponentType) -> String {
        let taken = |id: &str| self.data.step3.components.iter().any(|c| c.id == id);
        next_free_id(component_type.as_str(), self.data.step3.components.len() + 1, taken)
    }

    fn unique_interaction_id(&self) -> String {
        let taken = |id: &str| self.data.step4.interactions.iter().any(|i| i.id == id);
        next_free_id("interaction", self.data.step4.interactions.len() + 1, taken)
    }

    fn renumber_modals(&mut self) {
        let modals = self.data.step4.interactions.iter_mut().filter_map(|i| i.modal_config.as_mut());
        for (index, modal) in modals.enumerate() {
            modal.id = format!("modal-{index}");
        }
    }
}

fn next_free_id(prefix: &str, start: usize, taken: impl Fn(&str) -> bool) -> String {
    (start..)
        .map(|n| format!("{prefix}-{n}"))
        .find(|id| !taken(id))
        .unwrap_or_else(|| format!("{prefix}-{start}"))
}
