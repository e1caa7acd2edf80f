//! Workspace state for the open screen: record, preview mirror, documents.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use preview::RenderPhase;
use preview::bridge::Screenshot;
use wire::Screen;

/// Panel shown in the workspace body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkspaceTab {
    #[default]
    Wizard,
    Preview,
    Documents,
}

/// Documents the panel can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// Freshly generated from screenshots of the preview.
    Design,
    /// The last design document the backend stored.
    StoredDesign,
    TestPlan,
    Manual,
}

impl DocumentKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Design => "Design document",
            Self::StoredDesign => "Stored design document",
            Self::TestPlan => "Test plan",
            Self::Manual => "User manual",
        }
    }

    /// Suffix used in markdown download names.
    #[must_use]
    pub fn markdown_kind(self) -> Option<&'static str> {
        match self {
            Self::TestPlan => Some("test_plan"),
            Self::Manual => Some("manual"),
            Self::Design | Self::StoredDesign => None,
        }
    }

    /// Generation endpoint for markdown documents.
    #[must_use]
    pub fn generate_path(self) -> Option<&'static str> {
        match self {
            Self::TestPlan => Some(wire::api::TEST_PLAN_PATH),
            Self::Manual => Some(wire::api::MANUAL_PATH),
            Self::Design | Self::StoredDesign => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkspaceState {
    pub screen: Option<Screen>,
    pub menu_name: String,
    pub tab: WorkspaceTab,
    pub loading: bool,
    pub error: Option<String>,
    pub preview_phase: RenderPhase,
    pub preview_attempts: u32,
    /// Screenshots the user captured by hand, uploaded after the automatic ones.
    pub manual_shots: Vec<Screenshot>,
    pub busy: Option<DocumentKind>,
    pub notice: Option<String>,
    /// Latest markdown document text, by kind.
    pub markdown: Option<(DocumentKind, String)>,
}

impl WorkspaceState {
    pub fn begin_loading(&mut self) {
        *self = Self { loading: true, ..Self::default() };
    }

    pub fn open(&mut self, screen: Screen, menu_name: String) {
        let tab = if has_text(screen.prototype_html.as_deref()) { WorkspaceTab::Preview } else { WorkspaceTab::Wizard };
        self.screen = Some(screen);
        self.menu_name = menu_name;
        self.tab = tab;
        self.loading = false;
        self.error = None;
    }

    pub fn load_failed(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Replace the screen after a generation run, keeping the panel state.
    pub fn refresh(&mut self, screen: Screen) {
        self.screen = Some(screen);
        self.tab = WorkspaceTab::Preview;
    }

    #[must_use]
    pub fn screen_id(&self) -> Option<i64> {
        self.screen.as_ref().map(|s| s.id)
    }

    #[must_use]
    pub fn screen_name(&self) -> &str {
        self.screen.as_ref().map_or("", |s| s.name.as_str())
    }

    /// Generated source, if the screen has any.
    #[must_use]
    pub fn prototype(&self) -> Option<&str> {
        self.screen.as_ref().and_then(|s| s.prototype_html.as_deref()).filter(|p| has_text(Some(p)))
    }

    pub fn set_prototype(&mut self, source: String) {
        if let Some(screen) = self.screen.as_mut() {
            screen.prototype_html = Some(source);
        }
        self.tab = WorkspaceTab::Preview;
    }

    pub fn preview_status(&mut self, phase: RenderPhase, attempts: u32) {
        self.preview_phase = phase;
        self.preview_attempts = attempts;
    }

    /// Screenshots need a mounted component in the frame.
    #[must_use]
    pub fn can_capture(&self) -> bool {
        self.preview_phase == RenderPhase::Mounted
    }

    pub fn add_manual_shot(&mut self, shot: Screenshot) {
        self.manual_shots.push(shot);
    }

    pub fn remove_manual_shot(&mut self, index: usize) {
        if index < self.manual_shots.len() {
            self.manual_shots.remove(index);
        }
    }

    /// Claim the document panel for `kind`. Returns `false` while another
    /// document is in progress.
    pub fn begin_document(&mut self, kind: DocumentKind) -> bool {
        if self.busy.is_some() {
            return false;
        }
        self.busy = Some(kind);
        self.notice = None;
        self.error = None;
        true
    }

    pub fn document_saved(&mut self, kind: DocumentKind, filename: &str) {
        self.busy = None;
        self.notice = Some(format!("{} saved as {filename}", kind.label()));
    }

    pub fn markdown_ready(&mut self, kind: DocumentKind, text: String) {
        self.busy = None;
        self.notice = None;
        self.markdown = Some((kind, text));
    }

    pub fn document_failed(&mut self, kind: DocumentKind, error: String) {
        self.busy = None;
        self.error = Some(format!("{} failed: {error}", kind.label()));
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
