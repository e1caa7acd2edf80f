//! Request/response bodies and endpoint paths of the backend REST API.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::ResourceKind;
use crate::wizard::WizardData;

// =============================================================================
// PATHS
// =============================================================================

pub const GENERATE_PATH: &str = "/api/ai/generate";
pub const DESIGN_DOC_PATH: &str = "/api/ai/documents/designDoc";
pub const TEST_PLAN_PATH: &str = "/api/ai/generate_test_plan";
pub const MANUAL_PATH: &str = "/api/ai/generate_manual";
pub const HEALTH_PATH: &str = "/api/ai/health";
pub const WIZARD_RESOURCES_PATH: &str = "/api/resources/wizard";
pub const MENUS_PATH: &str = "/api/menus";
pub const SCREENS_PATH: &str = "/api/screens";

#[must_use]
pub fn status_path(screen_id: i64) -> String {
    format!("/api/ai/status/{screen_id}")
}

#[must_use]
pub fn wizard_draft_path(screen_id: i64) -> String {
    format!("/api/ai/screens/{screen_id}/wizard-draft")
}

#[must_use]
pub fn design_download_path(screen_id: i64) -> String {
    format!("/api/ai/screens/{screen_id}/documents/design/download")
}

#[must_use]
pub fn menu_path(menu_id: i64) -> String {
    format!("{MENUS_PATH}/{menu_id}")
}

#[must_use]
pub fn screen_path(screen_id: i64) -> String {
    format!("{SCREENS_PATH}/{screen_id}")
}

#[must_use]
pub fn screen_approve_path(screen_id: i64) -> String {
    format!("{SCREENS_PATH}/{screen_id}/approve")
}

/// Collection path for a catalog kind; the target of create requests.
#[must_use]
pub fn resource_collection_path(kind: ResourceKind) -> String {
    format!("/api/resources/{}", kind.as_str())
}

/// Collection path with the list query applied.
#[must_use]
pub fn resource_list_path(kind: ResourceKind, include_inactive: bool, category: Option<&str>) -> String {
    let mut path = format!("{}?include_inactive={include_inactive}", resource_collection_path(kind));
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        path.push_str("&category=");
        path.push_str(&encode_query_value(category));
    }
    path
}

#[must_use]
pub fn resource_item_path(kind: ResourceKind, id: &str) -> String {
    format!("/api/resources/{}/{}", kind.as_str(), encode_query_value(id))
}

fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// =============================================================================
// GENERATION
// =============================================================================

/// Body of `POST /api/ai/generate` and the document generators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub screen_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wizard_data: Option<WizardData>,
    pub menu_name: String,
    pub screen_name: String,
}

/// Acknowledgement of an asynchronous generation start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateAck {
    pub screen_id: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub previous_prototype_cleared: bool,
}

/// Synchronous generator output. The document endpoints return their text in
/// whichever field the backend version uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub prototype_html: Option<String>,
    #[serde(default)]
    pub design_doc: Option<String>,
    #[serde(default)]
    pub test_plan: Option<String>,
    #[serde(default)]
    pub manual: Option<String>,
}

impl GenerateResponse {
    /// Markdown body of a test-plan or manual response.
    #[must_use]
    pub fn document_text(&self) -> Option<&str> {
        self.test_plan
            .as_deref()
            .or(self.manual.as_deref())
            .or(self.design_doc.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Either reply shape of `POST /api/ai/generate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateReply {
    Started(GenerateAck),
    Finished(GenerateResponse),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model: String,
}

// =============================================================================
// DRAFTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraftSaveRequest {
    pub wizard_data: WizardData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSaveResponse {
    #[serde(default)]
    pub data_size: usize,
    #[serde(default)]
    pub saved_at: Option<String>,
}

/// Response of `GET /api/ai/screens/{id}/wizard-draft`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardDraft {
    #[serde(default)]
    pub has_draft: bool,
    #[serde(default)]
    pub wizard_data: Option<WizardData>,
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub menu_name: Option<String>,
}

impl WizardDraft {
    /// Data to restore, present only when the backend reports a draft.
    #[must_use]
    pub fn restorable(&self) -> Option<&WizardData> {
        self.wizard_data.as_ref().filter(|_| self.has_draft)
    }
}

// =============================================================================
// MENUS AND SCREENS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default)]
    pub children: Option<Vec<Menu>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuWithScreens {
    #[serde(flatten)]
    pub menu: Menu,
    #[serde(default)]
    pub screens: Vec<Screen>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenStatus {
    #[default]
    Draft,
    InReview,
    Approved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub prototype_html: Option<String>,
    #[serde(default)]
    pub design_doc: Option<String>,
    #[serde(default)]
    pub test_plan: Option<String>,
    #[serde(default)]
    pub manual: Option<String>,
    #[serde(default)]
    pub status: ScreenStatus,
}

/// Nest the flat `GET /api/menus` listing by `parent_id`, children ordered by
/// `order_index`. Entries whose parent is not in the listing are dropped.
#[must_use]
pub fn build_menu_tree(items: Vec<Menu>) -> Vec<Menu> {
    fn attach(menu: &mut Menu, pending: &mut HashMap<i64, Vec<Menu>>) {
        let Some(mut children) = pending.remove(&menu.id) else {
            return;
        };
        children.sort_by_key(|m| m.order_index);
        for child in &mut children {
            attach(child, pending);
        }
        menu.children = Some(children);
    }

    let ids: HashSet<i64> = items.iter().map(|m| m.id).collect();
    let mut roots = Vec::new();
    let mut pending: HashMap<i64, Vec<Menu>> = HashMap::new();
    for mut menu in items {
        menu.children = None;
        match menu.parent_id {
            None => roots.push(menu),
            Some(parent) if ids.contains(&parent) => pending.entry(parent).or_default().push(menu),
            Some(_) => {}
        }
    }
    roots.sort_by_key(|m| m.order_index);
    for root in &mut roots {
        attach(root, &mut pending);
    }
    roots
}

/// Flatten a menu tree depth-first, pairing each node with its depth.
#[must_use]
pub fn flatten_menus(menus: &[Menu]) -> Vec<(usize, &Menu)> {
    fn walk<'a>(menus: &'a [Menu], depth: usize, out: &mut Vec<(usize, &'a Menu)>) {
        let mut ordered: Vec<&Menu> = menus.iter().collect();
        ordered.sort_by_key(|m| m.order_index);
        for menu in ordered {
            out.push((depth, menu));
            if let Some(children) = &menu.children {
                walk(children, depth + 1, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(menus, 0, &mut out);
    out
}

/// Longest menu or screen name the backend accepts.
pub const MAX_NAME_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,
    #[error("name must be at most {MAX_NAME_CHARS} characters")]
    TooLong,
}

fn checked_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong);
    }
    Ok(name.to_owned())
}

/// Body of `POST /api/menus`.
///
/// Top-level entries are folders; menus live under a folder and own screens.
/// New entries go after their existing siblings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_folder: bool,
    pub parent_id: Option<i64>,
    pub order_index: i64,
}

impl MenuCreate {
    /// A top-level folder after the current roots of `tree`.
    ///
    /// # Errors
    ///
    /// Rejects blank and over-long names.
    pub fn folder(name: &str, tree: &[Menu]) -> Result<Self, NameError> {
        let last = tree.iter().filter(|m| m.parent_id.is_none()).map(|m| m.order_index).max().unwrap_or(0);
        Ok(Self {
            name: checked_name(name)?,
            description: String::new(),
            is_folder: true,
            parent_id: None,
            order_index: last + 1,
        })
    }

    /// A menu appended to `parent`'s children.
    ///
    /// # Errors
    ///
    /// Rejects blank and over-long names.
    pub fn child(name: &str, parent: &Menu) -> Result<Self, NameError> {
        let next = parent.children.iter().flatten().map(|m| m.order_index).max().map_or(0, |last| last + 1);
        Ok(Self {
            name: checked_name(name)?,
            description: String::new(),
            is_folder: false,
            parent_id: Some(parent.id),
            order_index: next,
        })
    }
}

/// Body of `POST /api/screens`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenCreate {
    pub menu_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ScreenCreate {
    /// # Errors
    ///
    /// Rejects blank and over-long names. A blank description is omitted.
    pub fn new(menu_id: i64, name: &str, description: &str) -> Result<Self, NameError> {
        let description = Some(description.trim()).filter(|d| !d.is_empty()).map(str::to_owned);
        Ok(Self { menu_id, name: checked_name(name)?, description })
    }

    /// The screen created when a menu without screens is opened.
    #[must_use]
    pub fn for_menu(menu: &Menu) -> Self {
        let name = format!("{} Screen", menu.name.trim()).chars().take(MAX_NAME_CHARS).collect();
        let description = menu
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map_or_else(|| format!("Screen for {}.", menu.name.trim()), str::to_owned);
        Self { menu_id: menu.id, name, description: Some(description) }
    }
}

// =============================================================================
// DOWNLOADS
// =============================================================================

/// Filename for a downloaded design document.
///
/// Reads `filename*=UTF-8''...` or `filename=...` from a `Content-Disposition`
/// header, strips quotes and percent-decodes. Falls back to
/// `{screen_name}_design.docx`.
#[must_use]
pub fn download_filename(content_disposition: Option<&str>, screen_name: &str) -> String {
    content_disposition
        .and_then(disposition_filename)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("{screen_name}_design.docx"))
}

fn disposition_filename(header: &str) -> Option<String> {
    let params: Vec<(&str, &str)> = header
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            Some((key.trim(), value.trim()))
        })
        .collect();

    if let Some((_, value)) = params.iter().find(|(k, _)| k.eq_ignore_ascii_case("filename*")) {
        let encoded = value.rsplit_once("''").map_or(*value, |(_, rest)| rest);
        return Some(percent_decode(strip_quotes(encoded)));
    }
    params
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("filename"))
        .map(|(_, value)| percent_decode(strip_quotes(value)))
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim_matches(|c| c == '"' || c == '\'')
}

/// Percent-decode as UTF-8. Malformed escapes are kept verbatim.
#[must_use]
pub fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..=i + 2]).ok();
            if let Some(value) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| raw.to_owned())
}

/// Markdown download name for a generated document.
#[must_use]
pub fn markdown_filename(screen_name: &str, kind: &str) -> String {
    let base = screen_name.trim();
    if base.is_empty() { format!("{kind}.md") } else { format!("{base}_{kind}.md") }
}
