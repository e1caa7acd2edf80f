//! REST API helpers for the generation backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against same-origin
//! `/api/...` paths, which the server proxies to the backend.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<T, String>` outputs instead of panics. Non-success
//! statuses are classified through `wire::error` so the string is the
//! user-facing message (missing wizard data, quota, backend exception...).

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use preview::bridge::Screenshot;
use wire::api::{
    DraftSaveResponse, GenerateReply, GenerateRequest, GenerateResponse, MenuCreate, MenuWithScreens, ScreenCreate,
};
use wire::{GenerationStatus, Menu, Screen, WizardData, WizardDraft, WizardResources};

/// A binary document ready to be saved by the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[cfg(any(test, feature = "hydrate"))]
fn failure_message(status: u16, body: &str) -> String {
    wire::error::classify_failure(status, body).to_string()
}

#[cfg(any(test, feature = "hydrate"))]
fn generate_failure_message(status: u16, body: &str) -> String {
    wire::classify_generate_failure(status, body).to_string()
}

#[cfg(any(test, feature = "hydrate"))]
fn stored_design_failure_message(status: u16, body: &str) -> String {
    if status == 404 {
        "no design document has been generated yet".to_owned()
    } else {
        failure_message(status, body)
    }
}

/// Menu deletion fails without detail when screens still reference the menu.
#[cfg(any(test, feature = "hydrate"))]
fn menu_delete_failure_message(status: u16, body: &str) -> String {
    match wire::error::classify_failure(status, body) {
        wire::ApiError::Status(_) => "the menu still has screens and cannot be deleted".to_owned(),
        other => other.to_string(),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn network_message(err: impl std::fmt::Display) -> String {
    wire::ApiError::Network(err.to_string()).to_string()
}

#[cfg(feature = "hydrate")]
type Classifier = fn(u16, &str) -> String;

#[cfg(feature = "hydrate")]
async fn checked(
    request: Result<gloo_net::http::Request, gloo_net::Error>,
    classify: Classifier,
) -> Result<gloo_net::http::Response, String> {
    let resp = request.map_err(network_message)?.send().await.map_err(network_message)?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::warn!("api: {} rejected with {status}", resp.url());
    Err(classify(status, &body))
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, String> {
    resp.json::<T>()
        .await
        .map_err(|e| wire::ApiError::Decode(e.to_string()).to_string())
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    read_json(checked(gloo_net::http::Request::get(path).build(), failure_message).await?).await
}

#[cfg(feature = "hydrate")]
async fn into_download(resp: gloo_net::http::Response, screen_name: &str) -> Result<Download, String> {
    let disposition = resp.headers().get("content-disposition");
    let bytes = resp.binary().await.map_err(network_message)?;
    if bytes.is_empty() {
        return Err("the backend returned an empty document".to_owned());
    }
    Ok(Download { filename: wire::api::download_filename(disposition.as_deref(), screen_name), bytes })
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, String> {
    Err("not available on server".to_owned())
}

/// Load layouts, components and actions in one call.
///
/// # Errors
///
/// Returns the classified failure message; callers fall back to the built-in
/// catalog.
pub async fn fetch_wizard_resources() -> Result<WizardResources, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(wire::api::WIZARD_RESOURCES_PATH).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Fetch the menu listing and nest it into a tree.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn fetch_menus() -> Result<Vec<Menu>, String> {
    #[cfg(feature = "hydrate")]
    {
        let list: wire::catalog::ListResponse<Menu> = get_json(wire::api::MENUS_PATH).await?;
        Ok(wire::api::build_menu_tree(list.items))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Fetch one menu with the screens under it.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn fetch_menu(menu_id: i64) -> Result<MenuWithScreens, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&wire::api::menu_path(menu_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = menu_id;
        unavailable()
    }
}

/// Create a folder or menu.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn create_menu(body: &MenuCreate) -> Result<Menu, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::post(wire::api::MENUS_PATH).json(body);
        read_json(checked(request, failure_message).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        unavailable()
    }
}

/// Delete a folder or menu.
///
/// # Errors
///
/// Returns the backend's reason, or a note that screens still use the menu.
pub async fn delete_menu(menu_id: i64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::delete(&wire::api::menu_path(menu_id)).build();
        checked(request, menu_delete_failure_message).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = menu_id;
        unavailable()
    }
}

/// Create a screen under a menu.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn create_screen(body: &ScreenCreate) -> Result<Screen, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::post(wire::api::SCREENS_PATH).json(body);
        read_json(checked(request, failure_message).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        unavailable()
    }
}

/// Fetch a screen record.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn fetch_screen(screen_id: i64) -> Result<Screen, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&wire::api::screen_path(screen_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = screen_id;
        unavailable()
    }
}

/// Fetch the saved wizard draft for a screen.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn load_draft(screen_id: i64) -> Result<WizardDraft, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&wire::api::wizard_draft_path(screen_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = screen_id;
        unavailable()
    }
}

/// Persist the wizard aggregate as the screen's draft.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn save_draft(screen_id: i64, data: &WizardData) -> Result<DraftSaveResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = wire::api::DraftSaveRequest { wizard_data: data.clone() };
        let request = gloo_net::http::Request::put(&wire::api::wizard_draft_path(screen_id)).json(&body);
        read_json(checked(request, failure_message).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (screen_id, data);
        unavailable()
    }
}

/// Start prototype generation.
///
/// # Errors
///
/// Returns the generation-specific failure message (missing wizard data,
/// backend exception, quota...).
pub async fn start_generation(request: &GenerateRequest) -> Result<GenerateReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::post(wire::api::GENERATE_PATH).json(request);
        read_json(checked(request, generate_failure_message).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        unavailable()
    }
}

/// Poll generation status for a screen.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn fetch_status(screen_id: i64) -> Result<GenerationStatus, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&wire::api::status_path(screen_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = screen_id;
        unavailable()
    }
}

/// Generate a markdown document (test plan or manual) at `path`.
///
/// # Errors
///
/// Returns the generation-specific failure message.
pub async fn generate_document(path: &str, request: &GenerateRequest) -> Result<GenerateResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::post(path).json(request);
        read_json(checked(request, generate_failure_message).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, request);
        unavailable()
    }
}

/// Generate the design document from the captured screenshots.
///
/// Sends `screen_id`, then one `screenshots` file and one
/// `screenshot_labels` entry per screenshot, in capture order.
///
/// # Errors
///
/// Returns the classified failure message.
pub async fn design_document(screen_id: i64, screen_name: &str, screenshots: &[Screenshot]) -> Result<Download, String> {
    #[cfg(feature = "hydrate")]
    {
        let form = screenshot_form(screen_id, screenshots)?;
        let request = gloo_net::http::Request::post(wire::api::DESIGN_DOC_PATH).body(form);
        into_download(checked(request, failure_message).await?, screen_name).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (screen_id, screen_name, screenshots);
        unavailable()
    }
}

/// Download the design document the backend stored for a screen.
///
/// # Errors
///
/// A 404 becomes "no design document has been generated yet".
pub async fn download_design_document(screen_id: i64, screen_name: &str) -> Result<Download, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::get(&wire::api::design_download_path(screen_id)).build();
        into_download(checked(request, stored_design_failure_message).await?, screen_name).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (screen_id, screen_name);
        unavailable()
    }
}

#[cfg(feature = "hydrate")]
fn screenshot_form(screen_id: i64, screenshots: &[Screenshot]) -> Result<web_sys::FormData, String> {
    let js_err = |e: wasm_bindgen::JsValue| format!("{e:?}");
    let form = web_sys::FormData::new().map_err(js_err)?;
    form.append_with_str("screen_id", &screen_id.to_string()).map_err(js_err)?;
    for shot in screenshots {
        let blob = crate::util::download::blob(&shot.png, "image/png")?;
        form.append_with_blob_and_filename("screenshots", &blob, &shot.file_name())
            .map_err(js_err)?;
        form.append_with_str("screenshot_labels", &shot.label).map_err(js_err)?;
    }
    Ok(form)
}
