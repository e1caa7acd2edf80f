//! Thin REST client over the generation backend.
//!
//! Every call goes through [`ApiClient::send`], which joins the path onto the
//! base URL, reads the body as text and classifies non-success statuses into
//! [`wire::ApiError`] using the backend's `detail` conventions.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use wire::api::{
    DESIGN_DOC_PATH, DraftSaveRequest, DraftSaveResponse, GENERATE_PATH, GenerateReply, GenerateRequest,
    GenerateResponse, HEALTH_PATH, HealthResponse, MENUS_PATH, MenuCreate, MenuWithScreens, SCREENS_PATH,
    ScreenCreate, build_menu_tree, download_filename, menu_path, screen_path, status_path, wizard_draft_path,
};
use wire::catalog::ListResponse;
use wire::error::classify_failure;
use wire::{ApiError, GenerationStatus, Menu, Screen, WizardData, WizardDraft, classify_generate_failure};

use crate::error::CliError;
use preview::bridge::Screenshot;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A binary document returned by one of the download endpoints.
#[derive(Debug)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

type Classifier = fn(u16, &str) -> ApiError;

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, classify: Classifier) -> Result<reqwest::Response, CliError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        debug!(status, body = %body, "backend rejected request");
        Err(classify(status, &body).into())
    }

    async fn json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder, classify: Classifier) -> Result<T, CliError> {
        let text = self.send(request, classify).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Untyped request used by the resource and screen commands.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, CliError> {
        let url = self.url(path);
        debug!(%method, %url, "api request");
        let request = self.http.request(method, &url);
        let request = if let Some(json) = body { request.json(&json) } else { request };
        let text = self.send(request, classify_failure).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        self.json(self.http.get(self.url(path)), classify_failure).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, classify: Classifier) -> Result<T, CliError> {
        self.json(self.http.post(self.url(path)).json(body), classify).await
    }

    pub async fn health(&self) -> Result<HealthResponse, CliError> {
        self.get(HEALTH_PATH).await
    }

    pub async fn screen(&self, screen_id: i64) -> Result<Screen, CliError> {
        self.get(&screen_path(screen_id)).await
    }

    pub async fn create_screen(&self, body: &ScreenCreate) -> Result<Screen, CliError> {
        self.post(SCREENS_PATH, body, classify_failure).await
    }

    /// The menu listing nested into a tree.
    pub async fn menus(&self) -> Result<Vec<Menu>, CliError> {
        let list: ListResponse<Menu> = self.get(MENUS_PATH).await?;
        Ok(build_menu_tree(list.items))
    }

    pub async fn menu(&self, menu_id: i64) -> Result<MenuWithScreens, CliError> {
        self.get(&menu_path(menu_id)).await
    }

    pub async fn create_menu(&self, body: &MenuCreate) -> Result<Menu, CliError> {
        self.post(MENUS_PATH, body, classify_failure).await
    }

    pub async fn status(&self, screen_id: i64) -> Result<GenerationStatus, CliError> {
        self.get(&status_path(screen_id)).await
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateReply, CliError> {
        self.post(GENERATE_PATH, request, classify_generate_failure).await
    }

    /// Test plan and manual generators share the generate request body.
    pub async fn generate_document(&self, path: &str, request: &GenerateRequest) -> Result<GenerateResponse, CliError> {
        self.post(path, request, classify_generate_failure).await
    }

    pub async fn load_draft(&self, screen_id: i64) -> Result<WizardDraft, CliError> {
        self.get(&wizard_draft_path(screen_id)).await
    }

    pub async fn save_draft(&self, screen_id: i64, data: &WizardData) -> Result<DraftSaveResponse, CliError> {
        let body = DraftSaveRequest { wizard_data: data.clone() };
        self.json(self.http.put(self.url(&wizard_draft_path(screen_id))).json(&body), classify_failure)
            .await
    }

    /// `POST /api/ai/documents/designDoc` with screenshots as multipart parts.
    pub async fn design_document(
        &self,
        screen_id: i64,
        screen_name: &str,
        screenshots: Vec<Screenshot>,
    ) -> Result<Download, CliError> {
        let mut form = Form::new().text("screen_id", screen_id.to_string());
        for shot in screenshots {
            let file_name = shot.file_name();
            let part = Part::bytes(shot.png).file_name(file_name).mime_str("image/png")?;
            form = form.part("screenshots", part).text("screenshot_labels", shot.label);
        }
        let request = self.http.post(self.url(DESIGN_DOC_PATH)).multipart(form);
        self.download(request, screen_name, classify_generate_failure).await
    }

    pub async fn download_path(&self, path: &str, screen_name: &str) -> Result<Download, CliError> {
        self.download(self.http.get(self.url(path)), screen_name, classify_failure).await
    }

    async fn download(
        &self,
        request: reqwest::RequestBuilder,
        screen_name: &str,
        classify: Classifier,
    ) -> Result<Download, CliError> {
        let response = self.send(request, classify).await?;
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let filename = download_filename(disposition.as_deref(), screen_name);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download { filename, bytes })
    }
}

/// Joins `path` onto `base` with exactly one slash between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
