//! Standalone preview document assembly.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::bootstrap::{RUNTIME_SCRIPT, icon_table};
use crate::cycle::MountPolicy;
use crate::extract::component_name;
use crate::sanitize::sanitize;

/// Capabilities granted to the preview frame. Scripts run, but the frame gets
/// an opaque origin and cannot reach the host page's storage or DOM.
pub const SANDBOX_FLAGS: &str = "allow-scripts allow-forms allow-modals allow-popups";

/// Characters of sanitized source shown in diagnostics.
pub const EXCERPT_CHARS: usize = 1000;

const RUNTIME_URLS: [&str; 6] = [
    "https://unpkg.com/react@18/umd/react.development.js",
    "https://unpkg.com/react-dom@18/umd/react-dom.development.js",
    "https://unpkg.com/@babel/standalone/babel.min.js",
    "https://cdn.tailwindcss.com",
    "https://unpkg.com/lucide@latest",
    "https://unpkg.com/html2canvas@1.4.1/dist/html2canvas.min.js",
];

const STYLE: &str = "body { margin: 0; padding: 0; font-family: system-ui, -apple-system, sans-serif; }
#root { width: 100vw; height: 100vh; }
#diagnostic { padding: 20px; color: #dc2626; background: #fef2f2; font-family: monospace; white-space: pre-wrap; }";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewDocument {
    pub html: String,
    pub component_name: String,
    pub content_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    code: &'a str,
    component: &'a str,
    excerpt: String,
    max_attempts: u32,
    interval_ms: u64,
    icons: Vec<(&'static str, String)>,
}

/// SHA-256 of the raw source, hex encoded. Identical source means an
/// identical document, so the frame is not rebuilt.
#[must_use]
pub fn content_key(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect::<String>()
}

#[must_use]
pub fn excerpt(code: &str) -> String {
    code.chars().take(EXCERPT_CHARS).collect()
}

/// Builds the complete frame document for `source`.
#[must_use]
pub fn build_document(source: &str, policy: &MountPolicy) -> PreviewDocument {
    let name = component_name(source);
    let code = sanitize(source);
    let key = content_key(source);

    let payload = Payload {
        code: &code,
        component: &name,
        excerpt: excerpt(&code),
        max_attempts: policy.max_attempts,
        interval_ms: u64::try_from(policy.retry_interval.as_millis()).unwrap_or(u64::MAX),
        icons: icon_table(),
    };
    // Serializing plain strings and integers cannot fail; an empty payload
    // would surface in the frame as a setup error.
    let encoded = STANDARD.encode(serde_json::to_vec(&payload).unwrap_or_default());

    let scripts: String = RUNTIME_URLS
        .iter()
        .map(|url| format!("  <script crossorigin src=\"{url}\"></script>\n"))
        .collect();

    let html = format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"UTF-8\">
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
  <title>Preview</title>
{scripts}  <style>
{STYLE}
  </style>
</head>
<body>
  <div id=\"root\"></div>
  <div id=\"diagnostic\" hidden></div>
  <script id=\"forgeflow-payload\" type=\"text/plain\" data-key=\"{key}\">{encoded}</script>
  <script>
{RUNTIME_SCRIPT}  </script>
</body>
</html>
"
    );

    PreviewDocument { html, component_name: name, content_key: key }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;
