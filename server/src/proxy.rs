//! `/api/*` reverse proxy to the generation backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks only to this server, so the backend never needs CORS
//! and its address stays a deployment detail. Requests are forwarded with
//! method, path, query, body and end-to-end headers intact; responses are
//! relayed byte for byte (including `Content-Disposition` on downloads).
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become `502 Bad Gateway` with a JSON `detail` object,
//! the same shape the backend uses for its own errors.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Connection-scoped headers that must not cross the proxy (RFC 9110 §7.6.1),
/// plus the ones the outgoing client recomputes.
static HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
];

pub async fn forward(State(state): State<AppState>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    let url = upstream_url(&state.config.api_base_url, path);
    tracing::debug!(%method, %url, "forwarding");

    let request = state
        .http
        .request(method.clone(), &url)
        .headers(end_to_end(&headers))
        .body(body);

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%method, %url, error = %e, "backend request failed");
            return bad_gateway(&e);
        }
    };

    let status = response.status();
    let relayed = end_to_end(response.headers());
    match response.bytes().await {
        Ok(bytes) => {
            if status.is_server_error() {
                tracing::warn!(%method, %url, status = status.as_u16(), "backend error");
            }
            (status, relayed, bytes).into_response()
        }
        Err(e) => {
            tracing::warn!(%method, %url, error = %e, "backend body read failed");
            bad_gateway(&e)
        }
    }
}

/// Joins the incoming path (with query) onto the backend base URL.
#[must_use]
pub fn upstream_url(base: &str, path_and_query: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path_and_query.trim_start_matches('/'))
}

/// Copy of `headers` without hop-by-hop fields, including any named by the
/// `Connection` header itself. `Content-Length` is dropped too; both sides
/// recompute it from the body.
#[must_use]
pub fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let listed: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let hop = HOP_BY_HOP.contains(name) || *name == header::CONTENT_LENGTH || listed.iter().any(|l| l == name.as_str());
        if !hop {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

fn bad_gateway(error: &reqwest::Error) -> Response {
    let message = if error.is_timeout() {
        "backend did not answer in time".to_owned()
    } else {
        format!("backend unreachable: {error}")
    };
    let body = json!({ "detail": { "error_type": "proxy_error", "message": message } });
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
