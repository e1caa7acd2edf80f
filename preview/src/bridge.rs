//! Host <-> frame message protocol.
//!
//! Messages travel over `postMessage` as plain objects tagged by `type`.
//! The host drives modal screenshots: open the modal, wait for the frame to
//! acknowledge, capture, then close it again. Every wait is bounded by
//! [`ACK_TIMEOUT`]; a timeout resolves to "no screenshot" rather than an
//! error that aborts document generation.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::cycle::RenderPhase;

pub const ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Label of the screenshot taken before any modal is opened.
pub const MAIN_SCREEN_LABEL: &str = "Main screen";

/// Generated code wires modal state for `modal-0` through `modal-4` only.
pub const MAX_ADDRESSABLE_MODALS: usize = 5;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("malformed frame message: {0}")]
    Malformed(String),
    #[error("screenshot is not a base64 data URL")]
    UnsupportedDataUrl,
    #[error("screenshot payload could not be decoded: {0}")]
    Decode(String),
    #[error("timed out waiting for {0}")]
    Timeout(String),
    #[error("capture of {label} failed: {message}")]
    CaptureFailed { label: String, message: String },
}

/// Messages the host posts into the frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    OpenModal {
        #[serde(rename = "modalId")]
        modal_id: String,
    },
    CloseModal,
    CaptureScreenshot {
        label: String,
    },
}

impl HostMessage {
    #[must_use]
    pub fn to_json(&self) -> String {
        // Tagged enums of strings always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Short description used in timeout errors.
    #[must_use]
    pub fn awaited(&self) -> String {
        match self {
            Self::OpenModal { modal_id } => format!("{modal_id} to open"),
            Self::CloseModal => "modal to close".to_owned(),
            Self::CaptureScreenshot { label } => format!("screenshot of {label}"),
        }
    }
}

/// Messages the frame posts back to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameMessage {
    ModalOpened {
        #[serde(rename = "modalId")]
        modal_id: String,
    },
    ModalClosed,
    ScreenshotCaptured {
        label: String,
        #[serde(rename = "dataUrl")]
        data_url: String,
    },
    ScreenshotFailed {
        label: String,
        #[serde(default)]
        message: String,
    },
    PreviewStatus {
        phase: RenderPhase,
        #[serde(default)]
        attempts: u32,
        #[serde(default)]
        key: String,
    },
}

impl FrameMessage {
    /// Parses a message object received from the frame.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Malformed`] for objects without a known `type`.
    pub fn parse(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json).map_err(|e| BridgeError::Malformed(e.to_string()))
    }

    /// True when `self` answers `request`.
    #[must_use]
    pub fn acknowledges(&self, request: &HostMessage) -> bool {
        match (request, self) {
            (HostMessage::OpenModal { modal_id: wanted }, Self::ModalOpened { modal_id }) => wanted == modal_id,
            (HostMessage::CloseModal, Self::ModalClosed) => true,
            (
                HostMessage::CaptureScreenshot { label: wanted },
                Self::ScreenshotCaptured { label, .. } | Self::ScreenshotFailed { label, .. },
            ) => wanted == label,
            _ => false,
        }
    }
}

/// Position of `modal-N` in the generated modal state, if it is addressable.
#[must_use]
pub fn modal_index(modal_id: &str) -> Option<usize> {
    modal_id
        .strip_prefix("modal-")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n < MAX_ADDRESSABLE_MODALS)
}

/// One screenshot in a capture run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureStep {
    pub label: String,
    pub modal_id: Option<String>,
}

impl CaptureStep {
    /// Host messages in the order they are sent for this step.
    #[must_use]
    pub fn messages(&self) -> Vec<HostMessage> {
        let capture = HostMessage::CaptureScreenshot { label: self.label.clone() };
        match &self.modal_id {
            Some(id) => vec![HostMessage::OpenModal { modal_id: id.clone() }, capture, HostMessage::CloseModal],
            None => vec![capture],
        }
    }
}

/// Main screen first, then each addressable modal labelled by its title.
#[must_use]
pub fn capture_plan<'a>(modals: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<CaptureStep> {
    let mut steps = vec![CaptureStep { label: MAIN_SCREEN_LABEL.to_owned(), modal_id: None }];
    for (id, title) in modals {
        let Some(index) = modal_index(id) else {
            continue;
        };
        let title = title.trim();
        let label = if title.is_empty() { format!("Modal {}", index + 1) } else { title.to_owned() };
        steps.push(CaptureStep { label, modal_id: Some(id.to_owned()) });
    }
    steps
}

const UNSAFE_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A rasterized frame ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screenshot {
    pub label: String,
    pub png: Vec<u8>,
}

impl Screenshot {
    /// Builds a screenshot from a `SCREENSHOT_CAPTURED` payload.
    ///
    /// # Errors
    ///
    /// Fails when `data_url` is not a base64 data URL.
    pub fn from_data_url(label: &str, data_url: &str) -> Result<Self, BridgeError> {
        Ok(Self { label: label.to_owned(), png: decode_data_url(data_url)? })
    }

    /// Upload file name derived from the label. Separators and characters
    /// that are invalid in file names become `_`; a blank label is `screenshot`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem: String = self
            .label
            .trim()
            .chars()
            .map(|c| if c.is_control() || UNSAFE_FILE_CHARS.contains(&c) { '_' } else { c })
            .collect();
        let stem = stem.trim_matches('.');
        if stem.is_empty() { "screenshot.png".to_owned() } else { format!("{stem}.png") }
    }
}

/// Decodes the body of a `data:<mime>;base64,<body>` URL.
///
/// # Errors
///
/// Fails for non-data URLs, non-base64 encodings and corrupt bodies.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, BridgeError> {
    let (header, body) = data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or(BridgeError::UnsupportedDataUrl)?;
    if !header.ends_with(";base64") {
        return Err(BridgeError::UnsupportedDataUrl);
    }
    STANDARD.decode(body.trim()).map_err(|e| BridgeError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;
