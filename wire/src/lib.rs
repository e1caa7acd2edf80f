//! Shared REST model for the `ForgeFlow` backend.
//!
//! This crate owns the JSON shapes exchanged with the AI backend and the pure
//! logic that both the browser `client` and the `cli` drive: the wizard
//! aggregate, the generation status tracker, the resource catalog with its
//! built-in fallback tables, and backend error classification.
//!
//! Nothing here performs I/O. Transport lives in the consumers (`gloo-net` in
//! the browser, `reqwest` in the CLI and server).

pub mod api;
pub mod catalog;
pub mod error;
pub mod status;
pub mod wizard;

pub use api::{GenerateAck, GenerateReply, GenerateRequest, Menu, Screen, WizardDraft};
pub use catalog::{ActionResource, ComponentResource, Layout, WizardResources};
pub use error::{ApiError, classify_generate_failure};
pub use status::{GenerationState, GenerationStatus, PollPolicy, StatusTracker, Transition};
pub use wizard::{Wizard, WizardData};
