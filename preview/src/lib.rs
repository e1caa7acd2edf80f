//! Sandboxed prototype preview pipeline.
//!
//! Turns AI-generated React component source into a self-contained HTML
//! document that mounts the component inside an isolated frame, and models
//! the message bridge the host uses to talk to that frame.
//!
//! The crate is UI-framework agnostic: the Leptos client installs the
//! document into an `<iframe srcdoc>` and the CLI writes it to disk.

pub mod bootstrap;
pub mod bridge;
pub mod cycle;
pub mod document;
pub mod extract;
pub mod sanitize;

pub use bridge::{BridgeError, CaptureStep, FrameMessage, HostMessage};
pub use cycle::{MountPolicy, RenderCycle, RenderPhase};
pub use document::{PreviewDocument, SANDBOX_FLAGS, build_document, content_key};
pub use extract::component_name;
pub use sanitize::sanitize;
