//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read and write the shared state provided by `app` as
//! `RwSignal` contexts; pages compose them and own the network flows that
//! span several of them (generation, screen loading).

pub mod code_preview;
pub mod document_panel;
pub mod generation_progress_modal;
pub mod wizard;
