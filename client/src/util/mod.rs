//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (file saving, the preview frame's
//! message channel) from page and component logic.

pub mod download;
pub mod frame_bridge;
pub mod markdown;
