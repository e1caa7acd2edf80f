//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls against same-origin `/api/...` paths; the server
//! crate proxies them to the generation backend. `status_poll` drives the
//! generation status loop on top of it.

pub mod api;
pub mod status_poll;
