//! # client
//!
//! Leptos + WASM frontend for `ForgeFlow`: the five-step screen wizard, the
//! generation progress dialog, the sandboxed prototype preview and the
//! document panel.
//!
//! Domain rules live in the `wire` and `preview` crates; this crate wires
//! them to reactive state, browser I/O (`gloo-net`, `web-sys`) and views.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
