//! # client
//!
//! Leptos + WASM frontend for Vivaran, the medical bill analysis app.
//!
//! Pages, components and reactive state live here, together with the browser
//! bindings (`gloo-net`, `gloo-timers`, `web-sys`) for the seams defined by the
//! `authflow` crate. The OAuth completion logic itself is in `authflow`; this
//! crate wires it to `localStorage`, `fetch`, timers and the router.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point called by the hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger was already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
