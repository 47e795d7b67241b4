//! EzDoc web shell.
//!
//! This crate provides the Leptos-based web interface: Cognito sign-in, the
//! session gate, the dashboard and the template library. The same crate is
//! rendered on the server (`ssr`) and hydrated in the browser (`hydrate`).

#![allow(non_snake_case)]

pub mod app;
pub mod auth;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod error;
pub mod pages;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    // A second init only happens on hot reload; keep the first logger.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}
