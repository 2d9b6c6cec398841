mod app;
mod components;
mod config;
mod core;
mod models;
mod utils;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::{FirebaseConfig, PERSISTENCE};
use crate::core::backend;
use crate::utils::diagnostics;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    // Backend and persistence are ready before the first view mounts.
    match FirebaseConfig::load() {
        Ok(config) => {
            backend::bootstrap(config, PERSISTENCE.store());
        }
        Err(e) => diagnostics::error(format!("backend not configured: {}", e)),
    }

    let root = document()
        .get_element_by_id("app")
        .expect("Failed to find #app element")
        .unchecked_into::<web_sys::HtmlElement>();

    mount_to(root, App).forget();
}
