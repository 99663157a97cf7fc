// Background service worker: opens the side panel from the toolbar icon and
// logs installation. No messaging, no scheduled work.

use wasm_bindgen::prelude::*;

use crate::chrome;
use crate::error::js_error_text;

pub const INSTALL_NOTICE: &str = "Lexly installed.";

/// Called from the worker's module loader
#[wasm_bindgen]
pub fn start_background() {
    wasm_logger::init(wasm_logger::Config::default());

    chrome::on_installed(|_details| {
        log::info!("{INSTALL_NOTICE}");
    });

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = chrome::open_panel_on_action_click().await {
            log::error!("Failed to set side panel behavior: {}", js_error_text(&e));
        }
    });
}
