//! Bindings for the extension host APIs the crate touches.
//!
//! Only `chrome.storage.local`, `chrome.sidePanel.setPanelBehavior` and
//! `chrome.runtime.onInstalled` are bound. Everything else goes through
//! `web-sys`.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn storage_local_get(keys: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn storage_local_set(items: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = remove)]
    async fn storage_local_remove(keys: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "sidePanel"], js_name = setPanelBehavior)]
    async fn side_panel_set_behavior(behavior: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onInstalled"], js_name = addListener)]
    fn on_installed_add_listener(callback: &Closure<dyn FnMut(JsValue)>);
}

/// True when `chrome.<path>` resolves to a defined value
pub fn has_api(path: &[&str]) -> bool {
    let mut current: JsValue = js_sys::global().into();
    let segments = ["chrome"].into_iter().chain(path.iter().copied());
    for segment in segments {
        match Reflect::get(&current, &JsValue::from_str(segment)) {
            Ok(next) if !next.is_undefined() && !next.is_null() => current = next,
            _ => return false,
        }
    }
    true
}

fn key_array(keys: &[&str]) -> JsValue {
    keys.iter()
        .map(|key| JsValue::from_str(key))
        .collect::<Array>()
        .into()
}

/// Read string values for `keys`. Missing or non-string entries come back as `None`.
pub async fn storage_get(keys: &[&str]) -> Result<Vec<Option<String>>, JsValue> {
    let items = storage_local_get(&key_array(keys)).await?;
    keys.iter()
        .map(|key| {
            Reflect::get(&items, &JsValue::from_str(key)).map(|value| value.as_string())
        })
        .collect()
}

pub async fn storage_set(entries: &[(&str, &str)]) -> Result<(), JsValue> {
    let items = Object::new();
    for (key, value) in entries {
        Reflect::set(&items, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }
    storage_local_set(&items.into()).await?;
    Ok(())
}

pub async fn storage_remove(keys: &[&str]) -> Result<(), JsValue> {
    storage_local_remove(&key_array(keys)).await?;
    Ok(())
}

/// Make the toolbar icon open the side panel
pub async fn open_panel_on_action_click() -> Result<(), JsValue> {
    let behavior = Object::new();
    Reflect::set(
        &behavior,
        &JsValue::from_str("openPanelOnActionClick"),
        &JsValue::TRUE,
    )?;
    side_panel_set_behavior(&behavior.into()).await?;
    Ok(())
}

/// Register `callback` for `chrome.runtime.onInstalled`. The closure lives for
/// the lifetime of the worker.
pub fn on_installed(callback: impl FnMut(JsValue) + 'static) {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(JsValue)>);
    on_installed_add_listener(&closure);
    closure.forget();
}
