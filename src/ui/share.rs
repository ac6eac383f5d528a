//! Online editor hand-off
//!
//! Short output travels in the editor URL itself; long output is parked in
//! local storage under its digest and only the key travels.

use wasm_bindgen::JsValue;

use crate::app::ShareAction;

/// Base URL of the online score editor
pub const EDITOR_URL: &str = "https://editor.grame.fr/";

pub fn inline_url(content: &str) -> String {
    format!(
        "{}?code={}",
        EDITOR_URL,
        String::from(js_sys::encode_uri_component(content))
    )
}

pub fn stored_url(key: &str) -> String {
    format!("{}?score={}", EDITOR_URL, key)
}

/// Resolve the share action and open the editor in a new tab
pub fn open_in_editor(action: ShareAction) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;

    let url = match action {
        ShareAction::Inline { content } => inline_url(&content),
        ShareAction::Stored { key, content } => {
            let storage = window
                .local_storage()?
                .ok_or_else(|| JsValue::from_str("local storage unavailable"))?;
            storage.set_item(&key, &content)?;
            stored_url(&key)
        }
    };

    window.open_with_url_and_target(&url, "_blank")?;
    Ok(())
}
