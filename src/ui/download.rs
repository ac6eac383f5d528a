//! Download through a hidden anchor
//!
//! The generated text leaves the page as a `data:` URI on an anchor element
//! that is appended, clicked, and removed again.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAnchorElement};

/// Percent-encoded `data:` URI carrying the content as plain text
pub fn data_uri(content: &str) -> String {
    format!(
        "data:text/plain;charset=utf-8,{}",
        String::from(js_sys::encode_uri_component(content))
    )
}

pub fn trigger_download(
    document: &Document,
    file_name: &str,
    content: &str,
) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("anchor creation failed"))?;
    anchor.set_href(&data_uri(content));
    anchor.set_download(file_name);
    let _ = anchor.style().set_property("display", "none");

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document body unavailable"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}
