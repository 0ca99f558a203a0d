//! Browser glue for the export action: the artificial delay and the download.
//!
//! Only meaningful inside a browser; these functions call web-sys imports and
//! are not exercised by native unit tests.

use crate::schema::WorkspaceError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn browser_err(context: &str, err: JsValue) -> WorkspaceError {
    WorkspaceError::Browser(format!("{}: {:?}", context, err))
}

/// Resolves after `ms` milliseconds using `window.setTimeout`.
pub async fn sleep_ms(ms: u32) -> Result<(), WorkspaceError> {
    let window = web_sys::window().ok_or_else(|| WorkspaceError::Browser("No window".into()))?;
    let mut schedule_err = None;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(err) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
        {
            schedule_err = Some(err);
        }
    });
    if let Some(err) = schedule_err {
        return Err(browser_err("setTimeout failed", err));
    }
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| browser_err("timer rejected", e))
}

/// Offers `bytes` to the user as a file download named `file_name`.
///
/// The bytes are wrapped in a blob URL, a temporary anchor element is
/// clicked, then the element and the URL are released.
pub fn trigger_download(bytes: &[u8], file_name: &str) -> Result<(), WorkspaceError> {
    let window = web_sys::window().ok_or_else(|| WorkspaceError::Browser("No window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| WorkspaceError::Browser("No document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| WorkspaceError::Browser("No document body".into()))?;

    let array = js_sys::Uint8Array::new_with_length(bytes.len() as u32);
    array.copy_from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(crate::file_utils::PDF_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| browser_err("Blob creation failed", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| browser_err("createObjectURL failed", e))?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| browser_err("createElement failed", e))?
        .dyn_into()
        .map_err(|_| WorkspaceError::Browser("Element is not an anchor".into()))?;
    link.set_href(&url);
    link.set_download(file_name);

    body.append_child(&link)
        .map_err(|e| browser_err("appendChild failed", e))?;
    link.click();
    body.remove_child(&link)
        .map_err(|e| browser_err("removeChild failed", e))?;
    Url::revoke_object_url(&url).map_err(|e| browser_err("revokeObjectURL failed", e))?;

    Ok(())
}
