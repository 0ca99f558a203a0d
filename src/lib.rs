//! WASM core of a browser-side PDF redaction demo.
//!
//! All state lives in Rust behind [`RedactionWorkspace`]; JavaScript only
//! forwards DOM events and renders the view models it gets back. The scan is
//! a mock: page counts, matches and overlay rectangles are random, and the
//! export hands back the first file's original bytes.

pub mod logging;

mod assembly;
mod browser;
pub mod file_utils;
pub mod registry;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod schema;
pub mod size_utils;
pub mod state;

use wasm_bindgen::prelude::*;

pub use assembly::RedactionWorkspace;
pub use schema::{Match, RedactionArea, Rule, ScanResult, UploadedFile, WorkspaceError, WorkspaceOptions};

/// Called automatically by wasm-bindgen when the module loads.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log!("pdf-redact-wasm {} initialized", env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Same acceptance test the workspace applies to uploads, so the drop zone
/// can reflect it before handing files over.
#[wasm_bindgen(js_name = isPdfUpload)]
pub fn pdf_upload_check(mime_type: &str, name: &str) -> bool {
    file_utils::is_pdf_upload(mime_type, name)
}

#[wasm_bindgen(js_name = formatFileSize)]
pub fn file_size_label(bytes: f64) -> String {
    size_utils::format_file_size(bytes.max(0.0) as u64)
}

#[wasm_bindgen(js_name = redactedFileName)]
pub fn download_name(original: &str) -> String {
    file_utils::redacted_file_name(schema::DEFAULT_DOWNLOAD_PREFIX, original)
}
