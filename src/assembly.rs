//! # Assembly Module
//!
//! The WASM-exported surface. It bridges JavaScript event handlers to the
//! Rust-side [`AppState`] and hands back plain JS objects for rendering.
//!
//! ## Overview
//!
//! JavaScript creates one [`RedactionWorkspace`] per page and forwards user
//! actions to it:
//! - files dropped or picked → `addFile` / `addFiles` / `addFileBase64`
//! - rules panel → `toggleRule`, `addRule`, `removeRule`
//! - preview panel → `removeFile`, `clearFiles`, `exportFirstFile`
//!
//! After each call the UI re-reads `getReport()` and `getPreview()`.
//!
//! ```javascript
//! import init, { RedactionWorkspace } from './pkg/pdf_redact_wasm.js';
//!
//! await init();
//! const ws = new RedactionWorkspace(null);
//! for (const file of event.dataTransfer.files) {
//!     ws.addFile(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! }
//! render(ws.getReport(), ws.getPreview());
//! button.disabled = !ws.canExport;
//! await ws.exportFirstFile();
//! ```

use crate::browser::{sleep_ms, trigger_download};
use crate::console_log;
use crate::registry::IncomingFile;
use crate::schema::{WorkspaceError, WorkspaceOptions};
use crate::state::{Action, AppState, ExportPayload, Outcome};
use base64::Engine;
use js_sys::{Array, Reflect, Uint8Array};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| WorkspaceError::Serialization(e.to_string()).into())
}

/// Stateful redaction workspace that holds files, rules and scan results
/// in Rust memory.
#[wasm_bindgen]
pub struct RedactionWorkspace {
    state: Rc<RefCell<AppState>>,
}

impl RedactionWorkspace {
    /// Internal entry point shared by the JS bindings (testable without JsValue).
    pub fn dispatch(&self, action: Action) -> Result<Outcome, WorkspaceError> {
        self.state.borrow_mut().update(action)
    }

    pub fn with_options(options: WorkspaceOptions) -> Self {
        Self {
            state: Rc::new(RefCell::new(AppState::new(options))),
        }
    }

    fn add_incoming(&self, incoming: Vec<IncomingFile>) -> Vec<String> {
        match self.dispatch(Action::AddFiles(incoming)) {
            Ok(Outcome::FilesAdded(ids)) => ids,
            _ => Vec::new(),
        }
    }

    /// Adds one file from base64 content. Returns the new id, if accepted.
    pub fn add_file_base64_internal(
        &self,
        name: &str,
        mime_type: &str,
        base64_bytes: &str,
    ) -> Result<Option<String>, WorkspaceError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(base64_bytes)
            .map_err(|e| WorkspaceError::Decode(format!("{:?}", e)))?;
        Ok(self
            .add_incoming(vec![IncomingFile::new(name, mime_type, bytes)])
            .pop())
    }

    /// Reads `{ name, type, bytes }` from a JS object. `bytes` may be a
    /// `Uint8Array` or an `ArrayBuffer`.
    fn incoming_from_js(entry: &JsValue) -> Result<IncomingFile, JsValue> {
        let name = Reflect::get(entry, &"name".into())?
            .as_string()
            .unwrap_or_default();
        let mime_type = Reflect::get(entry, &"type".into())?
            .as_string()
            .unwrap_or_default();
        let bytes = Uint8Array::new(&Reflect::get(entry, &"bytes".into())?).to_vec();
        Ok(IncomingFile::new(name, mime_type, bytes))
    }

    async fn run_export(
        state: Rc<RefCell<AppState>>,
        payload: ExportPayload,
    ) -> Result<(), WorkspaceError> {
        let result = match sleep_ms(payload.delay_ms).await {
            Ok(()) => trigger_download(&payload.bytes, &payload.file_name),
            Err(err) => Err(err),
        };
        state.borrow_mut().update(Action::FinishExport)?;
        match &result {
            Ok(()) => console_log!("export finished: {}", payload.file_name),
            Err(err) => console_log!("export failed: {}", err),
        }
        result
    }
}

#[wasm_bindgen]
impl RedactionWorkspace {
    /// Create a workspace. `options_json` follows `WorkspaceOptions`;
    /// missing or malformed JSON gives the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Self {
        Self::with_options(WorkspaceOptions::from_json(options_json.as_deref()))
    }

    /// Add one dropped or picked file.
    /// Returns the new file id, or `undefined` when the file is not a PDF.
    #[wasm_bindgen(js_name = addFile)]
    pub fn add_file(&self, name: &str, mime_type: &str, bytes: &[u8]) -> Option<String> {
        self.add_incoming(vec![IncomingFile::new(name, mime_type, bytes.to_vec())])
            .pop()
    }

    /// Add a batch of `{ name, type, bytes }` objects with a single rescan.
    /// Returns the ids of the accepted files.
    #[wasm_bindgen(js_name = addFiles)]
    pub fn add_files(&self, files: Array) -> Result<Vec<String>, JsValue> {
        let incoming = files
            .iter()
            .map(|entry| Self::incoming_from_js(&entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.add_incoming(incoming))
    }

    /// Convenience wrapper for callers holding base64 content.
    #[wasm_bindgen(js_name = addFileBase64)]
    pub fn add_file_base64(
        &self,
        name: &str,
        mime_type: &str,
        base64_bytes: &str,
    ) -> Result<Option<String>, JsValue> {
        Ok(self.add_file_base64_internal(name, mime_type, base64_bytes)?)
    }

    #[wasm_bindgen(js_name = removeFile)]
    pub fn remove_file(&self, id: &str) -> bool {
        matches!(
            self.dispatch(Action::RemoveFile(id.to_string())),
            Ok(Outcome::Updated)
        )
    }

    #[wasm_bindgen(js_name = clearFiles)]
    pub fn clear_files(&self) {
        let _ = self.dispatch(Action::ClearFiles);
    }

    #[wasm_bindgen(js_name = toggleRule)]
    pub fn toggle_rule(&self, id: &str) -> bool {
        matches!(
            self.dispatch(Action::ToggleRule(id.to_string())),
            Ok(Outcome::Updated)
        )
    }

    /// Add a custom rule. Empty name or pattern is ignored and returns `undefined`.
    #[wasm_bindgen(js_name = addRule)]
    pub fn add_rule(&self, name: &str, pattern: &str) -> Option<String> {
        match self.dispatch(Action::AddRule {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }) {
            Ok(Outcome::RuleAdded(rule)) => Some(rule.id),
            _ => None,
        }
    }

    #[wasm_bindgen(js_name = removeRule)]
    pub fn remove_rule(&self, id: &str) -> bool {
        matches!(
            self.dispatch(Action::RemoveRule(id.to_string())),
            Ok(Outcome::Updated)
        )
    }

    /// Throw away the current results and fabricate new ones.
    pub fn rescan(&self) {
        let _ = self.dispatch(Action::Rescan);
    }

    #[wasm_bindgen(js_name = getRules)]
    pub fn get_rules(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.borrow().rules().rules())
    }

    #[wasm_bindgen(js_name = getFiles)]
    pub fn get_files(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.borrow().files().files())
    }

    #[wasm_bindgen(js_name = getMatches)]
    pub fn get_matches(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.borrow().scan().matches)
    }

    #[wasm_bindgen(js_name = getAreas)]
    pub fn get_areas(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.borrow().scan().areas)
    }

    #[wasm_bindgen(js_name = getReport)]
    pub fn get_report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.borrow().report())
    }

    #[wasm_bindgen(js_name = getPreview)]
    pub fn get_preview(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.borrow().preview())
    }

    #[wasm_bindgen(getter, js_name = isExporting)]
    pub fn is_exporting(&self) -> bool {
        self.state.borrow().is_exporting()
    }

    #[wasm_bindgen(getter, js_name = canExport)]
    pub fn can_export(&self) -> bool {
        self.state.borrow().can_export()
    }

    /// Wait the configured delay, then download the first file unchanged.
    ///
    /// Resolves to `false` when there is nothing to export, `true` once the
    /// download has been triggered. Rejects while another export is pending.
    #[wasm_bindgen(js_name = exportFirstFile)]
    pub fn export_first_file(&self) -> js_sys::Promise {
        let outcome = self.dispatch(Action::BeginExport);
        let state = Rc::clone(&self.state);
        wasm_bindgen_futures::future_to_promise(async move {
            match outcome? {
                Outcome::ExportReady(payload) => {
                    Self::run_export(state, payload).await?;
                    Ok(JsValue::TRUE)
                }
                _ => Ok(JsValue::FALSE),
            }
        })
    }
}
