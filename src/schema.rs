//! Data structures and types for the redaction workspace.
//!
//! This module defines the core types used throughout the library,
//! including the error type, configuration options, and the records
//! that the scanner produces and the UI renders.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while driving the workspace.
///
/// Most user input is ignored silently rather than rejected, so this enum
/// only covers the few conditions the caller actually needs to see.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// An export was requested while a previous one is still pending.
    #[error("An export is already in progress")]
    ExportInProgress,
    /// A value could not be converted to or from its JS representation.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A browser API call (timer, blob, anchor element) failed.
    #[error("Browser API error: {0}")]
    Browser(String),
    /// Base64 input could not be decoded.
    #[error("base64 decode failed: {0}")]
    Decode(String),
}

impl From<WorkspaceError> for JsValue {
    fn from(err: WorkspaceError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// A named pattern rule shown in the rules panel.
///
/// The pattern is free-form text. It is displayed to the user but never
/// compiled or evaluated against document content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    /// Unique identifier. Default rules use their category name.
    pub id: String,
    /// Display name, e.g. "Trade Name".
    pub name: String,
    /// Regex-like pattern string.
    pub pattern: String,
    /// Whether the scanner may report matches for this rule.
    pub enabled: bool,
    /// Display color as `#rrggbb`.
    pub color: String,
}

/// An uploaded PDF and the metadata derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    /// Unique identifier within the registry.
    pub id: String,
    /// Original filename.
    pub name: String,
    /// Size of the original bytes.
    pub size: usize,
    /// Fabricated page count, never read from the document.
    pub page_count: u32,
    /// Original content, kept untouched for export.
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

/// A fabricated claim that a rule matched some text in a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub text: String,
    pub file_id: String,
    pub page_index: u32,
}

/// Overlay rectangle paired with a [`Match`], in percent of the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedactionArea {
    /// Same id as the match it belongs to.
    pub id: String,
    pub file_id: String,
    pub page_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Output of one scan pass. Always replaces the previous one wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    pub matches: Vec<Match>,
    pub areas: Vec<RedactionArea>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.areas.is_empty()
    }
}

/// Configuration options for the workspace.
///
/// All fields are optional. When not provided, the demo defaults are used.
/// The structure is deserialized from JSON so JavaScript can pass it to the
/// workspace constructor.
///
/// # Examples
///
/// Defaults:
/// ```json
/// {}
/// ```
///
/// Faster export and a reproducible scan:
/// ```json
/// { "export_delay_ms": 0, "seed": 42 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceOptions {
    /// Artificial delay before the download is triggered. Defaults to 1500 ms.
    pub export_delay_ms: Option<u32>,
    /// Prefix prepended to the downloaded filename.
    /// Defaults to `merged_redacted_`.
    pub download_prefix: Option<String>,
    /// Fewest match slots drawn per file. Defaults to 2.
    pub min_matches_per_file: Option<u32>,
    /// Most match slots drawn per file. Defaults to 4.
    pub max_matches_per_file: Option<u32>,
    /// Upper bound of the fabricated page count. Defaults to 10.
    pub max_page_count: Option<u32>,
    /// Seed for the random generator. Without it every run differs.
    pub seed: Option<u64>,
}

pub const DEFAULT_EXPORT_DELAY_MS: u32 = 1500;
pub const DEFAULT_DOWNLOAD_PREFIX: &str = "merged_redacted_";
pub const DEFAULT_MIN_MATCHES: u32 = 2;
pub const DEFAULT_MAX_MATCHES: u32 = 4;
pub const DEFAULT_MAX_PAGE_COUNT: u32 = 10;

impl WorkspaceOptions {
    /// Parses options from JSON, falling back to defaults on malformed input.
    pub fn from_json(options_json: Option<&str>) -> Self {
        match options_json {
            Some(s) => serde_json::from_str(s).unwrap_or_default(),
            None => Self::default(),
        }
    }

    pub fn export_delay_ms(&self) -> u32 {
        self.export_delay_ms.unwrap_or(DEFAULT_EXPORT_DELAY_MS)
    }

    pub fn download_prefix(&self) -> &str {
        self.download_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DOWNLOAD_PREFIX)
    }

    /// Inclusive range of match slots per file. A reversed range is swapped.
    pub fn matches_per_file(&self) -> (u32, u32) {
        let min = self.min_matches_per_file.unwrap_or(DEFAULT_MIN_MATCHES);
        let max = self.max_matches_per_file.unwrap_or(DEFAULT_MAX_MATCHES);
        if min <= max { (min, max) } else { (max, min) }
    }

    /// Upper bound of the fabricated page count, never below 1.
    pub fn max_page_count(&self) -> u32 {
        self.max_page_count
            .unwrap_or(DEFAULT_MAX_PAGE_COUNT)
            .max(1)
    }
}
