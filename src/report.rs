//! View models for the scan report and the preview/export panel.
//!
//! These hold no state of their own; they are rebuilt from the current
//! registry, scan result and export phase whenever the UI asks.

use crate::registry::FileRegistry;
use crate::schema::{Match, RedactionArea, ScanResult};
use crate::size_utils::{format_file_size, page_label};
use serde::Serialize;

/// Sample texts shown per rule group before collapsing into "+N more".
pub const SAMPLES_PER_GROUP: usize = 3;

pub const EXPORT_LABEL: &str = "Download Merged PDF";
pub const EXPORTING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuleGroup {
    pub rule_name: String,
    pub count: usize,
    pub samples: Vec<String>,
    pub hidden: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportView {
    pub total_matches: usize,
    /// Groups keyed by rule name, in the order each name first appears.
    pub groups: Vec<RuleGroup>,
}

impl ReportView {
    pub fn build(matches: &[Match]) -> Self {
        let mut grouped: Vec<(&str, Vec<&Match>)> = Vec::new();
        for m in matches {
            match grouped.iter_mut().find(|(name, _)| *name == m.rule_name) {
                Some((_, items)) => items.push(m),
                None => grouped.push((m.rule_name.as_str(), vec![m])),
            }
        }

        let groups = grouped
            .into_iter()
            .map(|(name, items)| RuleGroup {
                rule_name: name.to_string(),
                count: items.len(),
                samples: items
                    .iter()
                    .take(SAMPLES_PER_GROUP)
                    .map(|m| m.text.clone())
                    .collect(),
                hidden: items.len().saturating_sub(SAMPLES_PER_GROUP),
            })
            .collect();

        Self {
            total_matches: matches.len(),
            groups,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilePreview {
    pub file_id: String,
    pub name: String,
    pub page_count: u32,
    pub page_label: String,
    pub size_label: String,
    pub redacted: usize,
    pub areas: Vec<RedactionArea>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PreviewView {
    pub files: Vec<FilePreview>,
    pub total_files: usize,
    pub total_pages: u32,
    pub total_size_label: String,
    pub can_export: bool,
    pub is_exporting: bool,
    pub export_label: String,
}

impl PreviewView {
    pub fn build(registry: &FileRegistry, scan: &ScanResult, is_exporting: bool) -> Self {
        let files = registry
            .files()
            .iter()
            .map(|file| {
                let areas: Vec<RedactionArea> = scan
                    .areas
                    .iter()
                    .filter(|a| a.file_id == file.id)
                    .cloned()
                    .collect();
                FilePreview {
                    file_id: file.id.clone(),
                    name: file.name.clone(),
                    page_count: file.page_count,
                    page_label: page_label(file.page_count),
                    size_label: format_file_size(file.size as u64),
                    redacted: areas.len(),
                    areas,
                }
            })
            .collect();

        Self {
            files,
            total_files: registry.len(),
            total_pages: registry.total_pages(),
            total_size_label: format_file_size(registry.total_size()),
            can_export: !registry.is_empty() && !is_exporting,
            is_exporting,
            export_label: if is_exporting {
                EXPORTING_LABEL.into()
            } else {
                EXPORT_LABEL.into()
            },
        }
    }
}
