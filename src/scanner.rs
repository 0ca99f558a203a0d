//! # Mock Scanner
//!
//! Fabricates matches and overlay rectangles for the uploaded files.
//!
//! Nothing here reads document content. Each file gets a random number of
//! match slots; every slot picks one of a handful of sample values and keeps
//! it only when the rule for that sample's category exists and is enabled.
//! The paired overlay is a random rectangle expressed in percent of the page.
//!
//! Running the scan twice on the same input gives different output unless
//! the random generator is seeded.

use crate::file_utils::generate_id;
use crate::rules::RuleStore;
use crate::schema::{Match, RedactionArea, ScanResult, UploadedFile};
use rand::Rng;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// A canned value the scanner pretends to find, keyed by rule id.
#[derive(Debug, Clone, Copy)]
pub struct SensitiveSample {
    pub text: &'static str,
    pub rule_id: &'static str,
}

pub const SAMPLES: [SensitiveSample; 5] = [
    SensitiveSample { text: "John Doe", rule_id: "name" },
    SensitiveSample { text: "Jane Smith", rule_id: "name" },
    SensitiveSample { text: "ACME CORP PVT LTD", rule_id: "trade" },
    SensitiveSample { text: "27AAPFU0939F1ZV", rule_id: "gstin" },
    SensitiveSample { text: "ARN-1234567890", rule_id: "arn" },
];

/// Lowest x/y offset of an overlay, in percent.
pub const AREA_MIN_POS: f64 = 10.0;
/// Highest x/y offset of an overlay, in percent.
pub const AREA_MAX_POS: f64 = 70.0;
pub const AREA_MIN_WIDTH: f64 = 15.0;
pub const AREA_MAX_WIDTH: f64 = 35.0;
/// Overlays cover a single text line.
pub const AREA_HEIGHT: f64 = 6.0;

/// Produces a fresh scan result for `files` under `rules`.
///
/// # Arguments
///
/// * `files` - Registered files; each must have a page count of at least 1
/// * `rules` - Current rule set; disabled or missing rules suppress their samples
/// * `matches_per_file` - Inclusive range the per-file slot count is drawn from
/// * `rng` - Source of randomness
///
/// # Returns
///
/// Matches and areas in the same order, one area per match, sharing ids.
/// An empty file list gives an empty result.
pub fn scan<R: Rng + ?Sized>(
    files: &[UploadedFile],
    rules: &RuleStore,
    matches_per_file: RangeInclusive<u32>,
    rng: &mut R,
) -> ScanResult {
    let mut result = ScanResult::default();
    let mut used_ids = HashSet::new();

    for file in files {
        let slots = rng.gen_range(matches_per_file.clone());
        for _ in 0..slots {
            let sample = SAMPLES[rng.gen_range(0..SAMPLES.len())];
            let rule = match rules.find(sample.rule_id) {
                Some(rule) if rule.enabled => rule,
                _ => continue,
            };

            let id = loop {
                let candidate = generate_id(rng);
                if used_ids.insert(candidate.clone()) {
                    break candidate;
                }
            };
            let page_index = rng.gen_range(0..file.page_count.max(1));

            result.areas.push(RedactionArea {
                id: id.clone(),
                file_id: file.id.clone(),
                page_index,
                x: rng.gen_range(AREA_MIN_POS..AREA_MAX_POS),
                y: rng.gen_range(AREA_MIN_POS..AREA_MAX_POS),
                width: rng.gen_range(AREA_MIN_WIDTH..AREA_MAX_WIDTH),
                height: AREA_HEIGHT,
            });
            result.matches.push(Match {
                id,
                rule_id: rule.id.clone(),
                rule_name: rule.name.clone(),
                text: sample.text.to_string(),
                file_id: file.id.clone(),
                page_index,
            });
        }
    }

    result
}
