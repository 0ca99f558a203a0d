//! Application state and the reducer that drives it.
//!
//! Every change goes through [`AppState::update`]. Actions that change the
//! file list or the rule list trigger a full, synchronous rescan, so the
//! scan result always describes the current inputs.

use crate::console_log;
use crate::file_utils::redacted_file_name;
use crate::registry::{FileRegistry, IncomingFile};
use crate::report::{PreviewView, ReportView};
use crate::rules::RuleStore;
use crate::scanner;
use crate::schema::{Rule, ScanResult, WorkspaceError, WorkspaceOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Exporting,
}

#[derive(Debug, Clone)]
pub enum Action {
    AddFiles(Vec<IncomingFile>),
    RemoveFile(String),
    ClearFiles,
    ToggleRule(String),
    AddRule { name: String, pattern: String },
    RemoveRule(String),
    Rescan,
    BeginExport,
    FinishExport,
}

/// What the export step needs once the artificial delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    /// Untouched copy of the first file's bytes.
    pub bytes: Vec<u8>,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing changed; invalid or unknown input is ignored.
    Noop,
    /// State changed and the scan was recomputed if needed.
    Updated,
    FilesAdded(Vec<String>),
    RuleAdded(Rule),
    ExportReady(ExportPayload),
}

pub struct AppState {
    options: WorkspaceOptions,
    rules: RuleStore,
    files: FileRegistry,
    scan: ScanResult,
    export_phase: ExportPhase,
    rng: StdRng,
}

impl AppState {
    pub fn new(options: WorkspaceOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            options,
            rules: RuleStore::with_defaults(),
            files: FileRegistry::new(),
            scan: ScanResult::default(),
            export_phase: ExportPhase::Idle,
            rng,
        }
    }

    pub fn update(&mut self, action: Action) -> Result<Outcome, WorkspaceError> {
        let outcome = match action {
            Action::AddFiles(incoming) => {
                let offered = incoming.len();
                let max_pages = self.options.max_page_count();
                let accepted = self.files.add_files(incoming, max_pages, &mut self.rng);
                console_log!(
                    "accepted {} of {} dropped files",
                    accepted.len(),
                    offered
                );
                if accepted.is_empty() {
                    Outcome::Noop
                } else {
                    self.rescan();
                    Outcome::FilesAdded(accepted)
                }
            }
            Action::RemoveFile(id) => {
                let removed = self.files.remove(&id);
                self.rescan_if(removed)
            }
            Action::ClearFiles => {
                self.files.clear();
                self.scan = ScanResult::default();
                Outcome::Updated
            }
            Action::ToggleRule(id) => {
                let toggled = self.rules.toggle(&id);
                self.rescan_if(toggled)
            }
            Action::AddRule { name, pattern } => {
                match self.rules.add(&name, &pattern, &mut self.rng).cloned() {
                    Some(rule) => {
                        console_log!("added rule {} ({})", rule.name, rule.id);
                        self.rescan();
                        Outcome::RuleAdded(rule)
                    }
                    None => Outcome::Noop,
                }
            }
            Action::RemoveRule(id) => {
                let removed = self.rules.remove(&id);
                self.rescan_if(removed)
            }
            Action::Rescan => {
                self.rescan();
                Outcome::Updated
            }
            Action::BeginExport => return self.begin_export(),
            Action::FinishExport => {
                self.export_phase = ExportPhase::Idle;
                Outcome::Updated
            }
        };
        Ok(outcome)
    }

    fn rescan_if(&mut self, changed: bool) -> Outcome {
        if changed {
            self.rescan();
            Outcome::Updated
        } else {
            Outcome::Noop
        }
    }

    fn rescan(&mut self) {
        let (min, max) = self.options.matches_per_file();
        self.scan = scanner::scan(self.files.files(), &self.rules, min..=max, &mut self.rng);
        console_log!(
            "scan: {} files, {} matches",
            self.files.len(),
            self.scan.matches.len()
        );
    }

    fn begin_export(&mut self) -> Result<Outcome, WorkspaceError> {
        if self.export_phase == ExportPhase::Exporting {
            return Err(WorkspaceError::ExportInProgress);
        }
        let Some(first) = self.files.first() else {
            return Ok(Outcome::Noop);
        };
        let payload = ExportPayload {
            file_name: redacted_file_name(self.options.download_prefix(), &first.name),
            bytes: first.bytes.clone(),
            delay_ms: self.options.export_delay_ms(),
        };
        self.export_phase = ExportPhase::Exporting;
        console_log!("export started: {}", payload.file_name);
        Ok(Outcome::ExportReady(payload))
    }

    pub fn options(&self) -> &WorkspaceOptions {
        &self.options
    }

    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    pub fn files(&self) -> &FileRegistry {
        &self.files
    }

    pub fn scan(&self) -> &ScanResult {
        &self.scan
    }

    pub fn export_phase(&self) -> ExportPhase {
        self.export_phase
    }

    pub fn is_exporting(&self) -> bool {
        self.export_phase == ExportPhase::Exporting
    }

    pub fn can_export(&self) -> bool {
        !self.files.is_empty() && !self.is_exporting()
    }

    pub fn report(&self) -> ReportView {
        ReportView::build(&self.scan.matches)
    }

    pub fn preview(&self) -> PreviewView {
        PreviewView::build(&self.files, &self.scan, self.is_exporting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> AppState {
        AppState::new(WorkspaceOptions {
            seed: Some(seed),
            ..Default::default()
        })
    }

    fn pdf(name: &str, bytes: &[u8]) -> IncomingFile {
        IncomingFile::new(name, "application/pdf", bytes.to_vec())
    }

    fn add(state: &mut AppState, files: Vec<IncomingFile>) -> Vec<String> {
        match state.update(Action::AddFiles(files)).unwrap() {
            Outcome::FilesAdded(ids) => ids,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_new_state() {
        let state = seeded(1);
        assert_eq!(state.rules().len(), 4);
        assert!(state.files().is_empty());
        assert!(state.scan().is_empty());
        assert_eq!(state.export_phase(), ExportPhase::Idle);
        assert!(!state.can_export());
    }

    #[test]
    fn test_add_files_triggers_scan() {
        let mut state = seeded(2);
        let ids = add(&mut state, vec![pdf("a.pdf", b"a"), pdf("b.pdf", b"b")]);

        assert_eq!(ids.len(), 2);
        assert!(!state.scan().matches.is_empty());
        assert_eq!(state.scan().matches.len(), state.scan().areas.len());
    }

    #[test]
    fn test_only_pdfs_are_registered() {
        let mut state = seeded(3);
        let outcome = state
            .update(Action::AddFiles(vec![
                IncomingFile::new("x.png", "image/png", vec![1]),
                IncomingFile::new("y.docx", "", vec![2]),
            ]))
            .unwrap();
        assert_eq!(outcome, Outcome::Noop);
        assert!(state.files().is_empty());
    }

    #[test]
    fn test_remove_file_drops_its_matches() {
        let mut state = seeded(4);
        let ids = add(
            &mut state,
            vec![pdf("a.pdf", b"a"), pdf("b.pdf", b"b"), pdf("c.pdf", b"c")],
        );

        state.update(Action::RemoveFile(ids[1].clone())).unwrap();

        assert!(state.scan().matches.iter().all(|m| m.file_id != ids[1]));
        assert!(state.scan().areas.iter().all(|a| a.file_id != ids[1]));
        assert!(state.preview().files.iter().all(|f| f.file_id != ids[1]));
    }

    #[test]
    fn test_remove_unknown_file_is_noop() {
        let mut state = seeded(5);
        add(&mut state, vec![pdf("a.pdf", b"a")]);
        let before = state.scan().clone();

        let outcome = state.update(Action::RemoveFile("missing".into())).unwrap();
        assert_eq!(outcome, Outcome::Noop);
        assert_eq!(state.scan(), &before);
    }

    #[test]
    fn test_disabled_rule_yields_no_matches() {
        let mut state = seeded(6);
        let batch = (0..30).map(|i| pdf(&format!("{}.pdf", i), b"x")).collect();
        add(&mut state, batch);
        assert!(state.scan().matches.iter().any(|m| m.rule_id == "gstin"));

        state.update(Action::ToggleRule("gstin".into())).unwrap();
        assert!(state.scan().matches.iter().all(|m| m.rule_id != "gstin"));

        state.update(Action::Rescan).unwrap();
        assert!(state.scan().matches.iter().all(|m| m.rule_id != "gstin"));
    }

    #[test]
    fn test_clear_files_empties_results() {
        let mut state = seeded(7);
        add(&mut state, vec![pdf("a.pdf", b"a"), pdf("b.pdf", b"b")]);

        state.update(Action::ClearFiles).unwrap();

        assert!(state.files().is_empty());
        assert!(state.scan().matches.is_empty());
        assert!(state.scan().areas.is_empty());
        assert_eq!(state.report().total_matches, 0);
    }

    #[test]
    fn test_add_rule_and_ignore_empty() {
        let mut state = seeded(8);
        let outcome = state
            .update(Action::AddRule {
                name: "Phone".into(),
                pattern: r"\d{10}".into(),
            })
            .unwrap();
        assert!(matches!(outcome, Outcome::RuleAdded(ref r) if r.name == "Phone"));
        assert_eq!(state.rules().len(), 5);

        let outcome = state
            .update(Action::AddRule {
                name: "".into(),
                pattern: "x".into(),
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Noop);
        assert_eq!(state.rules().len(), 5);
    }

    #[test]
    fn test_remove_rule_rescans() {
        let mut state = seeded(9);
        let batch = (0..30).map(|i| pdf(&format!("{}.pdf", i), b"x")).collect();
        add(&mut state, batch);

        state.update(Action::RemoveRule("name".into())).unwrap();
        assert!(state.rules().find("name").is_none());
        assert!(state.scan().matches.iter().all(|m| m.rule_id != "name"));
    }

    #[test]
    fn test_export_without_files_is_noop() {
        let mut state = seeded(10);
        let outcome = state.update(Action::BeginExport).unwrap();
        assert_eq!(outcome, Outcome::Noop);
        assert!(!state.is_exporting());
    }

    #[test]
    fn test_export_returns_first_file_verbatim() {
        let mut state = seeded(11);
        let original = b"%PDF-1.7\nsecret stuff\n%%EOF".to_vec();
        add(
            &mut state,
            vec![pdf("invoice.pdf", &original), pdf("other.pdf", b"other")],
        );
        state.update(Action::ToggleRule("name".into())).unwrap();

        let payload = match state.update(Action::BeginExport).unwrap() {
            Outcome::ExportReady(payload) => payload,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(payload.bytes, original);
        assert_eq!(payload.file_name, "merged_redacted_invoice.pdf");
        assert_eq!(payload.delay_ms, 1500);
        assert!(state.is_exporting());
        assert!(!state.can_export());
    }

    #[test]
    fn test_second_export_refused_until_finished() {
        let mut state = seeded(12);
        add(&mut state, vec![pdf("a.pdf", b"a")]);

        state.update(Action::BeginExport).unwrap();
        assert!(matches!(
            state.update(Action::BeginExport),
            Err(WorkspaceError::ExportInProgress)
        ));

        state.update(Action::FinishExport).unwrap();
        assert!(!state.is_exporting());
        assert!(matches!(
            state.update(Action::BeginExport),
            Ok(Outcome::ExportReady(_))
        ));
    }

    #[test]
    fn test_export_uses_configured_prefix_and_delay() {
        let mut state = AppState::new(WorkspaceOptions {
            seed: Some(13),
            export_delay_ms: Some(0),
            download_prefix: Some("clean_".into()),
            ..Default::default()
        });
        add(&mut state, vec![pdf("a.pdf", b"a")]);

        match state.update(Action::BeginExport).unwrap() {
            Outcome::ExportReady(payload) => {
                assert_eq!(payload.file_name, "clean_a.pdf");
                assert_eq!(payload.delay_ms, 0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_rescan_regenerates_results() {
        let mut state = seeded(14);
        let batch = (0..10).map(|i| pdf(&format!("{}.pdf", i), b"x")).collect();
        add(&mut state, batch);
        let before = state.scan().clone();

        state.update(Action::Rescan).unwrap();
        assert_ne!(state.scan(), &before);
    }
}
