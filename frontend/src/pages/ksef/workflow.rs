use std::collections::BTreeSet;

use crate::api::KsefCandidate;

/// Phases of the KSeF import workflow. Fetch and import are the only
/// suspension points; selection changes are synchronous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Fetching,
    ResultsShown,
    Importing,
}

/// Candidate list plus the selection set, keyed by KSeF reference number.
///
/// Candidates flagged `already_exists` are never selectable: they are
/// excluded from the default selection, ignored by `toggle` and
/// `select_all`, and never handed to the import call. After a successful
/// import the submitted candidates are re-flagged in place, so the
/// displayed list stays consistent with the backend without a refetch.
#[derive(Debug, Clone, Default)]
pub struct ImportWorkflow {
    phase: WorkflowPhase,
    candidates: Vec<KsefCandidate>,
    selected: BTreeSet<String>,
}

impl ImportWorkflow {
    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn candidates(&self) -> &[KsefCandidate] {
        &self.candidates
    }

    pub fn has_results(&self) -> bool {
        matches!(
            self.phase,
            WorkflowPhase::ResultsShown | WorkflowPhase::Importing
        )
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, WorkflowPhase::Fetching | WorkflowPhase::Importing)
    }

    pub fn is_selected(&self, ksef_numer: &str) -> bool {
        self.selected.contains(ksef_numer)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Enters the fetching phase. Returns false (and changes nothing) while
    /// a fetch or import is already in flight, which is what disables the
    /// triggering button against double submissions.
    pub fn begin_fetch(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = WorkflowPhase::Fetching;
        true
    }

    /// Stores the fetched candidates and pre-selects every one that does not
    /// exist locally yet. An empty list is a valid displayed outcome.
    pub fn complete_fetch(&mut self, candidates: Vec<KsefCandidate>) {
        self.selected = candidates
            .iter()
            .filter(|candidate| !candidate.already_exists)
            .map(|candidate| candidate.ksef_numer.clone())
            .collect();
        self.candidates = candidates;
        self.phase = WorkflowPhase::ResultsShown;
    }

    /// A failed fetch returns to idle with no partial results retained.
    pub fn fail_fetch(&mut self) {
        self.candidates.clear();
        self.selected.clear();
        self.phase = WorkflowPhase::Idle;
    }

    /// Flips one candidate in the selection set. No-op for candidates that
    /// already exist locally.
    pub fn toggle(&mut self, ksef_numer: &str) {
        let selectable = self
            .candidates
            .iter()
            .any(|candidate| candidate.ksef_numer == ksef_numer && !candidate.already_exists);
        if !selectable {
            return;
        }
        if !self.selected.remove(ksef_numer) {
            self.selected.insert(ksef_numer.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self
            .candidates
            .iter()
            .filter(|candidate| !candidate.already_exists)
            .map(|candidate| candidate.ksef_numer.clone())
            .collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Enters the importing phase and returns the selected candidates in
    /// list order. Returns `None` (and stays put) when there is nothing to
    /// import or another operation is in flight.
    pub fn begin_import(&mut self) -> Option<Vec<KsefCandidate>> {
        if self.phase != WorkflowPhase::ResultsShown || self.selected.is_empty() {
            return None;
        }
        let payload: Vec<KsefCandidate> = self
            .candidates
            .iter()
            .filter(|candidate| self.selected.contains(&candidate.ksef_numer))
            .cloned()
            .collect();
        self.phase = WorkflowPhase::Importing;
        Some(payload)
    }

    /// Marks the submitted candidates as existing and clears the selection;
    /// the list itself is retained so no refetch is needed.
    pub fn complete_import(&mut self, imported: &[String]) {
        for candidate in &mut self.candidates {
            if imported.contains(&candidate.ksef_numer) {
                candidate.already_exists = true;
            }
        }
        self.selected.clear();
        self.phase = WorkflowPhase::ResultsShown;
    }

    /// A failed import keeps the flags and the selection as they were, so
    /// the user can retry. Partial success is not modelled; the backend
    /// reports a single aggregate outcome.
    pub fn fail_import(&mut self) {
        self.phase = WorkflowPhase::ResultsShown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(ksef_numer: &str, already_exists: bool) -> KsefCandidate {
        KsefCandidate {
            ksef_numer: ksef_numer.to_string(),
            numer: format!("FV/{}", ksef_numer),
            data: "2026-01-05".to_string(),
            kwota: 100.0,
            dostawca: "Dostawca".to_string(),
            dostawca_nip: "1111111111".to_string(),
            termin_platnosci: None,
            already_exists,
        }
    }

    #[test]
    fn default_selection_is_exactly_the_non_existing_candidates() {
        let mut workflow = ImportWorkflow::default();
        assert!(workflow.begin_fetch());
        workflow.complete_fetch(vec![
            candidate("a", false),
            candidate("b", true),
            candidate("c", false),
        ]);

        assert_eq!(workflow.phase(), WorkflowPhase::ResultsShown);
        assert_eq!(workflow.selected_ids(), vec!["a".to_string(), "c".to_string()]);
        assert!(workflow.is_selected("a"));
        assert!(!workflow.is_selected("b"));
    }

    #[test]
    fn empty_fetch_result_is_shown_not_treated_as_error() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![]);
        assert_eq!(workflow.phase(), WorkflowPhase::ResultsShown);
        assert!(workflow.has_results());
        assert!(workflow.candidates().is_empty());
        assert_eq!(workflow.selected_count(), 0);
    }

    #[test]
    fn toggling_an_existing_candidate_is_a_noop() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", false), candidate("b", true)]);

        workflow.toggle("b");
        assert!(!workflow.is_selected("b"));
        assert_eq!(workflow.selected_count(), 1);

        // Unknown ids are ignored too.
        workflow.toggle("missing");
        assert_eq!(workflow.selected_count(), 1);
    }

    #[test]
    fn toggle_flips_selection_for_new_candidates() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", false)]);

        workflow.toggle("a");
        assert!(!workflow.is_selected("a"));
        workflow.toggle("a");
        assert!(workflow.is_selected("a"));
    }

    #[test]
    fn select_all_never_selects_existing_candidates() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", false), candidate("b", true)]);

        workflow.deselect_all();
        assert_eq!(workflow.selected_count(), 0);

        workflow.select_all();
        assert_eq!(workflow.selected_ids(), vec!["a".to_string()]);
    }

    #[test]
    fn begin_fetch_is_rejected_while_busy() {
        let mut workflow = ImportWorkflow::default();
        assert!(workflow.begin_fetch());
        assert!(!workflow.begin_fetch());

        workflow.complete_fetch(vec![candidate("a", false)]);
        let _ = workflow.begin_import().unwrap();
        assert!(!workflow.begin_fetch());
    }

    #[test]
    fn begin_import_requires_results_and_a_selection() {
        let mut workflow = ImportWorkflow::default();
        assert!(workflow.begin_import().is_none());

        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", true)]);
        // Everything already exists, nothing selected.
        assert!(workflow.begin_import().is_none());
        assert_eq!(workflow.phase(), WorkflowPhase::ResultsShown);
    }

    #[test]
    fn successful_import_reflags_submitted_candidates_and_clears_selection() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", false), candidate("b", false)]);
        workflow.toggle("b");

        let payload = workflow.begin_import().unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].ksef_numer, "a");
        assert_eq!(workflow.phase(), WorkflowPhase::Importing);

        let submitted: Vec<String> = payload.iter().map(|c| c.ksef_numer.clone()).collect();
        workflow.complete_import(&submitted);
        assert_eq!(workflow.phase(), WorkflowPhase::ResultsShown);
        assert_eq!(workflow.selected_count(), 0);
        assert!(workflow.candidates()[0].already_exists);
        assert!(!workflow.candidates()[1].already_exists);
    }

    #[test]
    fn failed_import_keeps_flags_and_selection() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", false)]);

        let _ = workflow.begin_import().unwrap();
        workflow.fail_import();
        assert_eq!(workflow.phase(), WorkflowPhase::ResultsShown);
        assert!(workflow.is_selected("a"));
        assert!(!workflow.candidates()[0].already_exists);
    }

    #[test]
    fn failed_fetch_returns_to_idle_with_no_partial_results() {
        let mut workflow = ImportWorkflow::default();
        workflow.begin_fetch();
        workflow.complete_fetch(vec![candidate("a", false)]);

        workflow.begin_fetch();
        workflow.fail_fetch();
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert!(workflow.candidates().is_empty());
        assert_eq!(workflow.selected_count(), 0);
    }

    #[test]
    fn january_scenario_end_to_end() {
        // Fetch for 2026-01-01..2026-01-31 returns two candidates, one
        // already existing.
        let mut workflow = ImportWorkflow::default();
        assert!(workflow.begin_fetch());
        workflow.complete_fetch(vec![candidate("new-1", false), candidate("old-1", true)]);

        // Initial selection holds only the new candidate.
        assert_eq!(workflow.selected_ids(), vec!["new-1".to_string()]);

        // "Select all" leaves the selection unchanged.
        workflow.select_all();
        assert_eq!(workflow.selected_ids(), vec!["new-1".to_string()]);

        // Import of the size-1 selection.
        let payload = workflow.begin_import().unwrap();
        assert_eq!(payload.len(), 1);
        let submitted: Vec<String> = payload.iter().map(|c| c.ksef_numer.clone()).collect();
        workflow.complete_import(&submitted);

        // Both candidates now show as existing, selection is empty.
        assert!(workflow.candidates().iter().all(|c| c.already_exists));
        assert_eq!(workflow.selected_count(), 0);
    }
}
