use crate::checklist::{ChecklistFilter, RiskFilter};
use crate::model::SelectedFile;
use crate::present::AnalysisViewModel;
use crate::selection::FileSelectionStore;
use crate::view_model::{AppViewModel, TriggerView, ANALYZE_LABEL, ANALYZING_LABEL};

pub type RequestId = u64;

pub const READY_STATUS: &str = "Ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FilesSelected,
    Analyzing,
    ResultsShown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    phase: Phase,
    selection: FileSelectionStore,
    analysis: Option<AnalysisViewModel>,
    filter: ChecklistFilter,
    /// Outstanding request. Survives a reset so the trigger stays disabled
    /// until the transport finishes.
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    status: String,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            selection: FileSelectionStore::new(),
            analysis: None,
            filter: ChecklistFilter::default(),
            in_flight: None,
            next_request_id: 1,
            status: READY_STATUS.to_string(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_files(&self) -> &[SelectedFile] {
        self.selection.files()
    }

    pub fn analysis(&self) -> Option<&AnalysisViewModel> {
        self.analysis.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn filter(&self) -> &ChecklistFilter {
        &self.filter
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.in_flight.is_some();
        AppViewModel {
            phase: self.phase,
            file_list: self.selection.view(),
            analyze_button: TriggerView {
                enabled: !busy,
                label: if busy { ANALYZING_LABEL } else { ANALYZE_LABEL },
            },
            results: match (self.phase, &self.analysis) {
                (Phase::ResultsShown, Some(analysis)) => Some(analysis.present(&self.filter)),
                _ => None,
            },
            search_query: self.filter.query().to_string(),
            risk_filter: self.filter.risk().label().to_string(),
            status: self.status.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render was pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.mark_dirty();
    }

    pub(crate) fn select_files(&mut self, files: Vec<SelectedFile>) {
        self.selection.set_files(files);
        self.analysis = None;
        self.phase = if self.selection.is_empty() {
            Phase::Idle
        } else {
            Phase::FilesSelected
        };
        self.mark_dirty();
    }

    /// Moves to `Analyzing` and hands out the id of the new request.
    pub(crate) fn begin_analysis(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.analysis = None;
        self.phase = Phase::Analyzing;
        self.mark_dirty();
        request_id
    }

    /// Clears the outstanding request if `request_id` is the one in flight.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn show_results(&mut self, analysis: AnalysisViewModel) {
        self.analysis = Some(analysis);
        self.phase = Phase::ResultsShown;
        self.mark_dirty();
    }

    pub(crate) fn return_to_selection(&mut self) {
        self.phase = if self.selection.is_empty() {
            Phase::Idle
        } else {
            Phase::FilesSelected
        };
        self.mark_dirty();
    }

    pub(crate) fn set_query(&mut self, raw: &str) -> bool {
        let before = self.filter.query().to_string();
        self.filter.set_query(raw);
        before != self.filter.query()
    }

    pub(crate) fn set_risk_filter(&mut self, risk: RiskFilter) -> bool {
        if *self.filter.risk() == risk {
            return false;
        }
        self.filter.set_risk(risk);
        true
    }

    pub(crate) fn reset(&mut self) {
        self.selection.clear();
        self.analysis = None;
        self.filter = ChecklistFilter::default();
        self.phase = Phase::Idle;
        self.status = READY_STATUS.to_string();
        self.mark_dirty();
    }
}
