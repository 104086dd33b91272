use crate::present::ResultsView;
use crate::selection::FileListView;
use crate::Phase;

pub const ANALYZE_LABEL: &str = "Analyze Documents";
pub const ANALYZING_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub phase: Phase,
    pub file_list: FileListView,
    pub analyze_button: TriggerView,
    /// Present only while results are shown.
    pub results: Option<ResultsView>,
    pub search_query: String,
    pub risk_filter: String,
    pub status: String,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: &'static str,
}
