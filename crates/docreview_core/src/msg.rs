use std::path::PathBuf;

use crate::checklist::RiskFilter;
use crate::model::{AnalysisResult, SelectedFile};
use crate::selection::SelectionSource;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User dropped files or picked them in the file dialog.
    FilesChosen {
        source: SelectionSource,
        files: Vec<SelectedFile>,
    },
    /// User clicked Analyze.
    AnalyzeClicked,
    /// The analysis request finished, one way or the other.
    AnalysisCompleted {
        request_id: crate::RequestId,
        outcome: Result<AnalysisSuccess, AnalysisFailure>,
    },
    /// User edited the checklist search box.
    SearchChanged(String),
    /// User changed the risk selector.
    RiskFilterChanged(RiskFilter),
    /// User clicked Download CSV.
    DownloadCsvClicked,
    /// CSV download finished; `Ok` carries the saved path.
    DownloadFinished(Result<PathBuf, String>),
    /// User asked for an HTML report of the current result.
    ExportReportClicked,
    /// Report export finished; `Ok` carries the saved path.
    ExportFinished(Result<PathBuf, String>),
    /// User clicked Reset.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSuccess {
    pub analysis: AnalysisResult,
    pub csv_url: Option<String>,
}

/// Why an analysis produced no result, as the user is told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisFailure {
    EmptySelection,
    Server { status: u16, body: String },
    Transport(String),
}

impl AnalysisFailure {
    pub fn alert_text(&self) -> String {
        match self {
            AnalysisFailure::EmptySelection => crate::update::EMPTY_SELECTION_ALERT.to_string(),
            AnalysisFailure::Server { body, .. } => format!("Server error: {body}"),
            AnalysisFailure::Transport(detail) => format!("Network or server error: {detail}"),
        }
    }
}
