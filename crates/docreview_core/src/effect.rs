use crate::model::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitAnalysis {
        request_id: crate::RequestId,
        files: Vec<SelectedFile>,
    },
    /// Blocking notification for the user.
    ShowAlert(String),
    DownloadCsv { url: String },
    ExportReport { html: String },
}
