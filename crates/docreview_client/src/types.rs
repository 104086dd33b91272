use std::io;
use std::path::PathBuf;

use docreview_core::{AnalysisFailure, AnalysisResult};
use thiserror::Error;

use crate::persist::PersistError;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    pub analysis: AnalysisResult,
    /// Where the server published the checklist CSV, usually a relative path.
    pub csv_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no files selected")]
    EmptySelection,
    #[error("server responded with {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("transport error: {0}")]
    TransportError(String),
}

impl From<AnalysisError> for AnalysisFailure {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptySelection => AnalysisFailure::EmptySelection,
            AnalysisError::ServerError { status, body } => AnalysisFailure::Server { status, body },
            AnalysisError::TransportError(detail) => AnalysisFailure::Transport(detail),
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("download too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("{0:?} is not a regular file")]
    NotAFile(PathBuf),
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
