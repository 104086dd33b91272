//! Docreview client: HTTP analysis, CSV download and effect execution.
mod analyze;
mod download;
mod engine;
mod filename;
mod persist;
mod selection;
mod types;

pub use analyze::{Analyzer, ClientSettings, ReqwestAnalyzer};
pub use download::CsvDownloader;
pub use engine::{EngineEvent, EngineHandle};
pub use filename::download_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use selection::{resolve_selection, selected_file_from_path, ResolvedSelection};
pub use types::{AnalysisError, AnalysisOutput, DownloadError, SelectionError};
