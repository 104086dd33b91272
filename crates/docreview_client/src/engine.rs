use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use docreview_core::{RequestId, SelectedFile};
use docreview_logging::{review_error, review_info};

use crate::analyze::{Analyzer, ReqwestAnalyzer};
use crate::download::CsvDownloader;
use crate::{AnalysisError, AnalysisOutput, ClientSettings, DownloadError};

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        files: Vec<SelectedFile>,
    },
    Download {
        url: String,
    },
}

#[derive(Debug)]
pub enum EngineEvent {
    AnalysisFinished {
        request_id: RequestId,
        result: Result<AnalysisOutput, AnalysisError>,
    },
    DownloadFinished {
        result: Result<PathBuf, DownloadError>,
    },
}

/// Runs requests on a background runtime so the UI loop never waits on IO.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(settings: ClientSettings, output_dir: PathBuf) -> (Self, mpsc::Receiver<EngineEvent>) {
        let analyzer = Arc::new(ReqwestAnalyzer::new(settings.clone()));
        Self::spawn_with(analyzer, CsvDownloader::new(settings, output_dir))
    }

    pub fn spawn_with(
        analyzer: Arc<dyn Analyzer>,
        downloader: CsvDownloader,
    ) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let downloader = Arc::new(downloader);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let analyzer = analyzer.clone();
                let downloader = downloader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(analyzer.as_ref(), downloader.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn analyze(&self, request_id: RequestId, files: Vec<SelectedFile>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Analyze { request_id, files });
    }

    pub fn download(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download { url: url.into() });
    }
}

/// Guarantees exactly one `AnalysisFinished` per request, even when the
/// task unwinds before reporting.
struct CompletionGuard {
    request_id: RequestId,
    event_tx: mpsc::Sender<EngineEvent>,
    sent: bool,
}

impl CompletionGuard {
    fn new(request_id: RequestId, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            request_id,
            event_tx,
            sent: false,
        }
    }

    fn complete(mut self, result: Result<AnalysisOutput, AnalysisError>) {
        self.send(result);
    }

    fn send(&mut self, result: Result<AnalysisOutput, AnalysisError>) {
        if self.sent {
            return;
        }
        self.sent = true;
        let _ = self.event_tx.send(EngineEvent::AnalysisFinished {
            request_id: self.request_id,
            result,
        });
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.sent {
            review_error!("Analysis request {} ended without a result", self.request_id);
            self.send(Err(AnalysisError::TransportError(
                "analysis task aborted".to_string(),
            )));
        }
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    downloader: &CsvDownloader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze { request_id, files } => {
            let guard = CompletionGuard::new(request_id, event_tx);
            review_info!("Request {} started with {} file(s)", request_id, files.len());
            let result = analyzer.analyze(&files).await;
            review_info!("Request {} finished ok={}", request_id, result.is_ok());
            guard.complete(result);
        }
        EngineCommand::Download { url } => {
            let result = downloader.download(&url).await;
            let _ = event_tx.send(EngineEvent::DownloadFinished { result });
        }
    }
}
