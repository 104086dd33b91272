use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use docreview_client::{AtomicFileWriter, ClientSettings, EngineEvent, EngineHandle};
use docreview_core::{AnalysisFailure, AnalysisSuccess, Effect, Msg};
use docreview_logging::{review_info, review_warn};

use super::app::LoopEvent;

const REPORT_FILENAME: &str = "docreview-report.html";

pub struct EffectRunner {
    engine: EngineHandle,
    writer: AtomicFileWriter,
    events_tx: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        output_dir: PathBuf,
        events_tx: mpsc::Sender<LoopEvent>,
    ) -> Self {
        let (engine, engine_rx) = EngineHandle::spawn(settings, output_dir.clone());
        spawn_event_forwarder(engine_rx, events_tx.clone());
        Self {
            engine,
            writer: AtomicFileWriter::new(output_dir),
            events_tx,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis { request_id, files } => {
                    review_info!(
                        "SubmitAnalysis request_id={} files={}",
                        request_id,
                        files.len()
                    );
                    self.engine.analyze(request_id, files);
                }
                Effect::ShowAlert(text) => {
                    review_warn!("Alert: {}", text);
                    let _ = self.events_tx.send(LoopEvent::Alert(text));
                }
                Effect::DownloadCsv { url } => {
                    review_info!("DownloadCsv url={}", url);
                    self.engine.download(url);
                }
                Effect::ExportReport { html } => {
                    let result = self
                        .writer
                        .write(REPORT_FILENAME, html)
                        .map_err(|err| err.to_string());
                    let _ = self
                        .events_tx
                        .send(LoopEvent::Msg(Msg::ExportFinished(result)));
                }
            }
        }
    }
}

fn spawn_event_forwarder(engine_rx: mpsc::Receiver<EngineEvent>, events_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Ok(event) = engine_rx.recv() {
            if events_tx.send(LoopEvent::Msg(to_msg(event))).is_err() {
                break;
            }
        }
    });
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisFinished { request_id, result } => Msg::AnalysisCompleted {
            request_id,
            outcome: result
                .map(|output| AnalysisSuccess {
                    analysis: output.analysis,
                    csv_url: output.csv_url,
                })
                .map_err(AnalysisFailure::from),
        },
        EngineEvent::DownloadFinished { result } => {
            Msg::DownloadFinished(result.map_err(|err| err.to_string()))
        }
    }
}
