use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, bail, Result};
use docreview_client::resolve_selection;
use docreview_core::{update, AppState, Msg, Phase, SelectionSource};
use docreview_logging::{review_debug, review_info, review_warn};

use super::commands::{parse_command, Command, ParseError, HELP};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui;

/// Everything the main loop reacts to, from the prompt or the engine.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    Alert(String),
    Notice(String),
    Show,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub initial_files: Vec<PathBuf>,
    /// Analyze the initial files, print the result and exit.
    pub once: bool,
    /// With `once`, also save the checklist CSV.
    pub download: bool,
}

pub fn run_app(config: AppConfig, options: RunOptions) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(
        config.client_settings(),
        config.output_dir.clone(),
        events_tx.clone(),
    );
    let mut app = App {
        state: AppState::new(),
        runner,
    };

    if !options.initial_files.is_empty() {
        app.dispatch(select_msg(SelectionSource::Picker, &options.initial_files, &events_tx));
    }

    if options.once {
        return app.run_once(&events_rx, options.download);
    }

    spawn_prompt_reader(events_tx);
    println!("{HELP}");
    app.print_view();

    while let Ok(event) = events_rx.recv() {
        if !app.handle(event) {
            break;
        }
    }
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        review_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);
        if was_dirty {
            self.print_view();
        }
    }

    /// Returns false when the loop should stop.
    fn handle(&mut self, event: LoopEvent) -> bool {
        match event {
            LoopEvent::Msg(msg) => self.dispatch(msg),
            LoopEvent::Alert(text) => eprintln!("\n*** {text} ***\n"),
            LoopEvent::Notice(text) => eprintln!("{text}"),
            LoopEvent::Show => self.print_view(),
            LoopEvent::Quit => return false,
        }
        true
    }

    fn print_view(&self) {
        for line in ui::render::render(&self.state.view()) {
            println!("{line}");
        }
    }

    fn run_once(&mut self, events_rx: &mpsc::Receiver<LoopEvent>, download: bool) -> Result<()> {
        self.dispatch(Msg::AnalyzeClicked);
        let mut awaiting_download = false;
        loop {
            if self.state.in_flight().is_none() && !awaiting_download {
                if self.state.phase() != Phase::ResultsShown {
                    drain_alerts(events_rx);
                    bail!("analysis did not produce a result");
                }
                if !download {
                    return Ok(());
                }
                let has_csv = self
                    .state
                    .analysis()
                    .and_then(|analysis| analysis.csv_url())
                    .is_some();
                if !has_csv {
                    review_warn!("Server published no CSV for this analysis");
                    return Ok(());
                }
                self.dispatch(Msg::DownloadCsvClicked);
                awaiting_download = true;
            }
            let Ok(event) = events_rx.recv() else {
                bail!("engine stopped unexpectedly");
            };
            let outcome = download_outcome(&event);
            self.handle(event);
            match outcome {
                Some(outcome) if awaiting_download => return outcome,
                _ => {}
            }
        }
    }
}

/// A failed download has to fail the one-shot run, not just print an alert.
fn download_outcome(event: &LoopEvent) -> Option<Result<()>> {
    match event {
        LoopEvent::Msg(Msg::DownloadFinished(Ok(_))) => Some(Ok(())),
        LoopEvent::Msg(Msg::DownloadFinished(Err(err))) => {
            Some(Err(anyhow!("CSV download failed: {err}")))
        }
        _ => None,
    }
}

fn drain_alerts(events_rx: &mpsc::Receiver<LoopEvent>) {
    while let Ok(event) = events_rx.try_recv() {
        if let LoopEvent::Alert(text) = event {
            eprintln!("{text}");
        }
    }
}

fn select_msg(
    source: SelectionSource,
    paths: &[PathBuf],
    events_tx: &mpsc::Sender<LoopEvent>,
) -> Msg {
    let resolved = resolve_selection(paths);
    for skipped in &resolved.skipped {
        let _ = events_tx.send(LoopEvent::Notice(format!("Skipped: {skipped}")));
    }
    review_info!(
        "{:?} selection: {} file(s), {} skipped",
        source,
        resolved.files.len(),
        resolved.skipped.len()
    );
    Msg::FilesChosen {
        source,
        files: resolved.files,
    }
}

fn spawn_prompt_reader(events_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match parse_command(&line) {
                Ok(command) => command_event(command, &events_tx),
                Err(ParseError::Empty) => continue,
                Err(ParseError::Unknown(word)) => {
                    LoopEvent::Notice(format!("Unknown command `{word}`.\n{HELP}"))
                }
                Err(ParseError::MissingArgument(what)) => {
                    LoopEvent::Notice(format!("Missing {what}."))
                }
            };
            let quit = matches!(event, LoopEvent::Quit);
            if events_tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = events_tx.send(LoopEvent::Quit);
    });
}

fn command_event(command: Command, events_tx: &mpsc::Sender<LoopEvent>) -> LoopEvent {
    match command {
        Command::Select { source, paths } => LoopEvent::Msg(select_msg(source, &paths, events_tx)),
        Command::Analyze => LoopEvent::Msg(Msg::AnalyzeClicked),
        Command::Search(text) => LoopEvent::Msg(Msg::SearchChanged(text)),
        Command::Risk(filter) => LoopEvent::Msg(Msg::RiskFilterChanged(filter)),
        Command::Download => LoopEvent::Msg(Msg::DownloadCsvClicked),
        Command::Export => LoopEvent::Msg(Msg::ExportReportClicked),
        Command::Reset => LoopEvent::Msg(Msg::ResetClicked),
        Command::Show => LoopEvent::Show,
        Command::Help => LoopEvent::Notice(HELP.to_string()),
        Command::Quit => LoopEvent::Quit,
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::FilesChosen { .. } => "FilesChosen",
        Msg::AnalyzeClicked => "AnalyzeClicked",
        Msg::AnalysisCompleted { .. } => "AnalysisCompleted",
        Msg::SearchChanged(_) => "SearchChanged",
        Msg::RiskFilterChanged(_) => "RiskFilterChanged",
        Msg::DownloadCsvClicked => "DownloadCsvClicked",
        Msg::DownloadFinished(_) => "DownloadFinished",
        Msg::ExportReportClicked => "ExportReportClicked",
        Msg::ExportFinished(_) => "ExportFinished",
        Msg::ResetClicked => "ResetClicked",
        Msg::NoOp => "NoOp",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_download_fails_the_run() {
        let failed = LoopEvent::Msg(Msg::DownloadFinished(Err("HTTP status 404".to_string())));
        let err = download_outcome(&failed)
            .expect("download event")
            .unwrap_err();
        assert_eq!(err.to_string(), "CSV download failed: HTTP status 404");
    }

    #[test]
    fn saved_download_ends_the_run_cleanly() {
        let saved = LoopEvent::Msg(Msg::DownloadFinished(Ok(PathBuf::from("out/c.csv"))));
        assert!(matches!(download_outcome(&saved), Some(Ok(()))));
        assert!(download_outcome(&LoopEvent::Show).is_none());
        assert!(download_outcome(&LoopEvent::Alert("x".to_string())).is_none());
    }
}
