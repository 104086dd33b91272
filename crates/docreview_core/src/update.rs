use crate::checklist::ChecklistFilter;
use crate::markup::render_report;
use crate::present::AnalysisViewModel;
use crate::{AppState, Effect, Msg, Phase};

pub const EMPTY_SELECTION_ALERT: &str = "Please select files to analyze.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesChosen { files, .. } => {
            // The drop zone and picker are inert while a request runs.
            if state.phase() == Phase::Analyzing {
                return (state, Vec::new());
            }
            let count = files.len();
            state.select_files(files);
            state.set_status(if count == 0 {
                crate::state::READY_STATUS.to_string()
            } else {
                format!("{count} file(s) selected")
            });
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            if state.in_flight().is_some() {
                return (state, Vec::new());
            }
            if state.selected_files().is_empty() {
                return (state, vec![Effect::ShowAlert(EMPTY_SELECTION_ALERT.to_string())]);
            }
            let files = state.selected_files().to_vec();
            let request_id = state.begin_analysis();
            state.set_status(format!("Analyzing {} file(s)...", files.len()));
            vec![Effect::SubmitAnalysis { request_id, files }]
        }
        Msg::AnalysisCompleted {
            request_id,
            outcome,
        } => {
            if !state.finish_request(request_id) {
                return (state, Vec::new());
            }
            // A reset or new selection while in flight discards the outcome.
            if state.phase() != Phase::Analyzing {
                return (state, Vec::new());
            }
            match outcome {
                Ok(success) => {
                    let status = format!(
                        "Analysis complete: {} file(s), {} obligation(s)",
                        success.analysis.files.len(),
                        success.analysis.combined_checklist.len()
                    );
                    state.show_results(AnalysisViewModel::new(success.analysis, success.csv_url));
                    state.set_status(status);
                    Vec::new()
                }
                Err(failure) => {
                    state.return_to_selection();
                    state.set_status("Analysis failed");
                    vec![Effect::ShowAlert(failure.alert_text())]
                }
            }
        }
        Msg::SearchChanged(raw) => {
            if state.set_query(&raw) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RiskFilterChanged(risk) => {
            if state.set_risk_filter(risk) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DownloadCsvClicked => {
            let url = match (state.phase(), state.analysis()) {
                (Phase::ResultsShown, Some(analysis)) => analysis.csv_url().map(ToOwned::to_owned),
                _ => None,
            };
            match url {
                Some(url) => {
                    state.set_status("Downloading CSV...");
                    vec![Effect::DownloadCsv { url }]
                }
                None => Vec::new(),
            }
        }
        Msg::DownloadFinished(result) => {
            state.set_status(match result {
                Ok(path) => format!("CSV saved to {}", path.display()),
                Err(err) => format!("CSV download failed: {err}"),
            });
            Vec::new()
        }
        Msg::ExportReportClicked => {
            let html = match (state.phase(), state.analysis()) {
                // The report covers every row, whatever the on-screen filter.
                (Phase::ResultsShown, Some(analysis)) => {
                    Some(render_report(&analysis.present(&ChecklistFilter::default())))
                }
                _ => None,
            };
            match html {
                Some(html) => vec![Effect::ExportReport { html }],
                None => Vec::new(),
            }
        }
        Msg::ExportFinished(result) => {
            state.set_status(match result {
                Ok(path) => format!("Report saved to {}", path.display()),
                Err(err) => format!("Report export failed: {err}"),
            });
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
