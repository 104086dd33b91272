mod support;

use docreview_core::{
    update, AnalysisFailure, AnalysisResult, AppState, Effect, FileListView, Msg, Phase,
    RiskFilter, ANALYZE_LABEL, ANALYZING_LABEL, EMPTY_SELECTION_ALERT, NO_FILES_PLACEHOLDER,
};
use pretty_assertions::assert_eq;
use support::{choose, file_result, init_logging, item, sample_files, show_result, start_analysis};

fn one_item_result() -> AnalysisResult {
    AnalysisResult {
        files: vec![file_result("contract.docx", "Contracts", 1)],
        combined_checklist: vec![item("1", "contract.docx", "Tenant shall pay.", "Medium")],
    }
}

#[test]
fn selecting_files_moves_idle_to_files_selected() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.view().phase, Phase::Idle);
    assert_eq!(
        state.view().file_list,
        FileListView::Placeholder(NO_FILES_PLACEHOLDER)
    );

    let (mut state, effects) = choose(state, sample_files());
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::FilesSelected);
    match view.file_list {
        FileListView::Files(rows) => {
            let labels: Vec<_> = rows
                .iter()
                .map(|row| (row.name.as_str(), row.size_label.as_str()))
                .collect();
            assert_eq!(labels, vec![("policy.pdf", "40 KB"), ("contract.docx", "12 KB")]);
        }
        other => panic!("unexpected file list {other:?}"),
    }
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn empty_selection_stays_idle() {
    init_logging();
    let (state, _) = choose(AppState::new(), Vec::new());
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn analyze_without_files_alerts_and_sends_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AnalyzeClicked);

    assert_eq!(
        effects,
        vec![Effect::ShowAlert(EMPTY_SELECTION_ALERT.to_string())]
    );
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.view().analyze_button.enabled);
}

#[test]
fn analyze_submits_selection_and_disables_trigger() {
    init_logging();
    let (state, _) = choose(AppState::new(), sample_files());
    let (state, effects) = update(state, Msg::AnalyzeClicked);

    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            request_id: 1,
            files: sample_files(),
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Analyzing);
    assert!(!view.analyze_button.enabled);
    assert_eq!(view.analyze_button.label, ANALYZING_LABEL);
}

#[test]
fn second_click_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = start_analysis(AppState::new());
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(state.in_flight(), Some(1));
}

#[test]
fn trigger_is_restored_on_every_exit_path() {
    init_logging();
    let outcomes = vec![
        Ok(support::success(one_item_result())),
        Err(AnalysisFailure::Server {
            status: 500,
            body: "boom".to_string(),
        }),
        Err(AnalysisFailure::Transport("connection refused".to_string())),
    ];

    for outcome in outcomes {
        let (state, request_id) = start_analysis(AppState::new());
        let mut transitions = 0;
        let mut enabled = state.view().analyze_button.enabled;
        assert!(!enabled);

        let (state, _effects) = update(
            state,
            Msg::AnalysisCompleted {
                request_id,
                outcome: outcome.clone(),
            },
        );
        if state.view().analyze_button.enabled != enabled {
            transitions += 1;
            enabled = state.view().analyze_button.enabled;
        }
        // A duplicate completion must not toggle anything again.
        let (state, effects) = update(
            state,
            Msg::AnalysisCompleted {
                request_id,
                outcome,
            },
        );
        assert!(effects.is_empty());
        if state.view().analyze_button.enabled != enabled {
            transitions += 1;
        }

        assert_eq!(transitions, 1);
        assert!(state.view().analyze_button.enabled);
        assert_eq!(state.view().analyze_button.label, ANALYZE_LABEL);
    }
}

#[test]
fn server_error_returns_to_selection_with_alert() {
    init_logging();
    let (state, request_id) = start_analysis(AppState::new());
    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Err(AnalysisFailure::Server {
                status: 400,
                body: "{\"error\": \"No files uploaded\"}".to_string(),
            }),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ShowAlert(
            "Server error: {\"error\": \"No files uploaded\"}".to_string()
        )]
    );
    assert_eq!(state.phase(), Phase::FilesSelected);
    assert_eq!(state.selected_files().len(), 2);
    assert!(state.view().results.is_none());
}

#[test]
fn transport_error_alert_text() {
    init_logging();
    let (state, request_id) = start_analysis(AppState::new());
    let (_state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Err(AnalysisFailure::Transport("invalid JSON".to_string())),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ShowAlert(
            "Network or server error: invalid JSON".to_string()
        )]
    );
}

#[test]
fn success_shows_results() {
    init_logging();
    let state = show_result(AppState::new(), one_item_result());
    let view = state.view();

    assert_eq!(view.phase, Phase::ResultsShown);
    let results = view.results.expect("results shown");
    assert_eq!(results.checklist.rows.len(), 1);
    assert_eq!(
        results.csv_url.as_deref(),
        Some("/download/checklist_ab12cd34.csv")
    );
    assert_eq!(
        view.status,
        "Analysis complete: 1 file(s), 1 obligation(s)"
    );
}

#[test]
fn new_selection_while_results_shown_clears_result() {
    init_logging();
    let state = show_result(AppState::new(), one_item_result());
    let (state, _) = choose(state, sample_files()[..1].to_vec());

    assert_eq!(state.phase(), Phase::FilesSelected);
    assert!(state.analysis().is_none());
    assert!(state.view().results.is_none());
}

#[test]
fn selection_ignored_while_analyzing() {
    init_logging();
    let (state, _) = start_analysis(AppState::new());
    let (state, effects) = choose(state, Vec::new());
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Analyzing);
    assert_eq!(state.selected_files().len(), 2);
}

#[test]
fn reanalysis_from_results_discards_previous_result() {
    init_logging();
    let state = show_result(AppState::new(), one_item_result());
    let (state, effects) = update(state, Msg::AnalyzeClicked);

    assert!(matches!(
        effects.as_slice(),
        [Effect::SubmitAnalysis { request_id: 2, .. }]
    ));
    assert_eq!(state.phase(), Phase::Analyzing);
    assert!(state.analysis().is_none());
}

#[test]
fn reset_from_results_leaves_no_residue() {
    init_logging();
    let state = show_result(AppState::new(), one_item_result());
    let (state, _) = update(state, Msg::SearchChanged("tenant".to_string()));
    let (state, _) = update(state, Msg::RiskFilterChanged(RiskFilter::parse("Medium")));
    let (state, effects) = update(state, Msg::ResetClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.file_list, FileListView::Placeholder(NO_FILES_PLACEHOLDER));
    assert!(view.results.is_none());
    assert_eq!(view.search_query, "");
    assert_eq!(view.risk_filter, "All");

    // A fresh run behaves exactly like the first one did.
    let state = show_result(state, AnalysisResult::default());
    let results = state.view().results.expect("results shown");
    assert!(results.checklist.rows.is_empty());
    assert!(results.checklist.placeholder.is_some());
}

#[test]
fn reset_while_in_flight_discards_late_result() {
    init_logging();
    let (state, request_id) = start_analysis(AppState::new());
    let (state, _) = update(state, Msg::ResetClicked);

    // Still one request outstanding; the trigger stays disabled.
    assert_eq!(state.phase(), Phase::Idle);
    assert!(!state.view().analyze_button.enabled);

    let (state, _) = choose(state, sample_files());
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Ok(support::success(one_item_result())),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::FilesSelected);
    assert!(state.analysis().is_none());
    assert!(state.view().analyze_button.enabled);
}

#[test]
fn download_only_offered_with_results() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::DownloadCsvClicked);
    assert!(effects.is_empty());

    let state = show_result(state, one_item_result());
    let (state, effects) = update(state, Msg::DownloadCsvClicked);
    assert_eq!(
        effects,
        vec![Effect::DownloadCsv {
            url: "/download/checklist_ab12cd34.csv".to_string()
        }]
    );

    let (state, _) = update(
        state,
        Msg::DownloadFinished(Ok("output/checklist_ab12cd34.csv".into())),
    );
    assert_eq!(
        state.view().status,
        "CSV saved to output/checklist_ab12cd34.csv"
    );
}

#[test]
fn export_report_renders_current_result() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ExportReportClicked);
    assert!(effects.is_empty());

    let state = show_result(state, one_item_result());
    let (_state, effects) = update(state, Msg::ExportReportClicked);
    match effects.as_slice() {
        [Effect::ExportReport { html }] => {
            assert!(html.contains("Tenant shall pay."));
            assert!(html.contains("<strong>contract.docx</strong>"));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn export_report_includes_rows_hidden_by_filter() {
    init_logging();
    let result = AnalysisResult {
        files: vec![file_result("lease.pdf", "Contracts", 2)],
        combined_checklist: vec![
            item("1", "lease.pdf", "Landlord shall repaint yearly.", "Low"),
            item("2", "lease.pdf", "Tenant shall indemnify landlord.", "High"),
        ],
    };
    let state = show_result(AppState::new(), result);
    let (state, _) = update(state, Msg::RiskFilterChanged(RiskFilter::parse("High")));
    let (state, _) = update(state, Msg::SearchChanged("indemnify".to_string()));
    let on_screen = state.view().results.expect("results shown").checklist;
    assert_eq!(on_screen.rows.len(), 1);

    let (_state, effects) = update(state, Msg::ExportReportClicked);
    match effects.as_slice() {
        [Effect::ExportReport { html }] => {
            assert!(html.contains("Landlord shall repaint yearly."));
            assert!(html.contains("Tenant shall indemnify landlord."));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn unchanged_filter_does_not_mark_dirty() {
    init_logging();
    let mut state = show_result(AppState::new(), one_item_result());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::SearchChanged("  ".to_string()));
    assert!(!state.consume_dirty());
    let (mut state, _) = update(state, Msg::RiskFilterChanged(RiskFilter::All));
    assert!(!state.consume_dirty());
    let (mut state, _) = update(state, Msg::SearchChanged("Tenant".to_string()));
    assert!(state.consume_dirty());
}
