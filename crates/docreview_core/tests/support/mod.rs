#![allow(dead_code)]

use docreview_core::{
    update, AnalysisResult, AnalysisSuccess, AppState, ChecklistItem, Effect, Msg, PerFileResult,
    RequestId, Risk, SelectedFile, SelectionSource,
};

pub fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(docreview_logging::initialize_for_tests);
}

pub fn sample_files() -> Vec<SelectedFile> {
    vec![
        SelectedFile::new("policy.pdf", 40 * 1024, "/docs/policy.pdf"),
        SelectedFile::new("contract.docx", 12 * 1024, "/docs/contract.docx"),
    ]
}

pub fn item(id: &str, document: &str, sentence: &str, risk: &str) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        document: document.to_string(),
        sentence: sentence.to_string(),
        dates: Vec::new(),
        risk: Risk::from(risk),
        status: "Open".to_string(),
        assigned_to: Some(String::new()),
    }
}

pub fn file_result(filename: &str, domain: &str, obligations: usize) -> PerFileResult {
    PerFileResult {
        filename: filename.to_string(),
        supported: true,
        note: None,
        summary: Some(format!("About {filename}")),
        domain: Some(domain.to_string()),
        obligations: vec![serde_json::Value::Null; obligations],
    }
}

pub fn success(analysis: AnalysisResult) -> AnalysisSuccess {
    AnalysisSuccess {
        analysis,
        csv_url: Some("/download/checklist_ab12cd34.csv".to_string()),
    }
}

pub fn choose(state: AppState, files: Vec<SelectedFile>) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FilesChosen {
            source: SelectionSource::Picker,
            files,
        },
    )
}

/// Selects files and clicks Analyze, returning the request id.
pub fn start_analysis(state: AppState) -> (AppState, RequestId) {
    let (state, _) = choose(state, sample_files());
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    match effects.as_slice() {
        [Effect::SubmitAnalysis { request_id, .. }] => (state, *request_id),
        other => panic!("expected a submit effect, got {other:?}"),
    }
}

/// Runs a full successful analysis cycle with the given result.
pub fn show_result(state: AppState, analysis: AnalysisResult) -> AppState {
    let (state, request_id) = start_analysis(state);
    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Ok(success(analysis)),
        },
    );
    assert!(effects.is_empty());
    state
}
