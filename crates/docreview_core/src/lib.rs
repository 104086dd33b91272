//! Docreview core: pure controller state machine, data model and view-model helpers.
mod checklist;
mod effect;
mod markup;
mod model;
mod msg;
mod present;
mod selection;
mod state;
mod update;
mod view_model;

pub use checklist::{
    checklist_table, ChecklistFilter, ChecklistRowView, ChecklistTableView, RiskFilter,
    NO_OBLIGATIONS_PLACEHOLDER,
};
pub use effect::Effect;
pub use markup::{escape_html, render_checklist, render_report, render_risk_panel, render_summary};
pub use model::{AnalysisResult, ChecklistItem, PerFileResult, Risk, SelectedFile};
pub use msg::{AnalysisFailure, AnalysisSuccess, Msg};
pub use present::{
    suggestions, summary_cards, AnalysisViewModel, CardBody, ResultsView, RiskCounts,
    SummaryCard, PRIVACY_SUGGESTION, SAFETY_SUGGESTION,
};
pub use selection::{
    size_label, FileListView, FileRowView, FileSelectionStore, SelectionSource,
    NO_FILES_PLACEHOLDER,
};
pub use state::{AppState, Phase, RequestId, READY_STATUS};
pub use update::{update, EMPTY_SELECTION_ALERT};
pub use view_model::{AppViewModel, TriggerView, ANALYZE_LABEL, ANALYZING_LABEL};
