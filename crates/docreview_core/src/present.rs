//! Projection of an analysis result into view fragments.

use std::collections::HashSet;

use crate::checklist::{checklist_table, ChecklistFilter, ChecklistTableView};
use crate::model::{AnalysisResult, ChecklistItem, PerFileResult, Risk};

pub const PRIVACY_DOMAIN: &str = "Data Privacy";
pub const SAFETY_DOMAIN: &str = "Safety / Environmental";
pub const PRIVACY_SUGGESTION: &str =
    "No Data Privacy document detected; consider adding a privacy policy.";
pub const SAFETY_SUGGESTION: &str =
    "No Safety / Environmental document detected; consider safety procedures.";
pub const NO_SUMMARY: &str = "No summary available";
pub const NO_OBLIGATIONS: &str = "No explicit obligations detected";
const UNKNOWN_DOMAIN: &str = "Unknown";
const UNSUPPORTED: &str = "unsupported";
const QUOTE_CHARS: usize = 120;

/// The last successful analysis, owned by the controller until reset or
/// the next analysis replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisViewModel {
    result: AnalysisResult,
    csv_url: Option<String>,
}

impl AnalysisViewModel {
    pub fn new(result: AnalysisResult, csv_url: Option<String>) -> Self {
        Self { result, csv_url }
    }

    pub fn csv_url(&self) -> Option<&str> {
        self.csv_url.as_deref()
    }

    pub fn present(&self, filter: &ChecklistFilter) -> ResultsView {
        ResultsView {
            summary_cards: summary_cards(&self.result.files),
            checklist: checklist_table(&self.result.combined_checklist, filter),
            risk_counts: RiskCounts::tally(&self.result.combined_checklist),
            suggestions: suggestions(&self.result),
            csv_url: self.csv_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub summary_cards: Vec<SummaryCard>,
    pub checklist: ChecklistTableView,
    pub risk_counts: RiskCounts,
    pub suggestions: Vec<String>,
    pub csv_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub filename: String,
    pub body: CardBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Rejected {
        reason: String,
    },
    Accepted {
        summary: String,
        domain: String,
        obligations: String,
        note: Option<String>,
    },
}

pub fn summary_cards(files: &[PerFileResult]) -> Vec<SummaryCard> {
    files.iter().map(summary_card).collect()
}

fn summary_card(file: &PerFileResult) -> SummaryCard {
    let body = if !file.supported {
        CardBody::Rejected {
            reason: format!("Rejected: {}", non_empty(file.note.as_deref()).unwrap_or(UNSUPPORTED)),
        }
    } else {
        let count = file.obligations.len();
        CardBody::Accepted {
            summary: non_empty(file.summary.as_deref())
                .unwrap_or(NO_SUMMARY)
                .to_string(),
            domain: format!(
                "Domain: {}",
                non_empty(file.domain.as_deref()).unwrap_or(UNKNOWN_DOMAIN)
            ),
            obligations: if count > 0 {
                format!("{count} obligation(s) found")
            } else {
                NO_OBLIGATIONS.to_string()
            },
            note: non_empty(file.note.as_deref()).map(ToOwned::to_owned),
        }
    };
    SummaryCard {
        filename: file.filename.clone(),
        body,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskCounts {
    /// Counts only the three known tiers; other labels are not tallied.
    pub fn tally(items: &[ChecklistItem]) -> Self {
        items.iter().fold(Self::default(), |mut counts, item| {
            match item.risk {
                Risk::High => counts.high += 1,
                Risk::Medium => counts.medium += 1,
                Risk::Low => counts.low += 1,
                Risk::Other(_) => {}
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Gap suggestions: missing privacy, missing safety, then one per
/// high-risk item in checklist order.
pub fn suggestions(result: &AnalysisResult) -> Vec<String> {
    let domains: HashSet<&str> = result
        .files
        .iter()
        .filter_map(|file| file.domain.as_deref())
        .collect();

    let mut out = Vec::new();
    if !domains.contains(PRIVACY_DOMAIN) {
        out.push(PRIVACY_SUGGESTION.to_string());
    }
    if !domains.contains(SAFETY_DOMAIN) {
        out.push(SAFETY_SUGGESTION.to_string());
    }
    out.extend(
        result
            .combined_checklist
            .iter()
            .filter(|item| item.risk == Risk::High)
            .map(|item| {
                let quote: String = item.sentence.chars().take(QUOTE_CHARS).collect();
                format!("High-risk clause in {}: \"{}...\"", item.document, quote)
            }),
    );
    out
}
