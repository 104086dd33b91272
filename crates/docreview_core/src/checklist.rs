//! Client-side search and risk filtering over checklist items.
//!
//! Filtering works on the structured items, never on rendered output, and
//! only decides which rows are visible.

use crate::model::{ChecklistItem, Risk};

pub const NO_OBLIGATIONS_PLACEHOLDER: &str = "No obligations detected";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Tier(Risk),
}

impl RiskFilter {
    /// Parses a selector value. Anything other than `All` is an exact tier.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "All" => RiskFilter::All,
            other => RiskFilter::Tier(Risk::from(other)),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RiskFilter::All => "All",
            RiskFilter::Tier(risk) => risk.label(),
        }
    }

    fn admits(&self, risk: &Risk) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Tier(tier) => tier.label() == risk.label(),
        }
    }
}

/// Search box and risk selector state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChecklistFilter {
    query: String,
    risk: RiskFilter,
}

impl ChecklistFilter {
    pub fn new(query: &str, risk: RiskFilter) -> Self {
        let mut filter = Self::default();
        filter.set_query(query);
        filter.set_risk(risk);
        filter
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.trim().to_lowercase();
    }

    pub fn set_risk(&mut self, risk: RiskFilter) {
        self.risk = risk;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn risk(&self) -> &RiskFilter {
        &self.risk
    }

    pub fn matches(&self, item: &ChecklistItem) -> bool {
        let matches_query = self.query.is_empty() || row_text(item).contains(&self.query);
        matches_query && self.risk.admits(&item.risk)
    }
}

/// Lower-cased text of every visible cell, as the search box sees it.
fn row_text(item: &ChecklistItem) -> String {
    let dates = item.dates_label();
    [
        item.id.as_str(),
        item.document.as_str(),
        item.sentence.as_str(),
        dates.as_str(),
        item.risk.label(),
        item.status.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRowView {
    pub id: String,
    pub document: String,
    pub sentence: String,
    pub dates: String,
    pub risk: String,
    pub status: String,
    pub assigned_to: Option<String>,
}

impl From<&ChecklistItem> for ChecklistRowView {
    fn from(item: &ChecklistItem) -> Self {
        Self {
            id: item.id.clone(),
            document: item.document.clone(),
            sentence: item.sentence.clone(),
            dates: item.dates_label(),
            risk: item.risk.label().to_string(),
            status: item.status.clone(),
            assigned_to: item.assigned_to.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistTableView {
    /// Visible rows in input order.
    pub rows: Vec<ChecklistRowView>,
    pub total: usize,
    pub hidden: usize,
    /// Set only when the result holds no items at all.
    pub placeholder: Option<&'static str>,
}

pub fn checklist_table(items: &[ChecklistItem], filter: &ChecklistFilter) -> ChecklistTableView {
    if items.is_empty() {
        return ChecklistTableView {
            rows: Vec::new(),
            total: 0,
            hidden: 0,
            placeholder: Some(NO_OBLIGATIONS_PLACEHOLDER),
        };
    }
    let rows: Vec<ChecklistRowView> = items
        .iter()
        .filter(|item| filter.matches(item))
        .map(ChecklistRowView::from)
        .collect();
    ChecklistTableView {
        total: items.len(),
        hidden: items.len() - rows.len(),
        rows,
        placeholder: None,
    }
}
