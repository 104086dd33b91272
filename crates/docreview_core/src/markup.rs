//! HTML rendering of a results view. Every server-supplied string is escaped.

use std::fmt::Write;

use crate::checklist::ChecklistTableView;
use crate::present::{CardBody, ResultsView, RiskCounts, SummaryCard};

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A standalone HTML document for the report export.
pub fn render_report(view: &ResultsView) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Document review</title></head>\n<body>\n",
    );
    html.push_str(&render_summary(&view.summary_cards));
    html.push_str(&render_checklist(&view.checklist));
    html.push_str(&render_risk_panel(&view.risk_counts, &view.suggestions));
    html.push_str("</body>\n</html>\n");
    html
}

pub fn render_summary(cards: &[SummaryCard]) -> String {
    let mut html = String::from("<section id=\"summarySection\">\n");
    for card in cards {
        let _ = write!(
            html,
            "<div class=\"summary-card\"><strong>{}</strong>",
            escape_html(&card.filename)
        );
        match &card.body {
            CardBody::Rejected { reason } => {
                let _ = write!(html, "<div class=\"rejected\">{}</div>", escape_html(reason));
            }
            CardBody::Accepted {
                summary,
                domain,
                obligations,
                note,
            } => {
                let _ = write!(
                    html,
                    "<div class=\"summary\">{}</div><div class=\"domain\">{}</div><div class=\"obligations\"><em>{}</em></div>",
                    escape_html(summary),
                    escape_html(domain),
                    escape_html(obligations)
                );
                if let Some(note) = note {
                    let _ = write!(html, "<div class=\"note\">{}</div>", escape_html(note));
                }
            }
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
    html
}

pub fn render_checklist(table: &ChecklistTableView) -> String {
    let mut html = String::from(
        "<table id=\"checklistTable\">\n<thead><tr><th>ID</th><th>Document</th><th>Obligation</th><th>Dates</th><th>Risk</th><th>Status</th></tr></thead>\n<tbody>\n",
    );
    if let Some(placeholder) = table.placeholder {
        let _ = writeln!(html, "<tr><td colspan=\"6\">{placeholder}</td></tr>");
    }
    for row in &table.rows {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.id),
            escape_html(&row.document),
            escape_html(&row.sentence),
            escape_html(&row.dates),
            escape_html(&row.risk),
            escape_html(&row.status)
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn render_risk_panel(counts: &RiskCounts, suggestions: &[String]) -> String {
    let mut html = String::from("<section id=\"riskPanel\">\n");
    let _ = writeln!(
        html,
        "<div class=\"badge\">High: {}</div><div class=\"badge\">Medium: {}</div><div class=\"badge\">Low: {}</div>",
        counts.high, counts.medium, counts.low
    );
    html.push_str("<ul id=\"suggestionsList\">\n");
    for suggestion in suggestions {
        let _ = writeln!(html, "<li>{}</li>", escape_html(suggestion));
    }
    html.push_str("</ul>\n</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>'"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;&#39;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
