use docreview_core::{
    AppViewModel, CardBody, ChecklistRowView, FileListView, Phase, ResultsView,
};

const SENTENCE_WIDTH: usize = 72;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("== Files ==".to_string());
    match &view.file_list {
        FileListView::Placeholder(text) => lines.push(format!("  {text}")),
        FileListView::Files(rows) => {
            for row in rows {
                lines.push(format!("  {}  ({})", sanitize_terminal(&row.name), row.size_label));
            }
        }
    }

    let trigger = if view.analyze_button.enabled {
        format!("[{}]", view.analyze_button.label)
    } else {
        format!("[{}] (disabled)", view.analyze_button.label)
    };
    lines.push(trigger);

    if let Some(results) = &view.results {
        render_results(&mut lines, view, results);
    }

    lines.push(format!("Status: {} | {}", phase_label(view.phase), view.status));
    lines
}

fn render_results(lines: &mut Vec<String>, view: &AppViewModel, results: &ResultsView) {
    lines.push(String::new());
    lines.push("== Summary ==".to_string());
    for card in &results.summary_cards {
        lines.push(format!("* {}", sanitize_terminal(&card.filename)));
        match &card.body {
            CardBody::Rejected { reason } => {
                lines.push(format!("    {}", sanitize_terminal(reason)))
            }
            CardBody::Accepted {
                summary,
                domain,
                obligations,
                note,
            } => {
                lines.push(format!("    {}", sanitize_terminal(summary)));
                lines.push(format!("    {}", sanitize_terminal(domain)));
                lines.push(format!("    {}", sanitize_terminal(obligations)));
                if let Some(note) = note {
                    lines.push(format!("    Note: {}", sanitize_terminal(note)));
                }
            }
        }
    }

    lines.push(String::new());
    let table = &results.checklist;
    let filter_note = if view.search_query.is_empty() && view.risk_filter == "All" {
        String::new()
    } else {
        format!(
            " (search: {:?}, risk: {}, showing {} of {})",
            view.search_query,
            sanitize_terminal(&view.risk_filter),
            table.rows.len(),
            table.total
        )
    };
    lines.push(format!("== Obligations checklist =={filter_note}"));
    lines.push("  ID | Document | Obligation | Dates | Risk | Status".to_string());
    if let Some(placeholder) = table.placeholder {
        lines.push(format!("  {placeholder}"));
    }
    for row in &table.rows {
        lines.push(format_row(row));
    }

    lines.push(String::new());
    lines.push("== Risk ==".to_string());
    let counts = &results.risk_counts;
    lines.push(format!(
        "  High: {}  Medium: {}  Low: {}",
        counts.high, counts.medium, counts.low
    ));
    lines.push("== Suggestions ==".to_string());
    for suggestion in &results.suggestions {
        lines.push(format!("  - {}", sanitize_terminal(suggestion)));
    }
    if results.csv_url.is_some() {
        lines.push("[Download CSV] available: type `download`".to_string());
    }
    lines.push(String::new());
}

fn format_row(row: &ChecklistRowView) -> String {
    format!(
        "  {} | {} | {} | {} | {} | {}",
        sanitize_terminal(&row.id),
        sanitize_terminal(&row.document),
        sanitize_terminal(&clip(&row.sentence, SENTENCE_WIDTH)),
        sanitize_terminal(&row.dates),
        sanitize_terminal(&row.risk),
        sanitize_terminal(&row.status)
    )
}

/// Folds line breaks into spaces and replaces any other control character,
/// so server text can never drive the terminal.
fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\n' | '\r' | '\t' => ' ',
            ch if ch.is_control() => '\u{fffd}',
            ch => ch,
        })
        .collect()
}

fn clip(text: &str, width: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut clipped: String = single_line.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::FilesSelected => "Files selected",
        Phase::Analyzing => "Analyzing",
        Phase::ResultsShown => "Results",
    }
}
