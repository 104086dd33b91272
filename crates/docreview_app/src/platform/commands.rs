//! Line commands typed at the prompt. They stand in for the drop zone, the
//! file picker and the buttons of the review page.

use std::path::PathBuf;

use docreview_core::{RiskFilter, SelectionSource};

pub const HELP: &str = "\
Commands:
  drop <path>...    select files as if dropped on the drop zone
  pick <path>...    select files through the picker
  analyze           upload the selection for analysis
  search [text]     filter checklist rows by text (empty clears)
  risk <tier>       filter by risk: All, High, Medium, Low
  download          save the checklist CSV
  export            save an HTML report of the current result
  reset             clear selection and results
  show              print the current view
  help              print this text
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select {
        source: SelectionSource,
        paths: Vec<PathBuf>,
    },
    Analyze,
    Search(String),
    Risk(RiskFilter),
    Download,
    Export,
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "drop" => select(SelectionSource::DragDrop, rest),
        "pick" => select(SelectionSource::Picker, rest),
        "analyze" => Ok(Command::Analyze),
        "search" => Ok(Command::Search(rest.to_string())),
        "risk" => {
            if rest.is_empty() {
                Err(ParseError::MissingArgument("risk tier"))
            } else {
                Ok(Command::Risk(RiskFilter::parse(&capitalize(rest))))
            }
        }
        "download" => Ok(Command::Download),
        "export" => Ok(Command::Export),
        "reset" => Ok(Command::Reset),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn select(source: SelectionSource, rest: &str) -> Result<Command, ParseError> {
    // An empty pick clears the selection, like cancelling the dialog with nothing chosen.
    Ok(Command::Select {
        source,
        paths: split_paths(rest),
    })
}

/// Splits on whitespace; double quotes group a path containing spaces.
fn split_paths(raw: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in raw.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }
    paths
}

fn capitalize(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
