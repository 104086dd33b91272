use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

/// A file the user picked or dropped, before it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    /// Local source of the bytes streamed into the upload.
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            path: path.into(),
        }
    }
}

/// Server-side analysis of one upload batch.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<PerFileResult>,
    #[serde(
        default,
        rename = "combined_checklist",
        deserialize_with = "null_as_default"
    )]
    pub combined_checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PerFileResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(default)]
    pub supported: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Opaque to the client; only counted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub obligations: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChecklistItem {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentence: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "scalar_as_risk")]
    pub risk: Risk,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl ChecklistItem {
    pub fn dates_label(&self) -> String {
        self.dates.join(", ")
    }
}

/// Server-assigned severity. Tiers outside the known three are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Risk {
    High,
    Medium,
    Low,
    Other(String),
}

impl Default for Risk {
    fn default() -> Self {
        Risk::Other(String::new())
    }
}

impl Risk {
    pub fn label(&self) -> &str {
        match self {
            Risk::High => "High",
            Risk::Medium => "Medium",
            Risk::Low => "Low",
            Risk::Other(raw) => raw,
        }
    }
}

impl From<String> for Risk {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "High" => Risk::High,
            "Medium" => Risk::Medium,
            "Low" => Risk::Low,
            _ => Risk::Other(raw),
        }
    }
}

impl From<&str> for Risk {
    fn from(raw: &str) -> Self {
        Risk::from(raw.to_string())
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// The server numbers checklist items; older builds sent strings. Any other
// scalar is kept as its JSON text so one odd cell cannot fail the response.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Bool(value)) => value.to_string(),
        Some(RawScalar::Int(value)) => value.to_string(),
        Some(RawScalar::Float(value)) => value.to_string(),
        Some(RawScalar::Text(value)) => value,
        None => String::new(),
    })
}

fn scalar_as_risk<'de, D>(deserializer: D) -> Result<Risk, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_as_string(deserializer).map(Risk::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_payload_with_numeric_ids_and_nulls() {
        let raw = r#"{
            "files": [
                {"filename": "a.pdf", "supported": true, "domain": "Data Privacy",
                 "summary": "s", "obligations": [{"sentence": "x", "dates": []}]},
                {"filename": "b.exe", "supported": false, "note": "Unsupported file type"}
            ],
            "combined_checklist": [
                {"id": 1, "document": "a.pdf", "sentence": "You must pay.", "dates": null,
                 "assigned_to": "", "status": "Open", "risk": "Critical"}
            ]
        }"#;

        let result: AnalysisResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files[0].obligations.len(), 1);
        assert!(result.files[1].obligations.is_empty());
        let item = &result.combined_checklist[0];
        assert_eq!(item.id, "1");
        assert!(item.dates.is_empty());
        assert_eq!(item.risk, Risk::Other("Critical".to_string()));
        assert_eq!(item.assigned_to.as_deref(), Some(""));
    }

    #[test]
    fn non_string_risk_and_status_do_not_fail_the_response() {
        let raw = r#"{
            "combined_checklist": [
                {"id": 2, "document": "a.pdf", "sentence": "Pay rent.", "risk": 3, "status": 1},
                {"id": 3, "document": "a.pdf", "sentence": "Notify.", "risk": true,
                 "status": null},
                {"id": 4, "document": "a.pdf", "sentence": "Insure.", "risk": "Low",
                 "status": "Open"}
            ]
        }"#;

        let result: AnalysisResult = serde_json::from_str(raw).unwrap();
        let cells: Vec<_> = result
            .combined_checklist
            .iter()
            .map(|item| (item.risk.clone(), item.status.as_str()))
            .collect();
        assert_eq!(
            cells,
            vec![
                (Risk::Other("3".to_string()), "1"),
                (Risk::Other("true".to_string()), ""),
                (Risk::Low, "Open"),
            ]
        );
    }

    #[test]
    fn missing_risk_is_an_empty_tier() {
        let raw = r#"{"combined_checklist": [{"id": "a", "risk": null}]}"#;
        let result: AnalysisResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.combined_checklist[0].risk, Risk::default());
    }

    #[test]
    fn missing_sections_decode_as_empty() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, AnalysisResult::default());
    }
}
