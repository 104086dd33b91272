use std::time::Duration;

use docreview_core::{AnalysisResult, SelectedFile};
use docreview_logging::{review_debug, review_info, review_warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{AnalysisError, AnalysisOutput};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub analyze_path: String,
    /// Multipart field repeated once per file.
    pub field_name: String,
    /// Only connection setup is bounded; a slow analysis is left to run.
    pub connect_timeout: Duration,
    pub max_download_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            analyze_path: "/analyze".to_string(),
            field_name: "files[]".to_string(),
            connect_timeout: Duration::from_secs(10),
            max_download_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    /// Resolves `reference` (absolute or relative) against the server base URL.
    pub fn resolve(&self, reference: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(reference)
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .build()
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    analysis: AnalysisResult,
    #[serde(default)]
    csv: Option<String>,
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, files: &[SelectedFile]) -> Result<AnalysisOutput, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: ClientSettings,
}

impl ReqwestAnalyzer {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    async fn build_form(&self, files: &[SelectedFile]) -> Result<Form, AnalysisError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
                AnalysisError::TransportError(format!("cannot read {}: {err}", file.name))
            })?;
            review_debug!("Attaching {} ({} bytes)", file.name, bytes.len());
            let part = Part::bytes(bytes).file_name(file.name.clone());
            form = form.part(self.settings.field_name.clone(), part);
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, files: &[SelectedFile]) -> Result<AnalysisOutput, AnalysisError> {
        if files.is_empty() {
            return Err(AnalysisError::EmptySelection);
        }
        let endpoint = self
            .settings
            .resolve(&self.settings.analyze_path)
            .map_err(|err| AnalysisError::TransportError(format!("invalid server url: {err}")))?;
        let client = self
            .settings
            .build_client()
            .map_err(|err| AnalysisError::TransportError(err.to_string()))?;
        let form = self.build_form(files).await?;

        review_info!("POST {} with {} file(s)", endpoint, files.len());
        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AnalysisError::TransportError(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            review_warn!("Analysis rejected with {}", status);
            let body = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(AnalysisError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| AnalysisError::TransportError(err.to_string()))?;
        let parsed: AnalyzeResponse = serde_json::from_str(&body)
            .map_err(|err| AnalysisError::TransportError(format!("malformed response: {err}")))?;

        Ok(AnalysisOutput {
            analysis: parsed.analysis,
            csv_url: parsed.csv,
        })
    }
}
