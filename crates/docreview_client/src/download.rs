use std::path::PathBuf;

use docreview_logging::{review_debug, review_info, review_trace};
use futures_util::StreamExt;

use crate::filename::download_filename;
use crate::{AtomicFileWriter, ClientSettings, DownloadError};

/// Fetches the checklist CSV the server published for an analysis.
#[derive(Debug, Clone)]
pub struct CsvDownloader {
    settings: ClientSettings,
    writer: AtomicFileWriter,
}

impl CsvDownloader {
    pub fn new(settings: ClientSettings, output_dir: PathBuf) -> Self {
        Self {
            settings,
            writer: AtomicFileWriter::new(output_dir),
        }
    }

    /// Downloads `csv_url` (usually relative to the server) into the output
    /// directory and returns the saved path.
    pub async fn download(&self, csv_url: &str) -> Result<PathBuf, DownloadError> {
        let url = self
            .settings
            .resolve(csv_url)
            .map_err(|err| DownloadError::InvalidUrl(err.to_string()))?;
        let client = self
            .settings
            .build_client()
            .map_err(|err| DownloadError::Network(err.to_string()))?;

        review_info!("GET {}", url);
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| DownloadError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus(status.as_u16()));
        }

        let max_bytes = self.settings.max_download_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(DownloadError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| DownloadError::Network(err.to_string()))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(DownloadError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
            review_trace!("Received {} of at most {} bytes", next_len, max_bytes);
        }
        review_debug!("Downloaded {} bytes from {}", bytes.len(), url);

        let filename = download_filename(&url, "checklist", "csv");
        let path = self.writer.write(&filename, &bytes)?;
        review_info!("Saved checklist CSV to {:?}", path);
        Ok(path)
    }
}
