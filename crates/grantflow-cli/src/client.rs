//! HTTP client for the GrantFlow server.
//!
//! Thin typed wrapper over reqwest. Timeouts are generous because the
//! server may be cold-starting on a free hosting tier; the caller decides
//! what a timeout means (for result polling it means "maybe still
//! processing", not failure).

use crate::error::{CliError, Result};
use grantflow_domain::{DocumentKind, Organization};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Timeout for the health probe.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for result polling.
const RESULT_TIMEOUT: Duration = Duration::from_secs(120);
/// Timeout for uploads, which can carry large files.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(180);

/// Response from `POST /upload`.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    /// Generated task identifier
    pub task_id: String,
    /// Initial status (always "pending")
    pub status: String,
    /// Human-readable message
    pub message: String,
}

/// Response from `GET /result/{task_id}`.
#[derive(Debug, Deserialize)]
pub struct TaskReport {
    /// Task identifier
    pub task_id: String,
    /// Current status
    pub status: String,
    /// Progress or completion message
    #[serde(default)]
    pub message: Option<String>,
    /// Model output, present when completed
    #[serde(default)]
    pub result: Option<String>,
    /// Error description, present when errored
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    /// Server-reported status
    pub status: String,
    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Parameters for one upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Instruction sent alongside the file
    pub instruction: String,
    /// Model identifier; server default when `None`
    pub model: Option<String>,
    /// Sampling temperature; server default when `None`
    pub temperature: Option<f32>,
    /// Organization whose guidelines apply
    pub organization: Organization,
    /// Document kind hint
    pub document_kind: DocumentKind,
}

/// Typed client for the GrantFlow HTTP API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Probe the server health endpoint.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Upload one PDF for evaluation.
    pub async fn upload(&self, path: &Path, request: &UploadRequest) -> Result<UploadResponse> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("prompt", request.instruction.clone())
            .text("organization", request.organization.as_str().to_string())
            .text("pdf_type", request.document_kind.as_str().to_string());
        if let Some(model) = &request.model {
            form = form.text("model", model.clone());
        }
        if let Some(temperature) = request.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .timeout(UPLOAD_TIMEOUT)
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetch the current state of one task.
    pub async fn result(&self, task_id: &str) -> Result<TaskReport> {
        let response = self
            .http
            .get(format!("{}/result/{}", self.base_url, task_id))
            .timeout(RESULT_TIMEOUT)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP {}", status),
            };
            Err(CliError::Server(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_task_report_tolerates_missing_fields() {
        let report: TaskReport =
            serde_json::from_str(r#"{"task_id":"abc","status":"pending"}"#).unwrap();
        assert_eq!(report.status, "pending");
        assert!(report.result.is_none());
        assert!(report.error.is_none());
    }
}
