//! HTTP request handlers for the GrantFlow server
//!
//! Implements the upload/result/tasks/health endpoints over the task store
//! and the processing pipeline using axum.

use crate::config::ServerConfig;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use grantflow_domain::{DocumentKind, Organization, TaskId, TaskRecord, TaskStatus, TaskStore};
use grantflow_llm::ChatOptions;
use grantflow_pipeline::{ProcessingJob, Processor};
use grantflow_store::{MemoryTaskStore, StoreError};
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Task store, shared with every processing unit
    pub store: Arc<Mutex<MemoryTaskStore>>,
    /// Document processor
    pub processor: Arc<Processor<MemoryTaskStore>>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Client-side validation failure (400)
    BadRequest(String),
    /// Unknown resource (404)
    NotFound(String),
    /// Anything else (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Default instruction when the upload carries none
const DEFAULT_INSTRUCTION: &str =
    "Provide a brief summary of the project described in the document.";

/// Collected multipart form fields
#[derive(Default)]
struct UploadForm {
    filename: Option<String>,
    file_bytes: Option<Vec<u8>>,
    instruction: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    organization: Option<Organization>,
    document_kind: Option<DocumentKind>,
}

impl UploadForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
        {
            match field.name().unwrap_or_default() {
                "file" => {
                    form.filename = field.file_name().map(|s| s.to_string());
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read file field: {}", e))
                    })?;
                    form.file_bytes = Some(bytes.to_vec());
                }
                "prompt" => form.instruction = Some(text_field(field).await?),
                "model" => form.model = Some(text_field(field).await?),
                "temperature" => {
                    let raw = text_field(field).await?;
                    let value = raw.parse::<f32>().map_err(|_| {
                        AppError::BadRequest(format!("Invalid temperature: {}", raw))
                    })?;
                    form.temperature = Some(value);
                }
                "organization" => {
                    let raw = text_field(field).await?;
                    let org = Organization::parse(&raw).ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "organization must be one of: fpi, cu (got '{}')",
                            raw
                        ))
                    })?;
                    form.organization = Some(org);
                }
                "pdf_type" => {
                    let raw = text_field(field).await?;
                    let kind = DocumentKind::parse(&raw).ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "pdf_type must be one of: application, presentation (got '{}')",
                            raw
                        ))
                    })?;
                    form.document_kind = Some(kind);
                }
                other => {
                    warn!(field = other, "ignoring unknown form field");
                }
            }
        }

        Ok(form)
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {}", e)))
}

/// POST /upload - accept a PDF and schedule processing
///
/// Returns 202 with the task id immediately; processing runs in the
/// background and is observed via `GET /result/{task_id}`.
async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;

    let filename = form
        .filename
        .ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;
    let file_bytes = form
        .file_bytes
        .ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::BadRequest("File must be a PDF".to_string()));
    }

    let task_id = TaskId::new();
    let pdf_path = state.config.upload_dir.join(format!("{}.pdf", task_id));

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;
    tokio::fs::write(&pdf_path, &file_bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save file: {}", e)))?;

    // The file is already on disk; if the store refuses the record no
    // processing unit will ever exist to clean it up, so remove it here.
    let created = state
        .store
        .lock()
        .map_err(|e| AppError::Internal(format!("Store lock error: {}", e)))
        .and_then(|mut store| {
            store
                .create(TaskRecord::new(task_id, &filename))
                .map_err(AppError::from)
        });
    if let Err(e) = created {
        remove_rejected_upload(&pdf_path).await;
        return Err(e);
    }

    let job = ProcessingJob {
        task_id,
        pdf_path,
        instruction: form
            .instruction
            .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string()),
        organization: form.organization.unwrap_or_default(),
        document_kind: form.document_kind.unwrap_or_default(),
        options: ChatOptions {
            model: form
                .model
                .unwrap_or_else(|| state.config.default_model.clone()),
            temperature: Some(
                form.temperature
                    .unwrap_or(state.config.default_temperature),
            ),
        },
    };

    info!(task_id = %task_id, filename = %filename, "upload accepted");

    // Fire and forget; the handle is dropped and the unit runs detached.
    let _handle = state.processor.spawn(job);

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "task_id": task_id.to_string(),
            "status": TaskStatus::Pending.as_str(),
            "message": "File uploaded successfully, processing started",
        })),
    ))
}

/// Best-effort removal of an upload whose task record was refused
async fn remove_rejected_upload(path: &std::path::Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), "failed to remove rejected upload: {}", e);
    }
}

/// GET /result/{task_id} - current state of one task
async fn get_result(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let task_id = TaskId::from_string(&task_id)
        .map_err(|_| AppError::NotFound("Task not found".to_string()))?;

    let record = state
        .store
        .lock()
        .map_err(|e| AppError::Internal(format!("Store lock error: {}", e)))?
        .get(task_id)?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let body = match record.status {
        TaskStatus::Completed => json!({
            "task_id": record.id.to_string(),
            "status": record.status.as_str(),
            "result": record.result,
        }),
        TaskStatus::Error => json!({
            "task_id": record.id.to_string(),
            "status": record.status.as_str(),
            "error": record.error.as_deref().unwrap_or("Unknown error"),
            "message": record.message,
        }),
        _ => json!({
            "task_id": record.id.to_string(),
            "status": record.status.as_str(),
            "message": record.message,
        }),
    };

    Ok(Json(body))
}

/// GET /tasks - identifier/status/message for every known task
async fn list_tasks(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let records = state
        .store
        .lock()
        .map_err(|e| AppError::Internal(format!("Store lock error: {}", e)))?
        .list()?;

    let tasks: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            json!({
                "task_id": r.id.to_string(),
                "status": r.status.as_str(),
                "message": r.message,
            })
        })
        .collect();

    Ok(Json(json!({ "tasks": tasks })))
}

/// GET /health - liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "API is running" }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/upload", post(upload))
        .route("/result/:task_id", get(get_result))
        .route("/tasks", get(list_tasks))
        .with_state(state)
}
