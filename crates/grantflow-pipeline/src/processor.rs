//! Per-task processing state machine
//!
//! One `Processor` serves the whole process; each uploaded document runs as
//! its own spawned unit. A task's record is written only by its own unit,
//! so records never see concurrent writers.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::guidelines::GuidelineCache;
use crate::pdf;
use crate::prompt::PromptBuilder;
use crate::types::ProcessingJob;
use grantflow_domain::{TaskId, TaskStatus, TaskStore};
use grantflow_llm::ChatProvider;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Handle to a spawned processing unit
///
/// Cancelling marks the task errored and removes the uploaded file;
/// dropping the handle detaches the unit (it runs to completion on its
/// own).
pub struct TaskHandle {
    task_id: TaskId,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Identifier of the task this handle controls
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Request cancellation of the unit
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the unit to finish (completed, errored or cancelled)
    pub async fn join(self) {
        let _ = self.join.await;
    }
}

/// Drives one document through extract → prompt → model → store
pub struct Processor<S>
where
    S: TaskStore,
{
    provider: Arc<dyn ChatProvider>,
    store: Arc<Mutex<S>>,
    config: PipelineConfig,
    guidelines: GuidelineCache,
}

struct Execution {
    result: String,
    guidelines_included: bool,
}

impl<S> Processor<S>
where
    S: TaskStore + Send + 'static,
    S::Error: std::fmt::Display,
{
    /// Create a new processor
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        store: Arc<Mutex<S>>,
        config: PipelineConfig,
    ) -> Self {
        let guidelines = GuidelineCache::new(config.guidelines_dir.clone());
        Self {
            provider,
            store,
            config,
            guidelines,
        }
    }

    /// Spawn a background unit for one job and return its handle
    pub fn spawn(self: &Arc<Self>, job: ProcessingJob) -> TaskHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let processor = Arc::clone(self);
        let task_id = job.task_id;
        let pdf_path = job.pdf_path.clone();

        let join = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    warn!(task_id = %task_id, "task cancelled");
                    processor.record_failure(task_id, "Task cancelled before completion");
                    remove_upload(&pdf_path);
                }
                _ = processor.run(job) => {}
            }
        });

        TaskHandle {
            task_id,
            cancel,
            join,
        }
    }

    /// Run one job to a terminal status, removing the upload on every exit
    /// path
    pub async fn run(&self, job: ProcessingJob) {
        info!(
            task_id = %job.task_id,
            organization = %job.organization,
            kind = %job.document_kind,
            model = %job.options.model,
            "starting task"
        );

        match self.execute(&job).await {
            Ok(execution) => {
                let message = if execution.guidelines_included {
                    format!(
                        "Processing completed successfully (guidelines: {})",
                        job.organization
                    )
                } else {
                    format!(
                        "Processing completed successfully (no guidelines found for {})",
                        job.organization
                    )
                };
                info!(task_id = %job.task_id, "task completed");
                self.record_completion(job.task_id, &execution.result, &message);
            }
            Err(e) => {
                warn!(task_id = %job.task_id, "task failed: {}", e);
                self.record_failure(job.task_id, &e.to_string());
            }
        }

        remove_upload(&job.pdf_path);
    }

    async fn execute(&self, job: &ProcessingJob) -> Result<Execution, PipelineError> {
        self.advance(job.task_id, "Extracting text from PDF...")?;

        let text = pdf::extract_text(&job.pdf_path, job.document_kind)?;
        if text.len() > self.config.max_text_length {
            return Err(PipelineError::TextTooLong(
                text.len(),
                self.config.max_text_length,
            ));
        }
        debug!(task_id = %job.task_id, chars = text.len(), "text extracted");

        self.advance(job.task_id, "Calling model API...")?;

        let builder = PromptBuilder::new(text, &job.instruction)
            .with_guidelines(self.guidelines.load(job.organization));
        let guidelines_included = builder.has_guidelines();
        let messages = builder.build();

        let result = timeout(
            self.config.llm_timeout(),
            self.provider.chat(&messages, &job.options),
        )
        .await
        .map_err(|_| PipelineError::Timeout)??;

        Ok(Execution {
            result,
            guidelines_included,
        })
    }

    fn advance(&self, task_id: TaskId, message: &str) -> Result<(), PipelineError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| PipelineError::Store(format!("Store lock error: {}", e)))?;
        store
            .advance(task_id, TaskStatus::Processing, message)
            .map_err(|e| PipelineError::Store(e.to_string()))
    }

    fn record_completion(&self, task_id: TaskId, result: &str, message: &str) {
        match self.store.lock() {
            Ok(mut store) => {
                if let Err(e) = store.complete(task_id, result, message) {
                    debug!(task_id = %task_id, "completion not recorded: {}", e);
                }
            }
            Err(e) => warn!(task_id = %task_id, "store lock error: {}", e),
        }
    }

    fn record_failure(&self, task_id: TaskId, error: &str) {
        match self.store.lock() {
            Ok(mut store) => {
                if let Err(e) = store.fail(task_id, error) {
                    debug!(task_id = %task_id, "failure not recorded: {}", e);
                }
            }
            Err(e) => warn!(task_id = %task_id, "store lock error: {}", e),
        }
    }
}

/// Best-effort removal of the temporary uploaded file
fn remove_upload(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), "failed to remove upload: {}", e);
        }
    }
}
