//! GrantFlow Pipeline
//!
//! Sequences one uploaded document through extraction, prompt assembly and
//! the model call, recording progress in the task store.
//!
//! # Architecture
//!
//! ```text
//! Upload → Processor → PDF text → Prompt → ChatProvider → TaskStore
//! ```
//!
//! # Key Features
//!
//! - **PDF extraction**: page-joined text for applications,
//!   layout-preserving extraction for slide decks
//! - **Guideline injection**: organization guideline text cached per
//!   process, silently degrading when the file is absent
//! - **Cancellable handles**: each spawned task returns a handle with a
//!   cancellation token; dropping the handle detaches the task
//! - **Scoped cleanup**: the uploaded file is removed on every exit path
//!
//! # Example Usage
//!
//! ```no_run
//! use grantflow_pipeline::{PipelineConfig, ProcessingJob, Processor};
//! use grantflow_llm::{ChatOptions, MockProvider};
//! use grantflow_store::MemoryTaskStore;
//! use grantflow_domain::{Organization, DocumentKind, TaskId, TaskRecord, TaskStore};
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() {
//! let store = Arc::new(Mutex::new(MemoryTaskStore::new()));
//! let processor = Arc::new(Processor::new(
//!     Arc::new(MockProvider::new("Looks fundable.")),
//!     Arc::clone(&store),
//!     PipelineConfig::default(),
//! ));
//!
//! let task_id = TaskId::new();
//! store
//!     .lock()
//!     .unwrap()
//!     .create(TaskRecord::new(task_id, "proposal.pdf"))
//!     .unwrap();
//!
//! let job = ProcessingJob {
//!     task_id,
//!     pdf_path: "uploads/proposal.pdf".into(),
//!     instruction: "Summarize the project.".to_string(),
//!     organization: Organization::Fpi,
//!     document_kind: DocumentKind::Application,
//!     options: ChatOptions::default(),
//! };
//!
//! let handle = processor.spawn(job);
//! handle.join().await;
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod guidelines;
mod pdf;
mod processor;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use guidelines::GuidelineCache;
pub use pdf::extract_text;
pub use processor::{Processor, TaskHandle};
pub use prompt::{PromptBuilder, SYSTEM_DIRECTIVE};
pub use types::ProcessingJob;
