//! Request types for document processing

use grantflow_domain::{DocumentKind, Organization, TaskId};
use grantflow_llm::ChatOptions;
use std::path::PathBuf;

/// Everything the processor needs to run one uploaded document
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    /// Identifier of the pending task record
    pub task_id: TaskId,

    /// Path of the temporary uploaded file; removed when the job finishes
    pub pdf_path: PathBuf,

    /// Free-text user instruction for the model
    pub instruction: String,

    /// Organization whose guidelines to inject
    pub organization: Organization,

    /// Extraction strategy hint
    pub document_kind: DocumentKind,

    /// Model identifier and sampling options
    pub options: ChatOptions,
}
