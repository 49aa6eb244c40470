//! Error types for the pipeline

use thiserror::Error;

/// Errors that can occur while processing a document
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The file could not be read or parsed as a PDF
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    /// Extracted text exceeds the configured maximum
    #[error("Document text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Chat provider error
    #[error("LLM error: {0}")]
    Llm(#[from] grantflow_llm::LlmError),

    /// Task store error
    #[error("Store error: {0}")]
    Store(String),

    /// The model call exceeded the pipeline timeout
    #[error("Model call timed out")]
    Timeout,

    /// Filesystem error outside of PDF parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
