//! PDF text extraction
//!
//! Applications extract page by page via `lopdf`; slide decks go through
//! `pdf-extract`, which keeps the approximate spatial layout so text blocks
//! on a slide stay legible.

use crate::error::PipelineError;
use grantflow_domain::DocumentKind;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Extract plain text from all pages of a PDF
///
/// Pages are trimmed, empty pages are omitted, and the remainder is joined
/// with blank lines. The whole result carries no leading or trailing
/// whitespace.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, PipelineError> {
    let text = match kind {
        DocumentKind::Application => extract_paged(path)?,
        DocumentKind::Presentation => extract_layout(path)?,
    };

    debug!(chars = text.len(), kind = %kind, "extracted PDF text");
    Ok(text)
}

/// Page-by-page extraction for flowing prose
fn extract_paged(path: &Path) -> Result<String, PipelineError> {
    let doc = Document::load(path)
        .map_err(|e| PipelineError::Extraction(format!("Failed to load PDF: {}", e)))?;

    let mut pages = Vec::new();
    for (page_num, _page_id) in doc.get_pages() {
        let content = doc
            .extract_text(&[page_num])
            .map_err(|e| PipelineError::Extraction(format!("Page {}: {}", page_num, e)))?;
        pages.push(content);
    }

    Ok(join_pages(pages))
}

/// Layout-preserving extraction for slide decks
///
/// `pdf-extract` renders the whole document at once, separating pages with
/// form feeds; no vertical whitespace inside a page is compressed.
fn extract_layout(path: &Path) -> Result<String, PipelineError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| PipelineError::Extraction(format!("Failed to extract PDF: {}", e)))?;

    Ok(join_pages(text.split('\u{c}').map(str::to_string)))
}

/// Trim pages, drop empty ones, join the rest with blank lines
fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    pages
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
