//! Page text sources.
//!
//! This module defines the seam between the converter and the PDF
//! libraries that turn a bill into lines of text.

use crate::error::{StatementError, StatementResult};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::debug;

/// Strategy for pulling per-page text out of a PDF.
pub trait TextSource: Send + Sync {
    /// Returns one string per page, in page order.
    fn extract_pages(&self, input: &Path) -> StatementResult<Vec<String>>;

    /// Returns a human-readable name for this source.
    fn name(&self) -> &str;
}

/// Text source backed by `pdf-extract`.
///
/// `pdf-extract` can panic on malformed input instead of returning an
/// error, so extraction runs behind `catch_unwind`.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractSource;

impl PdfExtractSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PdfExtractSource {
    fn extract_pages(&self, input: &Path) -> StatementResult<Vec<String>> {
        let bytes = read_input(input)?;

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }));

        match result {
            Ok(Ok(pages)) => {
                debug!(pages = pages.len(), source = self.name(), "extracted page text");
                Ok(pages)
            }
            Ok(Err(e)) => Err(StatementError::TextExtraction {
                path: input.to_path_buf(),
                reason: e.to_string(),
            }),
            Err(_) => Err(StatementError::TextExtraction {
                path: input.to_path_buf(),
                reason: "PDF extraction panicked (malformed document)".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

/// Text source backed by `lopdf`'s content stream text extraction.
///
/// Less faithful to visual layout than [`PdfExtractSource`] but tolerant of
/// documents whose fonts trip up `pdf-extract`.
#[derive(Debug, Clone, Default)]
pub struct LopdfSource;

impl LopdfSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for LopdfSource {
    fn extract_pages(&self, input: &Path) -> StatementResult<Vec<String>> {
        let bytes = read_input(input)?;

        let doc = lopdf::Document::load_mem(&bytes).map_err(|e| StatementError::TextExtraction {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| StatementError::TextExtraction {
                    path: input.to_path_buf(),
                    reason: format!("page {}: {}", page_number, e),
                })?;
            pages.push(text);
        }

        debug!(pages = pages.len(), source = self.name(), "extracted page text");
        Ok(pages)
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

/// Reads the whole bill. The file handle is closed before parsing starts.
fn read_input(input: &Path) -> StatementResult<Vec<u8>> {
    std::fs::read(input).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StatementError::InputNotFound {
                path: input.to_path_buf(),
            }
        } else {
            StatementError::Io {
                path: input.to_path_buf(),
                source: e,
            }
        }
    })
}
