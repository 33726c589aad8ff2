//! Bill extraction and the conversion service.
//!
//! This module ties a [`TextSource`] to the line scanner and the
//! renderer, giving callers a single entry point for turning an
//! itemized bill into a named, sectioned statement.

pub mod scanner;
pub mod source;

pub use scanner::{scan, scan_pages, ScanState};
pub use source::{LopdfSource, PdfExtractSource, TextSource};

use crate::domain::{Bucket, CallRecord, ContactDirectory};
use crate::error::{StatementError, StatementResult};
use crate::render::{StatementLayout, StatementRenderer};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Statistics about a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Pages of text read from the input bill
    pub pages_processed: usize,

    /// Call records written to the statement
    pub records_written: usize,

    /// Matches dropped because they appeared before any section header
    pub records_orphaned: usize,

    /// Rows per bucket, in bucket order
    pub bucket_counts: Vec<(Bucket, usize)>,

    /// Pages in the rendered statement
    pub pages_rendered: usize,

    pub output: PathBuf,
}

/// Conversion service coordinating extraction and rendering.
pub struct StatementConverter {
    source: Box<dyn TextSource>,
    renderer: StatementRenderer,
}

impl StatementConverter {
    /// Creates a converter reading page text through `source`.
    pub fn new(source: Box<dyn TextSource>, renderer: StatementRenderer) -> Self {
        Self { source, renderer }
    }

    /// Creates a converter backed by `pdf-extract`.
    pub fn with_default_source() -> Self {
        Self::new(Box::new(PdfExtractSource::new()), StatementRenderer::new())
    }

    /// Name of the configured text source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Extracts call records from the bill at `input`, in document order.
    ///
    /// An empty result is not an error here; [`create_statement`] is the
    /// operation that treats it as "nothing to render".
    ///
    /// [`create_statement`]: Self::create_statement
    pub fn extract_records(
        &self,
        input: &Path,
        directory: &ContactDirectory,
    ) -> StatementResult<Vec<CallRecord>> {
        Ok(self.scan_input(input, directory)?.1.records)
    }

    /// Extracts raw page text, pages separated by form feeds.
    pub fn extract_text(&self, input: &Path) -> StatementResult<String> {
        ensure_exists(input)?;
        Ok(self.source.extract_pages(input)?.join("\n\x0c"))
    }

    /// Builds a new statement at `output` from the bill at `input`.
    ///
    /// Nothing is written when extraction fails or finds no records.
    pub fn create_statement(
        &self,
        input: &Path,
        output: &Path,
        directory: &ContactDirectory,
    ) -> StatementResult<ConversionSummary> {
        let (pages_processed, state) = self.scan_input(input, directory)?;

        if state.orphaned > 0 {
            warn!(
                count = state.orphaned,
                "records found before any section header were dropped"
            );
        }

        if state.records.is_empty() {
            return Err(StatementError::NoRecordsExtracted {
                path: input.to_path_buf(),
            });
        }

        let layout = StatementLayout::from_records(state.records);
        let pages_rendered = self.renderer.write(&layout, output)?;

        let summary = ConversionSummary {
            pages_processed,
            records_written: layout.record_count(),
            records_orphaned: state.orphaned,
            bucket_counts: Bucket::ALL
                .iter()
                .map(|&bucket| (bucket, layout.count(bucket)))
                .collect(),
            pages_rendered,
            output: output.to_path_buf(),
        };

        info!(
            records = summary.records_written,
            output = %output.display(),
            "statement created"
        );
        Ok(summary)
    }

    fn scan_input(
        &self,
        input: &Path,
        directory: &ContactDirectory,
    ) -> StatementResult<(usize, ScanState)> {
        ensure_exists(input)?;

        let pages = self.source.extract_pages(input)?;
        info!(
            pages = pages.len(),
            source = self.source.name(),
            input = %input.display(),
            "scanning bill"
        );
        Ok((pages.len(), scan(&pages, directory)))
    }
}

impl Default for StatementConverter {
    fn default() -> Self {
        Self::with_default_source()
    }
}

fn ensure_exists(input: &Path) -> StatementResult<()> {
    if !input.exists() {
        return Err(StatementError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    Ok(())
}
