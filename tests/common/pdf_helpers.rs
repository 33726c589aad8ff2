//! PDF inspection helpers.

use anyhow::Result;
use std::path::Path;

/// Extracts text from a PDF, returning an error instead of panicking.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    pdf_extract::extract_text(pdf_path)
        .map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))
}

/// Counts occurrences of a pattern in a PDF.
pub fn count_pattern_in_pdf(pdf_path: &Path, pattern: &str) -> Result<usize> {
    let text = extract_text(pdf_path)?;
    Ok(text.matches(pattern).count())
}

/// Checks if a PDF contains all of the given patterns.
pub fn pdf_contains_all(pdf_path: &Path, patterns: &[&str]) -> Result<bool> {
    let text = extract_text(pdf_path)?;
    Ok(patterns.iter().all(|p| text.contains(p)))
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    ::lopdf::Document::load(pdf_path).is_ok()
}

/// Number of pages according to lopdf.
pub fn page_count(pdf_path: &Path) -> Result<usize> {
    Ok(::lopdf::Document::load(pdf_path)?.get_pages().len())
}
