//! Line scanner turning page text into call records.
//!
//! The scanner is a small state machine. Its only state is the section
//! most recently announced by a header line; every record found on a
//! later line is filed under that section.

use crate::domain::{is_boilerplate, CallRecord, CallRecordMatcher, ContactDirectory, Section};
use tracing::{debug, trace};

/// Accumulator threaded through the scan.
#[derive(Debug, Default)]
pub struct ScanState {
    /// Section announced by the last header line, if any.
    pub current: Option<Section>,
    /// Records in page, line, then left-to-right order.
    pub records: Vec<CallRecord>,
    /// Matches discarded because no header preceded them.
    pub orphaned: usize,
}

impl ScanState {
    /// Consumes one line of page text.
    pub fn advance(
        mut self,
        line: &str,
        matcher: &CallRecordMatcher,
        directory: &ContactDirectory,
    ) -> Self {
        if line.trim().is_empty() {
            return self;
        }

        // Headers before boilerplate: a header sharing a line with page
        // furniture still switches the section.
        if let Some(section) = Section::detect(line) {
            debug!(section = %section, "entered section");
            self.current = Some(section);
            return self;
        }

        if is_boilerplate(line) {
            trace!(line, "skipped boilerplate");
            return self;
        }

        for fields in matcher.extract_all(line) {
            match self.current {
                Some(section) => {
                    let name = directory.lookup(fields.number);
                    debug!(
                        serial = fields.serial,
                        section = %section,
                        number = fields.number,
                        name = %name,
                        "found record"
                    );
                    self.records
                        .push(CallRecord::new(fields, name, section.bucket()));
                }
                None => {
                    debug!(serial = fields.serial, "dropping record outside any section");
                    self.orphaned += 1;
                }
            }
        }

        self
    }
}

/// Scans all pages and returns the records in the order they appear.
pub fn scan_pages<S: AsRef<str>>(pages: &[S], directory: &ContactDirectory) -> Vec<CallRecord> {
    scan(pages, directory).records
}

/// Like [`scan_pages`], but returns the final scanner state.
pub fn scan<S: AsRef<str>>(pages: &[S], directory: &ContactDirectory) -> ScanState {
    let matcher = CallRecordMatcher::new();

    pages
        .iter()
        .enumerate()
        .fold(ScanState::default(), |state, (index, page)| {
            debug!(page = index + 1, "processing page");
            page.as_ref()
                .lines()
                .fold(state, |state, line| state.advance(line, &matcher, directory))
        })
}
