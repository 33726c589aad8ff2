//! Rebuilds itemized telecom bills as named, sectioned PDF statements.
//!
//! The library reads the itemized call section of a billing PDF, puts a
//! contact name next to every dialled number, groups the calls into the
//! bill's local and STD sections and renders them as a fresh statement.
//!
//! # Architecture
//!
//! - [`domain`]: Record layout, section headers, buckets and contacts
//! - [`extraction`]: Page text sources, the line scanner and the
//!   [`StatementConverter`] service
//! - [`render`]: Table layout and PDF rendering
//! - [`config`]: Defaults, TOML configuration and CLI overrides
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use itemized::{ContactDirectory, StatementConverter};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut contacts = ContactDirectory::new();
//! contacts.add_or_update("9876543210", "John");
//!
//! let converter = StatementConverter::with_default_source();
//! let summary = converter.create_statement(
//!     Path::new("bill.pdf"),
//!     Path::new("named_bill.pdf"),
//!     &contacts,
//! )?;
//! println!("{} records", summary.records_written);
//! # Ok(())
//! # }
//! ```
//!
//! # Scanning text directly
//!
//! ```
//! use itemized::{scan_pages, Bucket, ContactDirectory};
//!
//! let page = "2.STD Calls\n2.a to airtel mobile\n\
//!             4 05/MAR/2024 18:22:10 9441234567 02:00 2 2.00";
//! let records = scan_pages(&[page], &ContactDirectory::new());
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].bucket, Bucket::StdAirtel);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod extraction;
pub mod logger;
pub mod render;

pub use domain::{
    is_airtel_number, is_boilerplate, Bucket, CallRecord, CallRecordMatcher, Category,
    ContactDirectory, Section,
};
pub use error::{StatementError, StatementResult};
pub use extraction::{
    scan_pages, ConversionSummary, LopdfSource, PdfExtractSource, StatementConverter, TextSource,
};
pub use render::{StatementLayout, StatementRenderer};
