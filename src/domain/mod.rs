//! Domain models and business rules for itemized bills.
//!
//! This module contains the pieces that know what a bill looks like:
//! the call record layout, the section headers that scope records,
//! and the directory used to put names next to numbers.

pub mod contacts;
pub mod record;
pub mod section;

pub use contacts::ContactDirectory;
pub use record::{CallRecord, CallRecordMatcher, RecordFields};
pub use section::{is_airtel_number, is_boilerplate, Bucket, Category, Section};
