//! Common test utilities and helpers.
//!
//! This module provides shared functionality for integration tests:
//! - Builders for synthetic itemized bills
//! - PDF inspection helpers

#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_helpers;

pub use fixtures::*;
pub use pdf_helpers::*;
