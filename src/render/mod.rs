//! Statement rendering.
//!
//! Rendering happens in two steps: [`StatementLayout`] decides which
//! tables exist and in what order, [`StatementRenderer`] draws them.

pub mod layout;
pub mod pdf;

pub use layout::{BucketTable, CategoryGroup, StatementLayout};
pub use pdf::{StatementRenderer, COLUMN_HEADERS, TITLE};
