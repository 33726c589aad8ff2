//! Phone number to display name lookup.

use std::collections::HashMap;
use tracing::{debug, trace};

/// Contacts every run starts with unless told otherwise.
pub const DEFAULT_CONTACTS: &[(&str, &str)] = &[("9945194909", "Sandeep")];

/// In-memory mapping from phone number to display name.
///
/// The number is the unique key and the last write wins. Nothing is
/// persisted; a directory lives for a single conversion run and is only
/// read once extraction starts.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    entries: HashMap<String, String>,
}

impl ContactDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with [`DEFAULT_CONTACTS`].
    pub fn with_defaults() -> Self {
        let mut directory = Self::new();
        directory.extend(
            DEFAULT_CONTACTS
                .iter()
                .map(|(number, name)| (number.to_string(), name.to_string())),
        );
        directory
    }

    /// Inserts or overwrites the name for `phone_number`.
    pub fn add_or_update(&mut self, phone_number: impl Into<String>, name: impl Into<String>) {
        let phone_number = phone_number.into();
        let name = name.into();
        debug!(number = %phone_number, name = %name, "added/updated contact");
        self.entries.insert(phone_number, name);
    }

    /// Returns the name for `phone_number`, or an empty string when unknown.
    pub fn lookup(&self, phone_number: &str) -> String {
        let name = self.entries.get(phone_number).cloned().unwrap_or_default();
        trace!(number = phone_number, name = %name, "contact lookup");
        name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<(String, String)> for ContactDirectory {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        for (number, name) in iter {
            self.add_or_update(number, name);
        }
    }
}

impl FromIterator<(String, String)> for ContactDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut directory = Self::new();
        directory.extend(iter);
        directory
    }
}
