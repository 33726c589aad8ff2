//! Run configuration.
//!
//! Settings come from three places, highest precedence first: command
//! line flags, an optional TOML file, and built-in defaults. The TOML
//! file looks like:
//!
//! ```toml
//! input = "/home/me/Downloads/bill.pdf"
//! output = "/home/me/Downloads/named_bill.pdf"
//!
//! [contacts]
//! "9876543210" = "John"
//! ```

use crate::domain::ContactDirectory;
use crate::error::{StatementError, StatementResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bill looked for when no input is given.
pub const DEFAULT_INPUT_NAME: &str = "MF2629I002189456.pdf";

/// Prefix added to the input file name to form the default output name.
pub const OUTPUT_PREFIX: &str = "names_";

/// Contents of a TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub contacts: BTreeMap<String, String>,
}

impl FileConfig {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> StatementResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StatementError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&text).map_err(|reason| StatementError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub contacts: ContactDirectory,
}

/// Collects overrides and resolves them against defaults.
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    file: FileConfig,
    contacts: Vec<(String, String)>,
    default_contacts: bool,
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            file: FileConfig::default(),
            contacts: Vec::new(),
            default_contacts: true,
        }
    }
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn file(mut self, file: FileConfig) -> Self {
        self.file = file;
        self
    }

    pub fn contacts(mut self, contacts: impl IntoIterator<Item = (String, String)>) -> Self {
        self.contacts.extend(contacts);
        self
    }

    /// Whether to seed the directory with the built-in contacts.
    pub fn default_contacts(mut self, enabled: bool) -> Self {
        self.default_contacts = enabled;
        self
    }

    /// Resolves paths and builds the contact directory.
    ///
    /// Contacts are layered so later sources win: built-in seed, then
    /// the config file, then command line entries.
    pub fn build(self) -> RunConfig {
        let input = self
            .input
            .or(self.file.input)
            .unwrap_or_else(default_input);
        let output = self
            .output
            .or(self.file.output)
            .unwrap_or_else(|| default_output_for(&input));

        let mut contacts = if self.default_contacts {
            ContactDirectory::with_defaults()
        } else {
            ContactDirectory::new()
        };
        contacts.extend(self.file.contacts);
        contacts.extend(self.contacts);

        RunConfig {
            input,
            output,
            contacts,
        }
    }
}

/// The user's Downloads directory, falling back to `~/Downloads`.
pub fn downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_input() -> PathBuf {
    downloads_dir().join(DEFAULT_INPUT_NAME)
}

/// `names_<stem>.pdf` next to the input bill.
pub fn default_output_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    input.with_file_name(format!("{}{}.pdf", OUTPUT_PREFIX, stem))
}

/// Parses a `NUMBER=NAME` contact argument.
pub fn parse_contact(arg: &str) -> Result<(String, String), String> {
    let (number, name) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NUMBER=NAME, got '{}'", arg))?;
    let number = number.trim();
    if number.is_empty() {
        return Err("contact number must not be empty".to_string());
    }
    Ok((number.to_string(), name.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_config() {
        let config = FileConfig::parse(
            r#"
input = "/bills/in.pdf"

[contacts]
"9876543210" = "John"
"#,
        )
        .unwrap();
        assert_eq!(config.input, Some(PathBuf::from("/bills/in.pdf")));
        assert_eq!(config.output, None);
        assert_eq!(config.contacts.get("9876543210").map(String::as_str), Some("John"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(FileConfig::parse("inptu = \"x.pdf\"").is_err());
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output_for(Path::new("/d/MF2629I002189456.pdf")),
            PathBuf::from("/d/names_MF2629I002189456.pdf")
        );
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = FileConfig {
            input: Some(PathBuf::from("/file/in.pdf")),
            output: Some(PathBuf::from("/file/out.pdf")),
            ..Default::default()
        };
        file.contacts
            .insert("9876543210".to_string(), "FromFile".to_string());

        let config = RunConfigBuilder::new()
            .input(Some(PathBuf::from("/cli/in.pdf")))
            .file(file)
            .contacts(vec![("9876543210".to_string(), "FromCli".to_string())])
            .build();

        assert_eq!(config.input, PathBuf::from("/cli/in.pdf"));
        assert_eq!(config.output, PathBuf::from("/file/out.pdf"));
        assert_eq!(config.contacts.lookup("9876543210"), "FromCli");
        assert_eq!(config.contacts.lookup("9945194909"), "Sandeep");
    }

    #[test]
    fn test_output_follows_input() {
        let config = RunConfigBuilder::new()
            .input(Some(PathBuf::from("/bills/march.pdf")))
            .default_contacts(false)
            .build();
        assert_eq!(config.output, PathBuf::from("/bills/names_march.pdf"));
        assert!(config.contacts.is_empty());
    }

    #[test]
    fn test_parse_contact() {
        assert_eq!(
            parse_contact("9876543210=John Smith"),
            Ok(("9876543210".to_string(), "John Smith".to_string()))
        );
        assert!(parse_contact("9876543210").is_err());
        assert!(parse_contact("=John").is_err());
    }
}
