// src/settings/toml_source.rs
//! TOML settings document
//!
//! ```toml
//! [[table]]
//! name = "users"
//! columns = ["ssn", "email"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::settings::model::{EncryptedTableSettings, EncryptionSettings};
use crate::settings::provider::SettingsProvider;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDocument {
    #[serde(default, rename = "table")]
    tables: Vec<TomlTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTable {
    name: String,
    #[serde(default)]
    columns: Vec<String>,
}

/// Parse a TOML settings document
pub fn parse_settings_toml(text: &str) -> Result<EncryptionSettings, ConfigurationError> {
    let doc: TomlDocument = toml::from_str(text)?;
    doc.tables
        .into_iter()
        .map(|t| {
            if t.name.trim().is_empty() {
                return Err(ConfigurationError::NameIsEmpty);
            }
            let mut table = EncryptedTableSettings::new(t.name);
            for column in t.columns {
                if column.trim().is_empty() {
                    return Err(ConfigurationError::NameIsEmpty);
                }
                table.mark_column_encrypted(column);
            }
            Ok(table)
        })
        .collect()
}

/// Settings provider that reads a TOML file on every (re)computation
pub struct TomlSettingsFile {
    path: PathBuf,
}

impl TomlSettingsFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SettingsProvider for TomlSettingsFile {
    fn load_settings(&self) -> Result<EncryptionSettings, ConfigurationError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|source| ConfigurationError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_settings_toml(&text)
    }
}
