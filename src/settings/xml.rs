// src/settings/xml.rs
//! XML settings document
//!
//! ```xml
//! <encryption>
//!     <table name="users">
//!         <column name="ssn"/>
//!         <column name="email"/>
//!     </table>
//! </encryption>
//! ```
//!
//! Anything before the first `<encryption>` element is skipped. Every child
//! of `<encryption>` must be a `<table>` and every child of `<table>` a
//! `<column>`, each carrying exactly one attribute, `name`, with a
//! non-blank value.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use crate::error::ConfigurationError;
use crate::settings::model::{EncryptedTableSettings, EncryptionSettings};
use crate::settings::provider::SettingsProvider;

const ENCRYPTION_TAG: &str = "encryption";
const TABLE_TAG: &str = "table";
const COLUMN_TAG: &str = "column";
const NAME_ATTRIBUTE: &str = "name";

/// Parse an XML settings document
pub fn parse_settings_xml(text: &str) -> Result<EncryptionSettings, ConfigurationError> {
    let doc = Document::parse(text)?;
    let root = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == ENCRYPTION_TAG)
        .ok_or(ConfigurationError::EncryptionTagExpected)?;

    let mut settings = EncryptionSettings::new();
    for table_node in root.children().filter(Node::is_element) {
        let tag = table_node.tag_name().name();
        if tag != TABLE_TAG {
            return Err(ConfigurationError::TableTagExpected(tag.to_string()));
        }
        let table_name = name_attribute(table_node, ConfigurationError::TableMustHaveName)?;

        let mut table = EncryptedTableSettings::new(table_name);
        for column_node in table_node.children().filter(Node::is_element) {
            let tag = column_node.tag_name().name();
            if tag != COLUMN_TAG {
                return Err(ConfigurationError::ColumnTagExpected(tag.to_string()));
            }
            let column = name_attribute(column_node, ConfigurationError::ColumnMustHaveName)?;
            table.mark_column_encrypted(column);
        }
        // A repeated table name replaces the earlier entry
        settings.insert_table(table);
    }
    Ok(settings)
}

fn name_attribute<'a>(
    node: Node<'a, '_>,
    missing: ConfigurationError,
) -> Result<&'a str, ConfigurationError> {
    let mut attrs = node.attributes();
    let attr = match (attrs.next(), attrs.next()) {
        (Some(attr), None) if attr.name() == NAME_ATTRIBUTE => attr,
        _ => return Err(missing),
    };
    let value = attr.value();
    if value.trim().is_empty() {
        return Err(ConfigurationError::NameIsEmpty);
    }
    Ok(value)
}

enum XmlSource {
    Text(String),
    File(PathBuf),
}

/// Settings provider backed by an XML document, in memory or on disk.
///
/// A file source is re-read every time settings are (re)computed.
pub struct XmlSettingsParser {
    source: XmlSource,
}

impl XmlSettingsParser {
    pub fn from_xml(text: impl Into<String>) -> Self {
        Self {
            source: XmlSource::Text(text.into()),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: XmlSource::File(path.as_ref().to_path_buf()),
        }
    }
}

impl SettingsProvider for XmlSettingsParser {
    fn load_settings(&self) -> Result<EncryptionSettings, ConfigurationError> {
        match &self.source {
            XmlSource::Text(text) => parse_settings_xml(text),
            XmlSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| {
                    ConfigurationError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                parse_settings_xml(&text)
            }
        }
    }
}
