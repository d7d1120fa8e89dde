// src/settings/mod.rs
//! Encryption settings: the model, its sources, and the snapshot cache
pub mod model;
pub mod provider;
pub mod toml_source;
pub mod xml;

pub use model::{EncryptedTableSettings, EncryptionSettings};
pub use provider::{provider_for_path, SettingsCache, SettingsProvider};
pub use toml_source::{parse_settings_toml, TomlSettingsFile};
pub use xml::{parse_settings_xml, XmlSettingsParser};
