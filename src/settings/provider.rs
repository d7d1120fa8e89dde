// src/settings/provider.rs
//! Settings sources and the lazily-populated snapshot cache

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::settings::model::EncryptionSettings;
use crate::settings::toml_source::TomlSettingsFile;
use crate::settings::xml::XmlSettingsParser;

/// Produces the column encryption map from some external source
pub trait SettingsProvider: Send + Sync {
    fn load_settings(&self) -> Result<EncryptionSettings, ConfigurationError>;
}

/// A ready-made settings value is its own provider
impl SettingsProvider for EncryptionSettings {
    fn load_settings(&self) -> Result<EncryptionSettings, ConfigurationError> {
        Ok(self.clone())
    }
}

impl<F> SettingsProvider for F
where
    F: Fn() -> Result<EncryptionSettings, ConfigurationError> + Send + Sync,
{
    fn load_settings(&self) -> Result<EncryptionSettings, ConfigurationError> {
        self()
    }
}

/// Pick a file-backed provider from the extension of `path` (`.xml` or `.toml`)
pub fn provider_for_path(
    path: impl AsRef<Path>,
) -> Result<Box<dyn SettingsProvider>, ConfigurationError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xml") => Ok(Box::new(XmlSettingsParser::from_path(path))),
        Some("toml") => Ok(Box::new(TomlSettingsFile::new(path))),
        _ => Err(ConfigurationError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Installed provider plus the snapshot computed from it.
///
/// The snapshot is computed at most once per installed provider, even when
/// several threads ask for it at the same time. Installing a provider takes
/// `&mut self`, so it cannot overlap with readers.
#[derive(Default)]
pub struct SettingsCache {
    provider: Option<Box<dyn SettingsProvider>>,
    snapshot: OnceCell<Arc<EncryptionSettings>>,
}

impl fmt::Debug for SettingsCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsCache")
            .field("has_provider", &self.provider.is_some())
            .field("snapshot", &self.snapshot.get())
            .finish()
    }
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the provider and drop any cached snapshot
    pub fn set_provider(&mut self, provider: Box<dyn SettingsProvider>) {
        self.provider = Some(provider);
        self.snapshot = OnceCell::new();
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Current snapshot, computing it on first access
    pub fn get(&self) -> Result<Arc<EncryptionSettings>, ConfigurationError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ConfigurationError::NoProvider)?;
        self.snapshot
            .get_or_try_init(|| {
                let settings = provider.load_settings()?;
                debug!(tables = settings.len(), "encryption settings loaded");
                Ok(Arc::new(settings))
            })
            .cloned()
    }
}
