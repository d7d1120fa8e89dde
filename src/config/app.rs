// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::consts::{CONFIG_PATH_ENV, KDF_ITERATIONS_ENV};
use crate::crypto::KdfParams;
use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub kdf: KdfParams,
    pub settings: SettingsConfig,
    /// Name of the env var holding the passphrase
    pub passphrase_env: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// `.xml` or `.toml` settings document; relative paths resolve against
    /// the config file's directory
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kdf: default_kdf(),
            settings: SettingsConfig::default(),
            passphrase_env: default_passphrase_env(),
        }
    }
}

/// Load config from a TOML file, then apply env overrides
pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigurationError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut conf: Config = toml::from_str(&content)?;

    if let (Some(settings), Some(base)) = (conf.settings.path.as_mut(), path.parent()) {
        if settings.is_relative() {
            let resolved = base.join(&settings);
            *settings = resolved;
        }
    }

    apply_env_overrides(&mut conf);
    Ok(conf)
}

/// Load config from the file named by `COLUMN_CRYPT_CONFIG`, or fall back
/// to built-in defaults when it is unset
pub fn from_env() -> Result<Config, ConfigurationError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load(path),
        Err(_) => {
            warn!("{CONFIG_PATH_ENV} not set, using built-in defaults");
            let mut conf = Config::default();
            apply_env_overrides(&mut conf);
            Ok(conf)
        }
    }
}

fn apply_env_overrides(conf: &mut Config) {
    if let Ok(raw) = std::env::var(KDF_ITERATIONS_ENV) {
        match raw.parse::<u32>() {
            Ok(n) if n > 0 => conf.kdf.iterations = n,
            _ => warn!(value = %raw, "ignoring invalid {KDF_ITERATIONS_ENV}"),
        }
    }
}
