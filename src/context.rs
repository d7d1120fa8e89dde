// src/context.rs
//! `EncryptionContext`: the secret key and settings cache, owned by the
//! application and passed by reference to every engine call.
//!
//! Install the passphrase and the settings provider once at startup
//! (`&mut self`), then share `&EncryptionContext` with readers and writers.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::aliases::{Passphrase, SecretKey16};
use crate::config::Config;
use crate::crypto::{self, derive_key, DecryptSession, EncryptSession, KdfParams};
use crate::cursor::{DecryptingCursor, RowSource};
use crate::error::{CipherError, Result};
use crate::row::RowBuffer;
use crate::settings::{provider_for_path, EncryptionSettings, SettingsCache, SettingsProvider};
use crate::write;

#[derive(Default)]
pub struct EncryptionContext {
    kdf: KdfParams,
    key: Option<SecretKey16>,
    settings: SettingsCache,
}

impl fmt::Debug for EncryptionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionContext")
            .field("kdf_iterations", &self.kdf.iterations)
            .field("has_key", &self.key.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl EncryptionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kdf_params(kdf: KdfParams) -> Self {
        Self {
            kdf,
            ..Self::default()
        }
    }

    /// Build a context from configuration: KDF parameters, the settings file
    /// (if any), and the passphrase from the configured env var (if set).
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut ctx = Self::with_kdf_params(config.kdf.clone());

        if let Some(path) = &config.settings.path {
            ctx.settings.set_provider(provider_for_path(path)?);
            info!(path = %path.display(), "settings provider installed from config");
        }

        match std::env::var(&config.passphrase_env) {
            Ok(value) => {
                let passphrase = Passphrase::new(value);
                ctx.set_password(passphrase.expose_secret())?;
            }
            Err(_) => debug!(
                env = %config.passphrase_env,
                "passphrase env var not set; call set_password before encrypting"
            ),
        }
        Ok(ctx)
    }

    pub fn kdf_params(&self) -> &KdfParams {
        &self.kdf
    }

    /// Derive and install the secret key, replacing any previous one
    pub fn set_password(&mut self, passphrase: &str) -> Result<()> {
        let key = derive_key(passphrase, &self.kdf)?;
        let replaced = self.key.replace(key).is_some();
        info!(
            iterations = self.kdf.iterations,
            replaced, "secret key derived from passphrase"
        );
        Ok(())
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Install a settings source; the next `settings()` call recomputes
    pub fn set_settings_provider<P: SettingsProvider + 'static>(&mut self, provider: P) {
        self.set_settings_provider_boxed(Box::new(provider));
    }

    pub fn set_settings_provider_boxed(&mut self, provider: Box<dyn SettingsProvider>) {
        self.settings.set_provider(provider);
        info!("encryption settings provider installed");
    }

    /// Cached settings snapshot, computed on first access after installation
    pub fn settings(&self) -> Result<Arc<EncryptionSettings>> {
        Ok(self.settings.get()?)
    }

    pub fn init_for_encrypt(&self) -> Result<EncryptSession> {
        let key = self.key.as_ref().ok_or(CipherError::MissingKey)?;
        Ok(crypto::init_for_encrypt(key)?)
    }

    pub fn init_for_decrypt(&self) -> Result<DecryptSession> {
        let key = self.key.as_ref().ok_or(CipherError::MissingKey)?;
        Ok(crypto::init_for_decrypt(key)?)
    }

    /// Encrypt the columns the settings mark encrypted for `table`
    pub fn encrypt_row(
        &self,
        session: &mut EncryptSession,
        row: &mut RowBuffer,
        table: &str,
    ) -> Result<()> {
        write::encrypt_row_for_table(self, session, row, table)
    }

    /// Wrap `inner` so encrypted columns of `table` decrypt on access
    pub fn decrypting_cursor<C: RowSource>(
        &self,
        inner: C,
        table: Option<&str>,
    ) -> DecryptingCursor<'_, C> {
        DecryptingCursor::new(self, inner, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, KeyDerivationError};

    #[test]
    fn sessions_need_a_key() {
        let ctx = EncryptionContext::new();
        assert!(matches!(
            ctx.init_for_encrypt(),
            Err(CoreError::Cipher(CipherError::MissingKey))
        ));
        assert!(matches!(
            ctx.init_for_decrypt(),
            Err(CoreError::Cipher(CipherError::MissingKey))
        ));
    }

    #[test]
    fn empty_passphrase_keeps_previous_key() {
        let mut ctx = EncryptionContext::new();
        ctx.set_password("first").unwrap();
        assert!(matches!(
            ctx.set_password(""),
            Err(CoreError::KeyDerivation(KeyDerivationError::EmptyPassphrase))
        ));
        assert!(ctx.has_key());
    }

    #[test]
    fn debug_hides_key_material() {
        let mut ctx = EncryptionContext::new();
        ctx.set_password("pw").unwrap();
        let shown = format!("{ctx:?}");
        assert!(shown.contains("has_key: true"));
    }
}
