// src/crypto/kdf.rs
//! Passphrase → AES-128 key via PBKDF2-HMAC-SHA1
//!
//! Deterministic: the same passphrase, salt and iteration count always
//! yield the same key, so ciphertext stays readable across restarts
//! without the key ever being stored.

use hmac::Hmac;
use serde::Deserialize;
use sha1::Sha1;

use crate::aliases::SecretKey16;
use crate::consts::{DEFAULT_KDF_ITERATIONS, DEFAULT_KDF_SALT, KEY_LEN_BYTES};
use crate::error::KeyDerivationError;

/// Salt and work factor fed to PBKDF2
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    pub iterations: u32,
    pub salt: String,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KDF_ITERATIONS,
            salt: DEFAULT_KDF_SALT.to_string(),
        }
    }
}

impl KdfParams {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

/// Derive the column key from `passphrase`
pub fn derive_key(passphrase: &str, params: &KdfParams) -> Result<SecretKey16, KeyDerivationError> {
    if passphrase.is_empty() {
        return Err(KeyDerivationError::EmptyPassphrase);
    }
    if params.iterations == 0 {
        return Err(KeyDerivationError::InvalidIterations);
    }
    if params.salt.is_empty() {
        return Err(KeyDerivationError::EmptySalt);
    }

    let mut key = [0u8; KEY_LEN_BYTES];
    pbkdf2::pbkdf2::<Hmac<Sha1>>(
        passphrase.as_bytes(),
        params.salt.as_bytes(),
        params.iterations,
        &mut key,
    )
    .map_err(|e| KeyDerivationError::DerivationFailed(e.to_string()))?;

    Ok(SecretKey16::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_reference_values() {
        let params = KdfParams::default();
        assert_eq!(params.iterations, 1000);
        assert_eq!(params.salt, "salt0123456789yo");
    }

    #[test]
    fn empty_salt_is_rejected() {
        let params = KdfParams {
            iterations: 1,
            salt: String::new(),
        };
        assert!(matches!(
            derive_key("pw", &params),
            Err(KeyDerivationError::EmptySalt)
        ));
    }

    #[test]
    fn iterations_change_the_key() {
        let a = derive_key("pw", &KdfParams::default()).unwrap();
        let b = derive_key("pw", &KdfParams::default().with_iterations(2000)).unwrap();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }
}
