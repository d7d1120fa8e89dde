// src/config/defaults.rs
use crate::consts::DEFAULT_PASSPHRASE_ENV;
use crate::crypto::KdfParams;

pub fn default_kdf() -> KdfParams {
    KdfParams::default()
}

pub fn default_passphrase_env() -> String {
    DEFAULT_PASSPHRASE_ENV.into()
}
