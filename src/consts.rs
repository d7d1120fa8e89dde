// src/consts.rs
//! Shared constants: security parameters and defaults

/// PBKDF2-HMAC-SHA1 iterations used by default.
// Matches the format of data already on disk; raise it for new deployments.
pub const DEFAULT_KDF_ITERATIONS: u32 = 1000;

/// Implementation-fixed PBKDF2 salt
pub const DEFAULT_KDF_SALT: &str = "salt0123456789yo";

/// AES-128 key length in bytes
pub const KEY_LEN_BYTES: usize = 16;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// Env var holding the path of the TOML config file
pub const CONFIG_PATH_ENV: &str = "COLUMN_CRYPT_CONFIG";

/// Env var overriding the KDF iteration count
pub const KDF_ITERATIONS_ENV: &str = "COLUMN_CRYPT_KDF_ITERATIONS";

/// Default env var holding the passphrase
pub const DEFAULT_PASSPHRASE_ENV: &str = "COLUMN_CRYPT_PASSPHRASE";
