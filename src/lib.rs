// src/lib.rs
//! column-crypt: transparent, column-granular encryption for table rows
//!
//! Features:
//! - PBKDF2-HMAC-SHA1 key derivation from a passphrase (no stored key)
//! - AES-128/ECB/PKCS#7 per-value encryption, Base64 on the wire
//! - Per-table encrypted-column settings from XML or TOML
//! - Write-path row encryption and a decrypting cursor for the read path
//! - rusqlite integration and encrypted file storage

pub mod aliases;
pub mod config;
pub mod consts;
pub mod context;
pub mod crypto;
pub mod cursor;
pub mod db;
pub mod error;
pub mod file_ops;
pub mod row;
pub mod settings;
pub mod write;

// Re-export everything users need at the crate root
pub use aliases::{Passphrase, SecretKey16};
pub use config::{load as load_config, Config};
pub use context::EncryptionContext;
pub use crypto::{
    decrypt_text, derive_key, encrypt_text, init_for_decrypt, init_for_encrypt, DecryptSession,
    EncryptSession, KdfParams,
};
pub use cursor::{DecryptingCursor, MemoryRows, RowSource};
pub use error::{CipherError, ConfigurationError, CoreError, KeyDerivationError, Result};
pub use row::{RowBuffer, Value};
pub use settings::{
    EncryptedTableSettings, EncryptionSettings, SettingsProvider, TomlSettingsFile,
    XmlSettingsParser,
};
pub use write::{encrypt_row, encrypt_row_for_table};
