// src/error.rs
//! Public error types for the entire crate
//!
//! `CoreError` is what every public operation returns. The narrower enums
//! describe one concern each and are wrapped by `CoreError`.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Turning a passphrase into a secret key failed
#[derive(Error, Debug)]
pub enum KeyDerivationError {
    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    #[error("iteration count must be at least 1")]
    InvalidIterations,

    #[error("salt must not be empty")]
    EmptySalt,

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// Cipher session init or transform failure
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("no secret key installed; call set_password first")]
    MissingKey,

    #[error("invalid key length for AES-128")]
    InvalidKeyLength,

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    Corrupt(usize),

    #[error("padding mismatch (wrong key or corrupt ciphertext)")]
    BadPadding,

    #[error("ciphertext is not valid Base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decrypted bytes are not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Missing or malformed encryption settings
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error(
        "encryption settings provider has not been specified; \
         install one with EncryptionContext::set_settings_provider"
    )]
    NoProvider,

    #[error("<encryption> tag is expected")]
    EncryptionTagExpected,

    #[error("<table> tag is expected, found <{0}>")]
    TableTagExpected(String),

    #[error("<column> tag is expected, found <{0}>")]
    ColumnTagExpected(String),

    #[error("<table> tag must have 'name' attribute")]
    TableMustHaveName,

    #[error("<column> tag must have 'name' attribute")]
    ColumnMustHaveName,

    #[error("'name' attribute is empty")]
    NameIsEmpty,

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported settings format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("key derivation error: {0}")]
    KeyDerivation(#[from] KeyDerivationError),

    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("column index {index} out of bounds (column count {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("error while decrypting cursor: {0}")]
    CursorDecryption(#[source] CipherError),

    #[error("column {column}: decrypted value is not a valid {target}")]
    NumericParse { column: usize, target: &'static str },

    #[error("column {column}: value is not {expected}")]
    TypeMismatch {
        column: usize,
        expected: &'static str,
    },

    #[error("no such column: {0}")]
    UnknownColumn(String),

    #[error("cursor is not positioned on a row")]
    NoCurrentRow,

    #[error("row has {found} values but the cursor has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),
}

impl CoreError {
    /// True for failures that mean the stored data itself is bad
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            CoreError::CursorDecryption(_) | CoreError::NumericParse { .. }
        )
    }
}
