// src/crypto/mod.rs
//! Pure cryptographic operations: no I/O, no database
//!
//! All functions work exclusively on in-memory buffers.
mod codec;
mod kdf;
mod session;

pub use codec::{decrypt_text, encrypt_text};
pub use kdf::{derive_key, KdfParams};
pub use session::{
    init_for_decrypt, init_for_encrypt, CipherSession, Decrypt, DecryptSession, Direction,
    Encrypt, EncryptSession,
};
