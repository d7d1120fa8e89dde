// src/file_ops.rs
//! File-level encryption/decryption operations
//!
//! Thin encrypt-then-write / read-then-decrypt wrappers around the cipher
//! sessions. The file holds the raw AES-128/ECB ciphertext, nothing else.

use std::path::{Path, PathBuf};

use crate::crypto::{DecryptSession, EncryptSession};
use crate::error::{CipherError, Result};

/// Encrypt `plaintext` and write it to `path`, replacing any existing file
pub fn write<P: AsRef<Path>>(
    session: &mut EncryptSession,
    path: P,
    plaintext: &[u8],
) -> Result<()> {
    let ciphertext = session.encrypt(plaintext)?;
    std::fs::write(path.as_ref(), ciphertext)?;
    Ok(())
}

/// Read `path` and decrypt its contents
pub fn read<P: AsRef<Path>>(session: &mut DecryptSession, path: P) -> Result<Vec<u8>> {
    let ciphertext = std::fs::read(path.as_ref())?;
    Ok(session.decrypt(&ciphertext)?)
}

/// [`write`] to `file_name` inside `base_dir`
pub fn write_in<P: AsRef<Path>>(
    session: &mut EncryptSession,
    base_dir: P,
    file_name: &str,
    plaintext: &[u8],
) -> Result<()> {
    write(session, file_path(base_dir, file_name), plaintext)
}

/// [`read`] from `file_name` inside `base_dir`
pub fn read_in<P: AsRef<Path>>(
    session: &mut DecryptSession,
    base_dir: P,
    file_name: &str,
) -> Result<Vec<u8>> {
    read(session, file_path(base_dir, file_name))
}

/// Encrypt a UTF-8 document into `base_dir/file_name`
pub fn write_string<P: AsRef<Path>>(
    session: &mut EncryptSession,
    base_dir: P,
    file_name: &str,
    body: &str,
) -> Result<()> {
    write_in(session, base_dir, file_name, body.as_bytes())
}

/// Decrypt `base_dir/file_name` as a UTF-8 document
pub fn read_string<P: AsRef<Path>>(
    session: &mut DecryptSession,
    base_dir: P,
    file_name: &str,
) -> Result<String> {
    let bytes = read_in(session, base_dir, file_name)?;
    Ok(String::from_utf8(bytes).map_err(CipherError::Utf8)?)
}

fn file_path<P: AsRef<Path>>(base_dir: P, file_name: &str) -> PathBuf {
    base_dir.as_ref().join(file_name)
}
