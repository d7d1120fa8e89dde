// src/crypto/session.rs
//! Cipher sessions: AES-128/ECB/PKCS#7 over whole in-memory buffers
//!
//! A session is bound to one key and one direction. The direction is part
//! of the type, so an encrypting session cannot be handed to `decrypt`.
//!
//! ECB leaks equality between identical plaintexts. It is kept because
//! every stored value is encrypted on its own with no per-value IV, and
//! switching modes would change the on-disk format.

use std::fmt;
use std::marker::PhantomData;

use aes::Aes128;
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};

use crate::aliases::SecretKey16;
use crate::consts::AES_BLOCK_SIZE;
use crate::error::CipherError;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

mod sealed {
    pub trait Sealed {}
}

/// Marker for the direction a session was created for
pub trait Direction: sealed::Sealed {
    const NAME: &'static str;
}

#[derive(Debug)]
pub enum Encrypt {}

#[derive(Debug)]
pub enum Decrypt {}

impl sealed::Sealed for Encrypt {}
impl sealed::Sealed for Decrypt {}

impl Direction for Encrypt {
    const NAME: &'static str = "encrypt";
}

impl Direction for Decrypt {
    const NAME: &'static str = "decrypt";
}

/// Stateful handle bound to one key and one direction.
///
/// Not meant to be shared between threads; create one per unit of work.
pub struct CipherSession<D: Direction> {
    key: SecretKey16,
    _direction: PhantomData<D>,
}

pub type EncryptSession = CipherSession<Encrypt>;
pub type DecryptSession = CipherSession<Decrypt>;

impl<D: Direction> fmt::Debug for CipherSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSession")
            .field("direction", &D::NAME)
            .finish_non_exhaustive()
    }
}

impl<D: Direction> CipherSession<D> {
    fn new(key: &SecretKey16) -> Result<Self, CipherError> {
        // Reject anything AES-128 would not accept before handing the session out
        Aes128::new_from_slice(key.expose_secret()).map_err(|_| CipherError::InvalidKeyLength)?;
        Ok(Self {
            key: key.clone(),
            _direction: PhantomData,
        })
    }
}

impl CipherSession<Encrypt> {
    /// Encrypt a whole buffer. Output is always a non-empty multiple of 16 bytes.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let cipher = Aes128EcbEnc::new_from_slice(self.key.expose_secret())
            .map_err(|_| CipherError::InvalidKeyLength)?;
        Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }
}

impl CipherSession<Decrypt> {
    /// Decrypt a whole buffer produced by [`CipherSession::encrypt`]
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(CipherError::Corrupt(ciphertext.len()));
        }
        let cipher = Aes128EcbDec::new_from_slice(self.key.expose_secret())
            .map_err(|_| CipherError::InvalidKeyLength)?;
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CipherError::BadPadding)
    }
}

/// Create a session that only encrypts
pub fn init_for_encrypt(key: &SecretKey16) -> Result<EncryptSession, CipherError> {
    CipherSession::new(key)
}

/// Create a session that only decrypts
pub fn init_for_decrypt(key: &SecretKey16) -> Result<DecryptSession, CipherError> {
    CipherSession::new(key)
}
