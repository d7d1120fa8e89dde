// src/crypto/codec.rs
//! Text ⇄ printable ciphertext
//!
//! `UTF-8 bytes → AES → Base64` on the way in, the reverse on the way out.
//! Empty values are never encrypted and decode to `None`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::crypto::session::{DecryptSession, EncryptSession};
use crate::error::CipherError;

/// Encrypt `plaintext` into a Base64 string.
///
/// Returns `None` for an empty input so callers can leave the column untouched.
pub fn encrypt_text(
    session: &mut EncryptSession,
    plaintext: &str,
) -> Result<Option<String>, CipherError> {
    if plaintext.is_empty() {
        return Ok(None);
    }
    let ciphertext = session.encrypt(plaintext.as_bytes())?;
    Ok(Some(STANDARD.encode(ciphertext)))
}

/// Decrypt a Base64 string produced by [`encrypt_text`].
///
/// Line breaks and other ASCII whitespace inside the Base64 are ignored, so
/// values written with MIME-style wrapping still decode.
pub fn decrypt_text(
    session: &mut DecryptSession,
    encoded: Option<&str>,
) -> Result<Option<String>, CipherError> {
    let encoded = match encoded {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let ciphertext = STANDARD.decode(compact)?;
    let plaintext = session.decrypt(&ciphertext)?;
    Ok(Some(String::from_utf8(plaintext)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::SecretKey16;
    use crate::crypto::session::{init_for_decrypt, init_for_encrypt};

    fn sessions() -> (EncryptSession, DecryptSession) {
        let key = SecretKey16::new([3u8; 16]);
        (
            init_for_encrypt(&key).unwrap(),
            init_for_decrypt(&key).unwrap(),
        )
    }

    #[test]
    fn empty_is_never_encrypted() {
        let (mut enc, mut dec) = sessions();
        assert_eq!(encrypt_text(&mut enc, "").unwrap(), None);
        assert_eq!(decrypt_text(&mut dec, None).unwrap(), None);
        assert_eq!(decrypt_text(&mut dec, Some("")).unwrap(), None);
    }

    #[test]
    fn wrapped_base64_still_decodes() {
        let (mut enc, mut dec) = sessions();
        let long = "a".repeat(120);
        let encoded = encrypt_text(&mut enc, &long).unwrap().unwrap();
        assert!(encoded.len() > 76);

        let (head, tail) = encoded.split_at(76);
        let wrapped = format!("{head}\n{tail}\n");
        assert_eq!(
            decrypt_text(&mut dec, Some(&wrapped)).unwrap().as_deref(),
            Some(long.as_str())
        );
    }

    #[test]
    fn non_base64_input_is_an_error() {
        let (_, mut dec) = sessions();
        assert!(matches!(
            decrypt_text(&mut dec, Some("not*base64!")),
            Err(CipherError::Base64(_))
        ));
    }
}
