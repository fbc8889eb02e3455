//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! The vault file stores that buffer as a URL-safe base64 *token*
//! (`encrypt_token` / `decrypt_token`), so a record never contains
//! a newline and the token alphabet never contains a colon.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE as BASE64_URL;
use base64::Engine;
use zeroize::Zeroize;

use super::keys::VaultKey;
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    // Build the cipher from the raw key bytes.
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 12 bytes to be the nonce, followed by the ciphertext.
/// Any failure (short input, bad key, tag mismatch) is reported as
/// `DecryptionFailed` and no plaintext is returned.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    if ciphertext_with_nonce.len() < NONCE_LEN + TAG_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::DecryptionFailed)?;

    // Decrypt and verify the auth tag.
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)
}

/// Encrypt a credential string into a printable, URL-safe token.
pub fn encrypt_token(key: &VaultKey, plaintext: &str) -> Result<String> {
    let sealed = encrypt(key.as_bytes(), plaintext.as_bytes())?;
    Ok(BASE64_URL.encode(sealed))
}

/// Decrypt a token produced by `encrypt_token` back into the original string.
///
/// Fails with `DecryptionFailed` when the token is not valid base64url,
/// when the auth tag does not verify, or when the recovered bytes are
/// not UTF-8.
pub fn decrypt_token(key: &VaultKey, token: &str) -> Result<String> {
    let sealed = BASE64_URL
        .decode(token.as_bytes())
        .map_err(|_| VaultError::DecryptionFailed)?;

    let plaintext = decrypt(key.as_bytes(), &sealed)?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        VaultError::DecryptionFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_alphabet_never_contains_record_delimiters() {
        let key = VaultKey::new([0x5Au8; 32]);
        for len in 0..64 {
            let token = encrypt_token(&key, &"x".repeat(len)).unwrap();
            assert!(!token.contains(':'));
            assert!(!token.contains('\n'));
        }
    }

    #[test]
    fn token_length_covers_nonce_and_tag() {
        let key = VaultKey::new([0x01u8; 32]);
        let token = encrypt_token(&key, "").unwrap();
        let raw = BASE64_URL.decode(token).unwrap();
        assert_eq!(raw.len(), NONCE_LEN + TAG_LEN);
    }

    #[test]
    fn decrypt_rejects_non_base64_token() {
        let key = VaultKey::new([0x01u8; 32]);
        let result = decrypt_token(&key, "not a token!");
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn decrypt_rejects_input_shorter_than_nonce_and_tag() {
        let key = [0xAAu8; 32];
        assert!(decrypt(&key, &[0u8; NONCE_LEN + TAG_LEN - 1]).is_err());
    }
}
