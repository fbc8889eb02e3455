//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption, plus the base64url token
//!   form stored in vault files (`encryption`)
//! - Key generation, key files, and the session `KeyStore` (`keys`)

pub mod encryption;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_token, decrypt_token, VaultKey, ...};
pub use encryption::{decrypt, decrypt_token, encrypt, encrypt_token};
pub use keys::{generate_key, load_key, save_key, KeyStore, VaultKey, KEY_LEN};
