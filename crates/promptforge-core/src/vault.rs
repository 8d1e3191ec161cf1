//! Credential vault for provider API keys at rest (BYOK)
//!
//! Symmetric authenticated encryption keyed by a process-wide master secret.
//! The AES-256 key is derived with PBKDF2-HMAC-SHA256 (100,000 iterations)
//! over a fixed application-level salt: every ciphertext in a deployment
//! shares one derived key, so rotating the master secret invalidates all
//! stored provider keys. There is no staged re-encryption path.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::AppError;

const KDF_ITERATIONS: u32 = 100_000;
const KDF_SALT: &[u8] = b"promptforge_vault_v1";
const NONCE_LEN: usize = 12;

/// Vault for encrypting and decrypting provider API keys.
/// Plaintext keys are never persisted; only vault output is stored.
#[derive(Clone)]
pub struct CredentialVault {
    cipher: Aes256Gcm,
}

impl CredentialVault {
    /// Create a vault from a master secret, deriving the AES-256 key.
    pub fn new(master_secret: &str) -> Self {
        let mut key_bytes = [0u8; 32];
        pbkdf2_hmac::<Sha256>(
            master_secret.as_bytes(),
            KDF_SALT,
            KDF_ITERATIONS,
            &mut key_bytes,
        );
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Create a vault from raw 32-byte key material, skipping derivation.
    /// Mainly for tests; avoids paying the KDF cost per test.
    pub fn from_key_bytes(key_bytes: &[u8]) -> Result<Self, AppError> {
        if key_bytes.len() != 32 {
            return Err(AppError::Internal(
                "Vault key must be 32 bytes (256 bits)".to_string(),
            ));
        }
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Encrypt a plaintext API key for storage.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, AppError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| AppError::Internal(format!("Encryption failed: {}", e)))?;

        // Combine nonce and ciphertext, then base64 encode
        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(general_purpose::STANDARD.encode(&combined))
    }

    /// Decrypt a stored token back to the plaintext API key.
    ///
    /// Fails on tampering, a wrong master secret, or malformed input; the
    /// AEAD tag guarantees this never yields garbage plaintext as if valid.
    pub fn decrypt(&self, encrypted: &str) -> Result<String, AppError> {
        let combined = general_purpose::STANDARD
            .decode(encrypted)
            .map_err(|e| AppError::Decryption(format!("Invalid token encoding: {}", e)))?;

        if combined.len() < NONCE_LEN {
            return Err(AppError::Decryption("Token too short".to_string()));
        }

        let nonce = Nonce::from_slice(&combined[..NONCE_LEN]);
        let ciphertext = &combined[NONCE_LEN..];

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| AppError::Decryption(format!("Decryption failed: {}", e)))?;

        String::from_utf8(plaintext)
            .map_err(|e| AppError::Decryption(format!("Invalid UTF-8 in plaintext: {}", e)))
    }
}

/// Non-secret identification fragment of a plaintext key for UI display.
/// First 10 characters, or first 4 for unusually short keys.
pub fn key_prefix(plaintext: &str) -> String {
    if plaintext.chars().count() >= 10 {
        plaintext.chars().take(10).collect()
    } else {
        plaintext.chars().take(4).collect()
    }
}
