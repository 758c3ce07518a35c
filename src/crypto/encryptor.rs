// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PKCS#1 v1.5 encryption with the provider public key.

use std::sync::Arc;

use base64ct::{Base64, Encoding};
use rsa::{traits::PublicKeyParts, Pkcs1v15Encrypt, RsaPublicKey};

use super::CryptoError;

/// PKCS#1 v1.5 needs at least 11 bytes of padding per block.
const PKCS1V15_OVERHEAD: usize = 11;

/// Encrypts text for the gateway.
///
/// Cheap to clone; the key is shared and immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Encryptor {
    key: Option<Arc<RsaPublicKey>>,
}

impl Encryptor {
    pub fn new(key: Arc<RsaPublicKey>) -> Self {
        Self { key: Some(key) }
    }

    /// An encryptor with no key. Every call fails with
    /// [`CryptoError::KeyNotLoaded`].
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.key.is_some()
    }

    /// Largest plaintext, in bytes, the loaded key can encrypt.
    pub fn max_plaintext_len(&self) -> Result<usize, CryptoError> {
        let key = self.key.as_ref().ok_or(CryptoError::KeyNotLoaded)?;
        Ok(key.size().saturating_sub(PKCS1V15_OVERHEAD))
    }

    /// Encrypt `plaintext` (UTF-8 bytes) and return standard Base64 with
    /// padding and no line breaks.
    ///
    /// PKCS#1 v1.5 padding is randomized, so two calls with the same input
    /// produce different ciphertexts that decrypt to the same text.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let key = self.key.as_ref().ok_or(CryptoError::KeyNotLoaded)?;

        let max = key.size().saturating_sub(PKCS1V15_OVERHEAD);
        let len = plaintext.len();
        if len > max {
            return Err(CryptoError::MessageTooLong { len, max });
        }

        let ciphertext = key
            .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, plaintext.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        Ok(Base64::encode_string(&ciphertext))
    }
}
