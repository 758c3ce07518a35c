// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Provider Key Cryptography
//!
//! The gateway expects every secret (login payload and authorization seed)
//! encrypted with its RSA public key using PKCS#1 v1.5 padding and sent as
//! standard Base64. The padding scheme is fixed by the gateway and is not a
//! choice of this service.
//!
//! - [`key`] loads the provider public key once at process start
//! - [`encryptor`] performs the encryption for the lifetime of the process

pub mod encryptor;
pub mod key;

use std::path::PathBuf;

pub use encryptor::Encryptor;
pub use key::load_public_key;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("provider public key has not been loaded")]
    KeyNotLoaded,

    #[error("public key file not found at {}", .0.display())]
    KeyFileMissing(PathBuf),

    #[error("failed to read public key file {}: {source}", path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("public key file {} is not a PEM RSA public key", .0.display())]
    KeyParse(PathBuf),

    #[error("plaintext is {len} bytes, key allows at most {max} bytes with PKCS#1 v1.5")]
    MessageTooLong { len: usize, max: usize },

    #[error("RSA encryption failed: {0}")]
    Encryption(String),
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Test key material. Generated once per test binary.

    use std::sync::{Arc, OnceLock};

    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

    use super::Encryptor;

    pub const KEY_BITS: usize = 1024;

    pub fn private_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            RsaPrivateKey::new(&mut rand::thread_rng(), KEY_BITS).expect("generate test key")
        })
    }

    pub fn public_key() -> RsaPublicKey {
        RsaPublicKey::from(private_key())
    }

    pub fn encryptor() -> Encryptor {
        Encryptor::new(Arc::new(public_key()))
    }

    /// Reverse of [`Encryptor::encrypt`] using the fixture private key.
    pub fn decrypt(encoded: &str) -> String {
        let ciphertext = STANDARD.decode(encoded).expect("valid base64");
        let plaintext = private_key()
            .decrypt(Pkcs1v15Encrypt, &ciphertext)
            .expect("decrypts with fixture key");
        String::from_utf8(plaintext).expect("utf-8 plaintext")
    }
}
