// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Provider public key loading.

use std::{fs, path::Path};

use rsa::{pkcs1::DecodeRsaPublicKey, pkcs8::DecodePublicKey, RsaPublicKey};
use tracing::info;

use super::CryptoError;

/// Load the provider RSA public key from a PEM file.
///
/// Accepts both `BEGIN PUBLIC KEY` (SPKI) and `BEGIN RSA PUBLIC KEY`
/// (PKCS#1) encodings. Called once at startup; any error here is fatal.
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey, CryptoError> {
    if !path.exists() {
        return Err(CryptoError::KeyFileMissing(path.to_path_buf()));
    }

    let pem = fs::read_to_string(path).map_err(|source| CryptoError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let pem = pem.trim();

    let key = RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|_| CryptoError::KeyParse(path.to_path_buf()))?;

    info!(path = %path.display(), "Loaded provider public key");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fixtures;
    use rsa::{
        pkcs1::EncodeRsaPublicKey,
        pkcs8::{EncodePublicKey, LineEnding},
    };
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_spki_pem() {
        let pem = fixtures::public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        let file = write_temp(&pem);

        let key = load_public_key(file.path()).unwrap();
        assert_eq!(key, fixtures::public_key());
    }

    #[test]
    fn loads_pkcs1_pem() {
        let pem = fixtures::public_key()
            .to_pkcs1_pem(LineEnding::LF)
            .unwrap();
        let file = write_temp(&pem);

        let key = load_public_key(file.path()).unwrap();
        assert_eq!(key, fixtures::public_key());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pem");

        let err = load_public_key(&path).unwrap_err();
        assert!(matches!(err, CryptoError::KeyFileMissing(p) if p == path));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let file = write_temp("-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----\n");

        let err = load_public_key(file.path()).unwrap_err();
        assert!(matches!(err, CryptoError::KeyParse(_)));
    }
}
