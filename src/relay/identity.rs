// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inbound credentials and the values derived from them.

use serde_json::Value;

/// Separates the device prefix from the subscriber number (`MPOS@MSISDN`).
pub const IDENTIFIER_SEPARATOR: char = '@';
const LOGIN_SEPARATOR: char = ':';
const SEED_SEPARATOR: char = '~';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("number and pin required")]
pub struct ValidationError;

/// A device identifier and PIN supplied for one request. Never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    pin: String,
}

// Keep the PIN out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("pin", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Both fields must be present and non-empty.
    pub fn new(identifier: impl Into<String>, pin: impl Into<String>) -> Result<Self, ValidationError> {
        let identifier = identifier.into();
        let pin = pin.into();
        if identifier.is_empty() || pin.is_empty() {
            return Err(ValidationError);
        }
        Ok(Self { identifier, pin })
    }

    pub fn subscriber(&self) -> Subscriber<'_> {
        Subscriber {
            identifier: &self.identifier,
            pure_number: pure_number(&self.identifier),
        }
    }

    /// `"{identifier}:{pin}"`, the plaintext of the login ciphertext.
    pub fn login_payload(&self) -> String {
        format!("{}{LOGIN_SEPARATOR}{}", self.identifier, self.pin)
    }
}

/// Values substituted into downstream payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscriber<'a> {
    /// Composite device/number token, verbatim.
    pub identifier: &'a str,
    /// Bare subscriber number.
    pub pure_number: &'a str,
}

/// Everything after the first separator, or the whole identifier when it
/// has none.
pub fn pure_number(identifier: &str) -> &str {
    identifier
        .split_once(IDENTIFIER_SEPARATOR)
        .map(|(_, number)| number)
        .unwrap_or(identifier)
}

/// `"{User}~{Timestamp}"` from a successful login response.
///
/// String fields are used as-is, other JSON values in their JSON form and
/// missing fields as empty text.
pub fn authorization_seed(login: &serde_json::Map<String, Value>) -> String {
    format!(
        "{}{SEED_SEPARATOR}{}",
        field_text(login.get("User")),
        field_text(login.get("Timestamp"))
    )
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
