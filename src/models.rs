// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the relay endpoint. Field names follow the
//! wire contract the dashboard reads (`camelCase`, `xHash`,
//! `ibmLoginResult`).

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::gateway::CallResult;

/// Body of `POST /api/encrypt`.
///
/// Both fields are optional at the JSON level so a missing field is reported
/// as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EncryptRequest {
    /// Device identifier, `MPOS@MSISDN` (e.g. `1010@923355923388`).
    #[serde(default)]
    pub number: Option<String>,
    /// Account PIN.
    #[serde(default)]
    pub pin: Option<String>,
}

/// Named results of the post-login battery, in dispatch order.
///
/// Serializes as a JSON object keyed by call name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalApis(Vec<(String, CallResult)>);

impl AdditionalApis {
    pub fn push(&mut self, name: impl Into<String>, result: CallResult) {
        self.0.push((name.into(), result));
    }

    pub fn get(&self, name: &str) -> Option<&CallResult> {
        self.0
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, result)| result)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CallResult)> {
        self.0.iter().map(|(name, result)| (name.as_str(), result))
    }
}

impl Serialize for AdditionalApis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, result) in &self.0 {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// Response of `POST /api/encrypt`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    /// Base64 RSA ciphertext of `number:pin`.
    pub encrypted_value: String,
    /// Gateway login response, verbatim.
    #[serde(rename = "ibmLoginResult")]
    #[schema(value_type = Object)]
    pub login_result: CallResult,
    /// Authorization hash; the previously stored value when login failed.
    pub x_hash: Option<String>,
    /// Per-call results, empty unless login succeeded.
    #[schema(value_type = Object)]
    pub additional_apis: AdditionalApis,
    /// Identifier exactly as received.
    pub used_number: String,
    /// Subscriber number derived from the identifier.
    pub pure_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encrypt_request_tolerates_missing_fields() {
        let request: EncryptRequest =
            serde_json::from_value(json!({"number": "1010@923355923388"})).unwrap();
        assert_eq!(request.number.as_deref(), Some("1010@923355923388"));
        assert!(request.pin.is_none());
    }

    #[test]
    fn additional_apis_serialize_in_insertion_order() {
        let mut apis = AdditionalApis::default();
        apis.push("Second", CallResult::Json(json!({"n": 2})));
        apis.push("First", CallResult::Json(json!({"n": 1})));

        let rendered = serde_json::to_string(&apis).unwrap();
        assert_eq!(rendered, r#"{"Second":{"n":2},"First":{"n":1}}"#);
        assert_eq!(apis.get("First"), Some(&CallResult::Json(json!({"n": 1}))));
        assert_eq!(apis.len(), 2);
    }

    #[test]
    fn aggregate_response_uses_wire_field_names() {
        let response = AggregateResponse {
            encrypted_value: "enc".to_string(),
            login_result: CallResult::Json(json!({"ResponseCode": "1"})),
            x_hash: None,
            additional_apis: AdditionalApis::default(),
            used_number: "1010@923355923388".to_string(),
            pure_number: "923355923388".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "encryptedValue": "enc",
                "ibmLoginResult": {"ResponseCode": "1"},
                "xHash": null,
                "additionalApis": {},
                "usedNumber": "1010@923355923388",
                "pureNumber": "923355923388"
            })
        );
    }
}
