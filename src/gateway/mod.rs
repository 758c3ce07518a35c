// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Retailer gateway HTTP client.
//!
//! Every call is a JSON `POST` carrying the client identity headers and, once
//! a login has succeeded, the authorization hash. [`GatewayClient::call`]
//! never fails: transport problems and non-JSON bodies are folded into
//! [`CallResult`] so callers can store the outcome as-is.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::{GatewayCredentials, RelayConfig},
    error::error_trace,
};

pub const HASH_HEADER: &str = "X-Hash-Value";
pub const CLIENT_ID_HEADER: &str = "X-IBM-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "X-IBM-Client-Secret";
pub const CHANNEL_HEADER: &str = "X-Channel";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to build gateway session: {0}")]
    Session(#[source] reqwest::Error),

    #[error("invalid gateway endpoint `{path}`: {source}")]
    Endpoint {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

/// Outcome of a single gateway call.
///
/// Serializes to exactly what the caller sees: the gateway's JSON verbatim,
/// `{"http_status", "text"}` for a non-JSON body, or `{"error", "trace"}`
/// when no response was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallResult {
    Json(Value),
    NonJson { http_status: u16, text: String },
    TransportFailure { error: String, trace: String },
}

impl CallResult {
    pub fn transport_failure(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::TransportFailure {
            error: err.to_string(),
            trace: error_trace(err),
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure { .. })
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Cookie-carrying transport shared by every call of one inbound request.
///
/// Clones share the same cookie jar and connection pool.
#[derive(Debug, Clone)]
pub struct GatewaySession {
    http: Client,
}

/// A single call description.
pub struct GatewayRequest<'a> {
    pub url: &'a Url,
    /// Omitted from the headers when empty.
    pub auth_hash: &'a str,
    pub body: &'a Value,
    /// Merged after the identity headers; same-named entries replace them.
    pub extra_headers: &'a [(String, String)],
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: Url,
    credentials: GatewayCredentials,
    /// Applied to every call; `None` waits for the gateway indefinitely.
    deadline: Option<Duration>,
}

impl GatewayClient {
    pub fn new(base_url: Url, credentials: GatewayCredentials, deadline: Option<Duration>) -> Self {
        Self {
            base_url,
            credentials,
            deadline,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            config.gateway_base_url.clone(),
            config.credentials.clone(),
            config.gateway_timeout,
        )
    }

    /// Resolve a fixed endpoint path against the configured base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|source| GatewayError::Endpoint {
                path: path.to_string(),
                source,
            })
    }

    /// Open a fresh transport session with an empty cookie jar.
    pub fn open_session(&self) -> Result<GatewaySession, GatewayError> {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(GatewayError::Session)?;
        Ok(GatewaySession { http })
    }

    pub async fn call(&self, session: &GatewaySession, request: GatewayRequest<'_>) -> CallResult {
        let headers = match self.headers(request.auth_hash, request.extra_headers) {
            Ok(headers) => headers,
            Err(message) => {
                warn!(url = %request.url, error = %message, "Gateway call has invalid headers");
                return CallResult::TransportFailure {
                    error: message.clone(),
                    trace: message,
                };
            }
        };

        let mut builder = session
            .http
            .post(request.url.clone())
            .headers(headers)
            .json(request.body);
        if let Some(deadline) = self.deadline {
            builder = builder.timeout(deadline);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %request.url, error = %e, "Gateway call failed in transport");
                return CallResult::transport_failure(&e);
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %request.url, error = %e, "Gateway response body could not be read");
                return CallResult::transport_failure(&e);
            }
        };

        debug!(url = %request.url, status = status.as_u16(), "Gateway call completed");

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => CallResult::Json(value),
            Err(_) => CallResult::NonJson {
                http_status: status.as_u16(),
                text,
            },
        }
    }

    fn headers(&self, auth_hash: &str, extra: &[(String, String)]) -> Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        insert_header(&mut headers, CLIENT_ID_HEADER, &self.credentials.client_id)?;
        insert_header(
            &mut headers,
            CLIENT_SECRET_HEADER,
            &self.credentials.client_secret,
        )?;
        insert_header(&mut headers, CHANNEL_HEADER, &self.credentials.channel)?;
        if !auth_hash.is_empty() {
            insert_header(&mut headers, HASH_HEADER, auth_hash)?;
        }
        for (name, value) in extra {
            insert_header(&mut headers, name, value)?;
        }
        Ok(headers)
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), String> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| format!("invalid header name `{name}`: {e}"))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| format!("invalid value for header `{name}`: {e}"))?;
    headers.insert(name, value);
    Ok(())
}
