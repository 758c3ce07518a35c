// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
    pub trace: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            trace: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A 500 carrying the failing error's message and its source chain.
    pub fn internal(message: impl Into<String>, err: &(dyn StdError + 'static)) -> Self {
        Self {
            details: Some(err.to_string()),
            trace: Some(error_trace(err)),
            ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }

    pub fn with_details(mut self, details: impl Into<String>, trace: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self.trace = Some(trace.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            details: self.details,
            trace: self.trace,
        });
        (self.status, body).into_response()
    }
}

/// Render an error and every `source()` beneath it, one per line.
///
/// Rust errors carry no stack trace, so the cause chain is the diagnostic
/// handed back to operators.
pub fn error_trace(err: &(dyn StdError + 'static)) -> String {
    let mut trace = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        trace.push_str("\ncaused by: ");
        trace.push_str(&cause.to_string());
        current = cause.source();
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");
        assert!(bad.details.is_none());

        let err = Outer(std::io::Error::other("disk gone"));
        let internal = ApiError::internal("boom", &err);
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.details.as_deref(), Some("outer failure"));
        assert_eq!(
            internal.trace.as_deref(),
            Some("outer failure\ncaused by: disk gone")
        );
    }

    #[test]
    fn error_trace_without_source_is_just_the_message() {
        let err = std::io::Error::other("flat");
        assert_eq!(error_trace(&err), "flat");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }

    #[tokio::test]
    async fn internal_response_includes_details_and_trace() {
        let response = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed")
            .with_details("dns error", "dns error\ncaused by: no such host")
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "failed");
        assert_eq!(body["details"], "dns error");
        assert_eq!(body["trace"], "dns error\ncaused by: no such host");
    }
}
