// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential exchange endpoint.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use tracing::{debug, error};

use crate::{
    error::ApiError,
    models::{AggregateResponse, EncryptRequest},
    relay::RelayError,
    state::AppState,
};

pub const INVALID_BODY_MESSAGE: &str = "request body must be valid JSON";
pub const LOGIN_FAILED_MESSAGE: &str = "CorporateLogin request failed";
pub const RELAY_FAILED_MESSAGE: &str = "Encryption or IBM API call failed";

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match &err {
            RelayError::Validation(e) => ApiError::bad_request(e.to_string()),
            RelayError::LoginTransport { error, trace } => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED_MESSAGE)
                    .with_details(error.clone(), trace.clone())
            }
            RelayError::Encryption(_) | RelayError::Gateway(_) => {
                ApiError::internal(RELAY_FAILED_MESSAGE, &err)
            }
        }
    }
}

/// Encrypt the credential, log in and replay the call battery.
///
/// The body is parsed regardless of `Content-Type`.
#[utoipa::path(
    post,
    path = "/api/encrypt",
    tag = "Relay",
    request_body = EncryptRequest,
    responses(
        (status = 200, description = "Login result and every downstream result", body = AggregateResponse),
        (status = 400, description = "Missing number or pin, or malformed JSON"),
        (status = 500, description = "Encryption or login request failed")
    )
)]
pub async fn encrypt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AggregateResponse>, ApiError> {
    let request: EncryptRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request(INVALID_BODY_MESSAGE))?;

    let number = request.number.unwrap_or_default();
    let pin = request.pin.unwrap_or_default();

    match state.relay.run(&number, &pin).await {
        Ok(response) => Ok(Json(response)),
        Err(RelayError::Validation(e)) => {
            debug!(error = %e, "Rejected relay request");
            Err(RelayError::Validation(e).into())
        }
        Err(e) => {
            error!(error = %e, "Encryption or gateway call failed");
            Err(e.into())
        }
    }
}
