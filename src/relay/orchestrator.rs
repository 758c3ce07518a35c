// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Relay Orchestrator
//!
//! Drives one inbound request through the gateway:
//!
//! 1. Validate the credentials and derive the subscriber number
//! 2. Encrypt `identifier:pin` and log in on a fresh transport session
//! 3. On `ResponseCode == "0"`, encrypt `User~Timestamp` into the
//!    authorization hash and store it process-wide
//! 4. Replay the call battery with that session and hash, one result slot
//!    per call
//!
//! Anything failing before or during login aborts the request. Failures
//! inside the battery stay in their own slot.

use serde_json::{json, Map, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::{
    config::FanOutMode,
    crypto::{CryptoError, Encryptor},
    gateway::{CallResult, GatewayClient, GatewayError, GatewayRequest, GatewaySession},
    models::{AdditionalApis, AggregateResponse},
};

use super::{
    identity::{authorization_seed, Credentials, Subscriber, ValidationError},
    session::SessionState,
    templates::{CallTemplate, BATTERY, LOGIN_PATH, LOGIN_PAYLOAD_FIELD},
};

const LOGIN_SUCCESS_CODE: &str = "0";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encryption(#[from] CryptoError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("login request failed: {error}")]
    LoginTransport { error: String, trace: String },
}

pub struct Relay {
    encryptor: Encryptor,
    gateway: GatewayClient,
    session: SessionState,
    mode: FanOutMode,
}

impl Relay {
    pub fn new(
        encryptor: Encryptor,
        gateway: GatewayClient,
        session: SessionState,
        mode: FanOutMode,
    ) -> Self {
        Self {
            encryptor,
            gateway,
            session,
            mode,
        }
    }

    pub fn key_loaded(&self) -> bool {
        self.encryptor.is_loaded()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub async fn run(&self, identifier: &str, pin: &str) -> Result<AggregateResponse, RelayError> {
        let run_id = Uuid::new_v4();
        self.execute(identifier, pin)
            .instrument(info_span!("relay", %run_id))
            .await
    }

    async fn execute(&self, identifier: &str, pin: &str) -> Result<AggregateResponse, RelayError> {
        let credentials = Credentials::new(identifier, pin)?;
        let subscriber = credentials.subscriber();

        let encrypted_value = self.encryptor.encrypt(&credentials.login_payload())?;

        let session = self.gateway.open_session()?;
        let login_url = self.gateway.endpoint(LOGIN_PATH)?;
        let login_body = json!({ LOGIN_PAYLOAD_FIELD: encrypted_value });

        let login_result = self
            .gateway
            .call(
                &session,
                GatewayRequest {
                    url: &login_url,
                    auth_hash: "",
                    body: &login_body,
                    extra_headers: &[],
                },
            )
            .await;

        let login_result = match login_result {
            CallResult::TransportFailure { error, trace } => {
                warn!(error = %error, "Login request failed");
                return Err(RelayError::LoginTransport { error, trace });
            }
            other => other,
        };

        let mut additional_apis = AdditionalApis::default();
        let x_hash = match successful_login(&login_result) {
            Some(login) => {
                let hash = self.encryptor.encrypt(&authorization_seed(login))?;
                self.session.replace(hash.clone()).await;
                info!(identifier = %subscriber.identifier, "Login succeeded, dispatching calls");

                additional_apis = self.fan_out(&session, &hash, subscriber).await;
                Some(hash)
            }
            None => {
                warn!(
                    login_result = %serde_json::to_string(&login_result).unwrap_or_default(),
                    "Login failed or returned unexpected result"
                );
                self.session.current().await
            }
        };

        Ok(AggregateResponse {
            encrypted_value,
            login_result,
            x_hash,
            additional_apis,
            used_number: subscriber.identifier.to_string(),
            pure_number: subscriber.pure_number.to_string(),
        })
    }

    async fn fan_out(
        &self,
        session: &GatewaySession,
        hash: &str,
        subscriber: Subscriber<'_>,
    ) -> AdditionalApis {
        let mut apis = AdditionalApis::default();

        match self.mode {
            FanOutMode::Sequential => {
                for template in &BATTERY {
                    let result = dispatch(&self.gateway, session, hash, template, subscriber).await;
                    log_outcome(template.name, &result);
                    apis.push(template.name, result);
                }
            }
            FanOutMode::Concurrent => {
                let handles: Vec<_> = BATTERY
                    .iter()
                    .map(|template| {
                        let template = *template;
                        let gateway = self.gateway.clone();
                        let session = session.clone();
                        let hash = hash.to_string();
                        let identifier = subscriber.identifier.to_string();
                        let pure_number = subscriber.pure_number.to_string();
                        let task = tokio::spawn(
                            async move {
                                let subscriber = Subscriber {
                                    identifier: &identifier,
                                    pure_number: &pure_number,
                                };
                                dispatch(&gateway, &session, &hash, &template, subscriber).await
                            }
                            .in_current_span(),
                        );
                        (template.name, task)
                    })
                    .collect();

                for (name, task) in handles {
                    let result = match task.await {
                        Ok(result) => result,
                        Err(e) => CallResult::TransportFailure {
                            error: format!("{name} task failed"),
                            trace: e.to_string(),
                        },
                    };
                    log_outcome(name, &result);
                    apis.push(name, result);
                }
            }
        }

        apis
    }
}

async fn dispatch(
    gateway: &GatewayClient,
    session: &GatewaySession,
    hash: &str,
    template: &CallTemplate,
    subscriber: Subscriber<'_>,
) -> CallResult {
    let url = match gateway.endpoint(template.path) {
        Ok(url) => url,
        Err(e) => return CallResult::transport_failure(&e),
    };
    let body = template.render_body(&subscriber);
    let headers = template.render_headers(&subscriber);

    gateway
        .call(
            session,
            GatewayRequest {
                url: &url,
                auth_hash: hash,
                body: &body,
                extra_headers: &headers,
            },
        )
        .await
}

/// The login response object when it reports success.
///
/// Only the exact string `"0"` counts; a numeric `0` does not.
fn successful_login(result: &CallResult) -> Option<&Map<String, Value>> {
    let login = result.as_json()?.as_object()?;
    match login.get("ResponseCode") {
        Some(Value::String(code)) if code == LOGIN_SUCCESS_CODE => Some(login),
        _ => None,
    }
}

fn log_outcome(name: &str, result: &CallResult) {
    match result {
        CallResult::Json(_) => info!(call = name, "Gateway call returned JSON"),
        CallResult::NonJson { http_status, .. } => {
            warn!(call = name, http_status, "Gateway call returned a non-JSON body")
        }
        CallResult::TransportFailure { error, .. } => {
            warn!(call = name, error = %error, "Gateway call failed")
        }
    }
}
