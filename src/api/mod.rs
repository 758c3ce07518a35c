// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{AggregateResponse, EncryptRequest},
    state::AppState,
};

pub mod dashboard;
pub mod encrypt;
pub mod health;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/health", get(health::health))
        .route("/api/encrypt", post(encrypt::encrypt))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer())
}

/// Any origin may call the relay; the gateway identity headers are allowed
/// so browser tooling can replay calls.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static("x-hash-value"),
            HeaderName::from_static("x-ibm-client-id"),
            HeaderName::from_static("x-ibm-client-secret"),
            HeaderName::from_static("x-channel"),
        ])
}

#[derive(OpenApi)]
#[openapi(
    paths(encrypt::encrypt, health::health),
    components(
        schemas(
            EncryptRequest,
            AggregateResponse,
            health::HealthResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Relay", description = "Credential exchange and gateway fan-out"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;
