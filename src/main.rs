// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum_server::Handle;
use tracing::{error, info, warn};

use retailer_relay::{
    api::router,
    config::RelayConfig,
    crypto::{load_public_key, Encryptor},
    gateway::GatewayClient,
    logging,
    relay::{Relay, SessionState},
    state::AppState,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init(&config);

    if config.credentials.client_id.is_empty() || config.credentials.client_secret.is_empty() {
        warn!("IBM_CLIENT_ID or IBM_CLIENT_SECRET is not set; gateway calls will be rejected");
    }

    // The service must not accept requests without the provider key.
    let key = match load_public_key(&config.public_key_path) {
        Ok(key) => key,
        Err(e) => {
            error!(error = %e, "Failed to load provider public key");
            std::process::exit(1);
        }
    };

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid bind address");
            std::process::exit(1);
        }
    };

    info!(
        gateway = %config.gateway_base_url,
        channel = %config.credentials.channel,
        timeout_secs = config.gateway_timeout.map(|d| d.as_secs()),
        fanout = ?config.fanout_mode,
        debug = config.debug,
        "Relay configured"
    );

    let relay = Relay::new(
        Encryptor::new(Arc::new(key)),
        GatewayClient::from_config(&config),
        SessionState::default(),
        config.fanout_mode,
    );
    let app = router(AppState::new(relay));

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    info!(%addr, "Retailer relay listening (dashboard at /, docs at /docs)");

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        error!(error = %e, "HTTP server failed");
        std::process::exit(1);
    }
}

async fn shutdown_on_ctrl_c(handle: Handle<SocketAddr>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    }
}
