// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`RelayConfig`] loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `IBM_CLIENT_ID` | Gateway client identifier header | empty |
//! | `IBM_CLIENT_SECRET` | Gateway client secret header | empty |
//! | `X_CHANNEL` | Gateway channel header | `retailergateway` |
//! | `PUBLIC_KEY_PATH` | Provider RSA public key (PEM) | `retailergateway.pem` |
//! | `GATEWAY_BASE_URL` | Base URL for all gateway endpoints | provider dev catalog |
//! | `GATEWAY_TIMEOUT_SECS` | Per-call deadline, unset or `0` disables it | unset |
//! | `FANOUT_MODE` | `sequential` or `concurrent` | `sequential` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5020` |
//! | `RELAY_DEBUG` | Debug logging by default | `true` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | derived from `RELAY_DEBUG` |

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use url::Url;

pub const CLIENT_ID_ENV: &str = "IBM_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "IBM_CLIENT_SECRET";
pub const CHANNEL_ENV: &str = "X_CHANNEL";
pub const PUBLIC_KEY_PATH_ENV: &str = "PUBLIC_KEY_PATH";
pub const GATEWAY_BASE_URL_ENV: &str = "GATEWAY_BASE_URL";
pub const GATEWAY_TIMEOUT_ENV: &str = "GATEWAY_TIMEOUT_SECS";
pub const FANOUT_MODE_ENV: &str = "FANOUT_MODE";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DEBUG_ENV: &str = "RELAY_DEBUG";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_CHANNEL: &str = "retailergateway";
pub const DEFAULT_PUBLIC_KEY_PATH: &str = "retailergateway.pem";
pub const DEFAULT_GATEWAY_BASE_URL: &str =
    "https://rgw.8798-f464fa20.eu-de.ri1.apiconnect.appdomain.cloud/tmfb/dev-catalog/";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5020;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

/// How the post-login battery is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanOutMode {
    /// One call after another, in battery order.
    #[default]
    Sequential,
    /// Every call spawned at once; results are reassembled in battery order.
    Concurrent,
}

impl FromStr for FanOutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(format!("expected `sequential` or `concurrent`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("expected `json` or `pretty`, got `{other}`")),
        }
    }
}

/// Identity headers attached to every gateway call.
#[derive(Debug, Clone, Default)]
pub struct GatewayCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub channel: String,
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub credentials: GatewayCredentials,
    pub public_key_path: PathBuf,
    /// Always ends with `/` so endpoint paths join underneath it.
    pub gateway_base_url: Url,
    /// `None` keeps the legacy behaviour of waiting indefinitely.
    pub gateway_timeout: Option<Duration>,
    pub fanout_mode: FanOutMode,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub log_format: LogFormat,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let credentials = GatewayCredentials {
            client_id: get(CLIENT_ID_ENV).unwrap_or_default(),
            client_secret: get(CLIENT_SECRET_ENV).unwrap_or_default(),
            channel: get(CHANNEL_ENV).unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
        };

        let public_key_path = PathBuf::from(
            get(PUBLIC_KEY_PATH_ENV).unwrap_or_else(|| DEFAULT_PUBLIC_KEY_PATH.to_string()),
        );

        let raw_base =
            get(GATEWAY_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_GATEWAY_BASE_URL.to_string());
        let gateway_base_url = parse_base_url(&raw_base)?;

        let gateway_timeout = match get(GATEWAY_TIMEOUT_ENV) {
            None => None,
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|e| ConfigError::invalid(GATEWAY_TIMEOUT_ENV, format!("{e}")))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let fanout_mode = match get(FANOUT_MODE_ENV) {
            None => FanOutMode::default(),
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ConfigError::invalid(FANOUT_MODE_ENV, e))?,
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(PORT_ENV, format!("{e}")))?,
        };

        let debug = get(DEBUG_ENV)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        let log_format = match get(LOG_FORMAT_ENV) {
            None => LogFormat::default(),
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ConfigError::invalid(LOG_FORMAT_ENV, e))?,
        };

        Ok(Self {
            credentials,
            public_key_path,
            gateway_base_url,
            gateway_timeout,
            fanout_mode,
            host,
            port,
            debug,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::invalid(HOST_ENV, format!("{e}")))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::invalid(GATEWAY_BASE_URL_ENV, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid(
            GATEWAY_BASE_URL_ENV,
            "URL cannot be used as a base",
        ));
    }
    Ok(url)
}
