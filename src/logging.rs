// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, RelayConfig};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "retailer_relay=debug,tower_http=info,info"
    } else {
        "retailer_relay=info,tower_http=info,warn"
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init(config: &RelayConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.debug)));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse() {
        for debug in [true, false] {
            assert!(EnvFilter::try_new(default_filter(debug)).is_ok());
        }
    }

    #[test]
    fn debug_raises_only_relay_verbosity() {
        assert!(default_filter(true).contains("retailer_relay=debug"));
        for debug in [true, false] {
            assert!(default_filter(debug).contains("tower_http=info"));
        }
    }
}
