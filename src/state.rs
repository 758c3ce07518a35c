// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::relay::Relay;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}
