// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process-wide authorization hash.

use std::sync::Arc;

use tokio::sync::RwLock;

/// The most recently derived authorization hash, shared by every request.
///
/// Known cross-request race: concurrent logins overwrite each other's hash
/// (last writer wins). The orchestrator hands each fan-out the hash it just
/// derived, so only the reported `xHash` of a failed login observes
/// another request's value.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    hash: Arc<RwLock<Option<String>>>,
}

impl SessionState {
    pub async fn current(&self) -> Option<String> {
        self.hash.read().await.clone()
    }

    pub async fn replace(&self, hash: String) {
        *self.hash.write().await = Some(hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_and_keeps_latest_value() {
        let state = SessionState::default();
        assert_eq!(state.current().await, None);

        state.replace("first".to_string()).await;
        state.replace("second".to_string()).await;
        assert_eq!(state.current().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn clones_share_the_slot() {
        let state = SessionState::default();
        let other = state.clone();
        other.replace("shared".to_string()).await;
        assert_eq!(state.current().await.as_deref(), Some("shared"));
    }
}
