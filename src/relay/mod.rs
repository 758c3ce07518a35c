// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential exchange and post-login call relay.
//!
//! - `identity` - credential validation and derived subscriber values
//! - `templates` - the fixed call battery as data
//! - `session` - process-wide authorization hash
//! - `orchestrator` - login, hash derivation and fan-out

pub mod identity;
pub mod orchestrator;
pub mod session;
pub mod templates;

pub use identity::{Credentials, ValidationError};
pub use orchestrator::{Relay, RelayError};
pub use session::SessionState;
