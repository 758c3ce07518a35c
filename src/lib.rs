// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Retailer Relay - credential exchange for the retailer gateway
//!
//! Encrypts a device credential with the provider's RSA key, logs in to the
//! gateway, derives the authorization hash and replays a fixed battery of
//! authenticated calls, returning every result to the caller.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and dashboard (Axum)
//! - `crypto` - provider key loading and PKCS#1 v1.5 encryption
//! - `gateway` - gateway HTTP client and call results
//! - `relay` - login, hash derivation and fan-out orchestration

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod relay;
pub mod state;
