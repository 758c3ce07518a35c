// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Operator dashboard served at `/`.

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../../static/index.html");

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
