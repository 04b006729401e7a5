// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps domain and transport errors to HTTP status codes and JSON bodies
//! (spec §7). Ownership failures and missing entities are both mapped to
//! 404 — never 403 — per the ownership-opacity rule in spec §3.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tl_core::TlError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] TlError),

    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("failed to read upload: {0}")]
    Upload(String),

    #[error("failed to build artifact zip: {0}")]
    Zip(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Domain(TlError::NotFound { .. } | TlError::NotOwned { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(TlError::InvalidState(_)) => StatusCode::CONFLICT,
            ApiError::Domain(TlError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::MissingHeader(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Upload(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Zip(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
