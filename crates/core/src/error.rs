// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared domain error type, returned by `tl-storage` and `tl-adapters` and
//! mapped to HTTP status codes by `tl-http`.

use thiserror::Error;

/// Errors that do not belong to any one crate: "no such entity", "wrong
/// owner", "not in the right state for this operation". Each variant maps to
/// exactly one HTTP status in `tl-http` (spec §7).
#[derive(Debug, Error)]
pub enum TlError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Raised instead of a distinct "forbidden" variant: ownership checks
    /// must be indistinguishable from not-found to the caller.
    #[error("{kind} not found: {id}")]
    NotOwned { kind: &'static str, id: String },

    #[error("{0} is not in a state that allows this operation")]
    InvalidState(&'static str),

    #[error("{0}")]
    InvalidInput(String),
}

impl TlError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn not_owned(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotOwned { kind, id: id.into() }
    }

    /// True for both `NotFound` and `NotOwned`: callers mapping to HTTP
    /// status should treat the two identically (spec's ownership-opacity
    /// rule), so this is the one predicate `tl-http` needs.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotOwned { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
