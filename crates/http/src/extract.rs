// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `X-User-ID` extraction (spec §6): required as a header on every
//! non-stream endpoint, accepted as a query parameter on the two
//! `text/event-stream` endpoints because EventSource clients cannot set
//! custom headers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use tl_core::UserId;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "X-User-ID";

/// Extracts the caller's `user_id` from the `X-User-ID` header. 400 if
/// absent (spec §6).
pub struct RequireUserId(pub UserId);

impl<S> FromRequestParts<S> for RequireUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(ApiError::MissingHeader(USER_ID_HEADER))?;
        let value = value.to_str().map_err(|_| ApiError::MissingHeader(USER_ID_HEADER))?;
        Ok(Self(UserId::new(value)))
    }
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

/// Extracts `user_id` from the query string for stream endpoints.
pub struct StreamUserId(pub UserId);

impl<S> FromRequestParts<S> for StreamUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(q) = Query::<UserIdQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingHeader("user_id"))?;
        Ok(Self(UserId::new(q.user_id)))
    }
}
