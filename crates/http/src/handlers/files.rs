// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /files/`, `GET /files/{file_id}` (spec §6).

use axum::extract::{Multipart, Path, State};
use axum::Json;
use tl_core::{FileId, TlError};
use tl_wire::{FileInfo, FileResponse};

use crate::error::ApiError;
use crate::extract::RequireUserId;
use crate::state::AppState;

pub async fn upload_file(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::Upload(e.to_string()))? {
        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| ApiError::Upload(e.to_string()))?;

        let info = state
            .files
            .save_upload(user_id, filename.as_str(), content_type, bytes.to_vec())
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        return Ok(Json(FileResponse {
            file: FileInfo {
                file_id: info.file_id,
                user_id: info.user_id,
                filename: info.filename,
                content_type: info.content_type,
            },
        }));
    }

    Err(ApiError::Upload("multipart body had no fields".to_string()))
}

pub async fn get_file(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(file_id): Path<FileId>,
) -> Result<Json<FileResponse>, ApiError> {
    let info = state.files.get_info(file_id).ok_or_else(|| TlError::not_found("file", file_id.to_string()))?;
    if info.user_id != user_id {
        return Err(TlError::not_owned("file", file_id.to_string()).into());
    }
    Ok(Json(FileResponse {
        file: FileInfo {
            file_id: info.file_id,
            user_id: info.user_id,
            filename: info.filename,
            content_type: info.content_type,
        },
    }))
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
