// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `FileInfo` — the wire shape for an uploaded file (spec §6
//! `POST /files/`, `GET /files/{file_id}`).

use serde::{Deserialize, Serialize};
use tl_core::{FileId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: FileId,
    pub user_id: UserId,
    pub filename: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    pub file: FileInfo,
}
