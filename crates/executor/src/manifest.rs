// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `manifest.json` / `error.json` artifact shapes written on terminal
//! transition (spec §4.4 phases 8–9, supplemented with the original's
//! `note` field per SPEC_FULL §11).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tl_core::{JobId, JobType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub job_id: JobId,
    pub job_type: JobType,
    pub source_file: PathBuf,
    pub tiles: Vec<TileCoord>,
    pub artifacts: Vec<PathBuf>,
    pub preview: PathBuf,
    pub tile_size: u32,
    pub overlap: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorArtifact {
    pub error: String,
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
