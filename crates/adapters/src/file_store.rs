// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Disk-backed upload store: streams uploaded bytes to `{base}/uploads/`
//! and hands out per-job result directories under `{base}/uploads/results/`.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tl_core::{FileId, JobId, UserId};

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("io error writing upload: {0}")]
    Io(#[from] std::io::Error),
    #[error("blocking upload write task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Metadata returned to callers; mirrors the wire `FileInfo` shape but lives
/// here so `tl-adapters` has no dependency on `tl-wire`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: FileId,
    pub user_id: UserId,
    pub filename: String,
    pub content_type: Option<String>,
}

struct FileEntry {
    user_id: UserId,
    path: PathBuf,
    content_type: Option<String>,
}

/// Upload ingestion and per-job result directory management.
///
/// One real implementation (`DiskFileStore`) is enough for this crate's
/// needs; the trait exists so `tl-executor`/`tl-http` depend on a seam
/// rather than a concrete disk layout.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    async fn save_upload(
        &self,
        user_id: UserId,
        filename: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<FileInfo, FileStoreError>;

    fn get_info(&self, file_id: FileId) -> Option<FileInfo>;

    fn owned_by(&self, file_id: FileId, user_id: &UserId) -> bool;

    fn disk_path(&self, file_id: FileId) -> Option<PathBuf>;

    /// Directory for one job's artifacts, created on first access.
    fn job_dir(&self, job_id: JobId) -> Result<PathBuf, FileStoreError>;
}

pub struct DiskFileStore {
    uploads_dir: PathBuf,
    results_dir: PathBuf,
    files: Mutex<HashMap<FileId, FileEntry>>,
}

impl DiskFileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, FileStoreError> {
        let uploads_dir = base_dir.as_ref().join("uploads");
        let results_dir = uploads_dir.join("results");
        std::fs::create_dir_all(&uploads_dir)?;
        std::fs::create_dir_all(&results_dir)?;
        Ok(Self { uploads_dir, results_dir, files: Mutex::new(HashMap::new()) })
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn save_upload(
        &self,
        user_id: UserId,
        filename: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<FileInfo, FileStoreError> {
        let file_id = FileId::new();
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let disk_name = format!("{}{ext}", file_id.as_str());
        let path = self.uploads_dir.join(&disk_name);

        let write_path = path.clone();
        tokio::task::spawn_blocking(move || std::fs::write(&write_path, &bytes)).await??;

        tracing::debug!(file_id = %file_id, %user_id, "file uploaded");
        self.files.lock().insert(
            file_id,
            FileEntry { user_id: user_id.clone(), path, content_type: content_type.clone() },
        );
        Ok(FileInfo { file_id, user_id, filename: disk_name, content_type })
    }

    fn get_info(&self, file_id: FileId) -> Option<FileInfo> {
        let files = self.files.lock();
        let entry = files.get(&file_id)?;
        Some(FileInfo {
            file_id,
            user_id: entry.user_id.clone(),
            filename: entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            content_type: entry.content_type.clone(),
        })
    }

    fn owned_by(&self, file_id: FileId, user_id: &UserId) -> bool {
        self.files.lock().get(&file_id).is_some_and(|e| &e.user_id == user_id)
    }

    fn disk_path(&self, file_id: FileId) -> Option<PathBuf> {
        self.files.lock().get(&file_id).map(|e| e.path.clone())
    }

    fn job_dir(&self, job_id: JobId) -> Result<PathBuf, FileStoreError> {
        let dir = self.results_dir.join(job_id.as_str());
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
#[path = "file_store_tests.rs"]
mod tests;
