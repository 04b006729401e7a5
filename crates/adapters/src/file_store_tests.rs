// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn save_upload_writes_bytes_and_records_owner() {
    let dir = tempdir().unwrap();
    let store = DiskFileStore::new(dir.path()).unwrap();
    let user = UserId::new("u1");

    let info = store
        .save_upload(user.clone(), "slide.tiff", Some("image/tiff".into()), vec![1, 2, 3])
        .await
        .unwrap();

    assert!(store.owned_by(info.file_id, &user));
    assert!(!store.owned_by(info.file_id, &UserId::new("other")));

    let path = store.disk_path(info.file_id).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn unknown_file_id_has_no_info() {
    let dir = tempdir().unwrap();
    let store = DiskFileStore::new(dir.path()).unwrap();
    assert!(store.get_info(FileId::new()).is_none());
}

#[tokio::test]
async fn job_dir_is_created_on_first_access() {
    let dir = tempdir().unwrap();
    let store = DiskFileStore::new(dir.path()).unwrap();
    let job_id = JobId::new();
    let path = store.job_dir(job_id).unwrap();
    assert!(path.is_dir());
}
