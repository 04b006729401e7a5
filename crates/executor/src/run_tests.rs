// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use image::RgbImage;
use tempfile::tempdir;
use tl_adapters::DiskFileStore;
use tl_core::{FileId, JobType, UserId, WorkflowId};

fn write_test_image(files: &DiskFileStore, file_id: FileId) {
    let img = RgbImage::from_pixel(40, 30, image::Rgb([200, 50, 50]));
    let path = files.disk_path(file_id);
    // save_upload already created the path entry; write real bytes over it
    if let Some(path) = path {
        img.save(path).unwrap();
    }
}

#[tokio::test]
async fn successful_run_produces_manifest_and_succeeds() {
    let dir = tempdir().unwrap();
    let files = Arc::new(DiskFileStore::new(dir.path()).unwrap());
    let jobs = Arc::new(JobStore::new());
    let user = UserId::new("u1");

    let info = files
        .save_upload(user.clone(), "slide.png", Some("image/png".into()), vec![])
        .await
        .unwrap();
    write_test_image(&files, info.file_id);

    let job = jobs.create(WorkflowId::new(), None, user, info.file_id, JobType::TissueMask);
    let kernel: Arc<dyn ComputeKernel> = Arc::new(FallbackKernel);

    run_job(job.job_id, jobs.clone(), files.clone(), kernel, ExecutorConfig { tile_size: 16, tile_overlap: 2 }).await;

    let finished = jobs.get(job.job_id).unwrap();
    assert_eq!(finished.state, JobState::Succeeded);
    assert_eq!(finished.tiles_processed, finished.tiles_total);
    let manifest_path = finished.result_path.unwrap();
    assert!(manifest_path.ends_with("manifest.json"));
    let manifest: Manifest = serde_json::from_slice(&std::fs::read(manifest_path).unwrap()).unwrap();
    assert!(!manifest.artifacts.is_empty());
    assert!(manifest.preview.ends_with("preview.png"));
}

#[tokio::test]
async fn missing_source_file_fails_the_job_with_an_error_artifact() {
    let dir = tempdir().unwrap();
    let files = Arc::new(DiskFileStore::new(dir.path()).unwrap());
    let jobs = Arc::new(JobStore::new());
    let user = UserId::new("u1");

    // file_id that was never uploaded: disk_path() returns None
    let job = jobs.create(WorkflowId::new(), None, user, FileId::new(), JobType::TissueMask);
    let kernel: Arc<dyn ComputeKernel> = Arc::new(FallbackKernel);

    run_job(job.job_id, jobs.clone(), files.clone(), kernel, ExecutorConfig { tile_size: 16, tile_overlap: 2 }).await;

    let finished = jobs.get(job.job_id).unwrap();
    assert_eq!(finished.state, JobState::Failed);
}

#[tokio::test]
async fn progress_is_monotonic_across_tiles() {
    let dir = tempdir().unwrap();
    let files = Arc::new(DiskFileStore::new(dir.path()).unwrap());
    let jobs = Arc::new(JobStore::new());
    let user = UserId::new("u1");

    let info = files.save_upload(user.clone(), "slide.png", None, vec![]).await.unwrap();
    write_test_image(&files, info.file_id);
    let job = jobs.create(WorkflowId::new(), None, user, info.file_id, JobType::SegmentCells);
    let kernel: Arc<dyn ComputeKernel> = Arc::new(FallbackKernel);

    run_job(job.job_id, jobs.clone(), files, kernel, ExecutorConfig { tile_size: 8, tile_overlap: 0 }).await;

    let finished = jobs.get(job.job_id).unwrap();
    assert_eq!(finished.progress, 1.0);
}
