// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for building an [`AppState`] over a temp directory.

use std::path::Path;
use std::sync::Arc;
use tl_adapters::{DiskFileStore, FallbackKernel};
use tl_executor::ExecutorConfig;
use tl_scheduler::{Scheduler, SchedulerConfig};
use tl_storage::{JobStore, WorkflowStore};

use crate::state::AppState;

pub fn make_app_state(base: &Path, max_workers: usize, max_active_users: usize) -> AppState {
    let jobs = Arc::new(JobStore::new());
    let workflows = Arc::new(WorkflowStore::new());
    let files = Arc::new(DiskFileStore::new(base).expect("disk file store"));
    let kernel: Arc<dyn tl_adapters::ComputeKernel> = Arc::new(FallbackKernel);
    let scheduler = Scheduler::new(
        jobs.clone(),
        files.clone(),
        kernel,
        SchedulerConfig {
            max_workers,
            max_active_users,
            executor: ExecutorConfig { tile_size: 8, tile_overlap: 0 },
        },
    );
    AppState { jobs, workflows, files, scheduler }
}

pub async fn upload_tiny_image(state: &AppState, user: &tl_core::UserId) -> tl_core::FileId {
    let info = state
        .files
        .save_upload(user.clone(), "slide.png", Some("image/png".to_string()), Vec::new())
        .await
        .expect("save upload placeholder");
    let path = state.files.disk_path(info.file_id).expect("disk path");
    let img = image::RgbImage::from_pixel(16, 16, image::Rgb([10, 200, 10]));
    img.save(path).expect("write tiny test image");
    info.file_id
}
