// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Executor.run(job_id)` (spec §4.4): the end-to-end tile pipeline for one
//! job, from `RUNNING` to a terminal state and an artifact on disk.

use crate::manifest::{ErrorArtifact, Manifest, TileCoord};
use crate::preview::{build_preview, overlay_color};
use crate::tiling::enumerate_tiles;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tl_adapters::{ComputeKernel, FallbackKernel, FileStore, GeneralDecoderSource, TileSource};
use tl_core::{JobId, JobState};
use tl_storage::JobStore;

#[derive(Debug, Error)]
enum RunError {
    #[error("job {0} disappeared mid-run")]
    JobVanished(JobId),
    #[error("source file missing for job {0}")]
    NoSourceFile(JobId),
    #[error("failed to decode source image: {0}")]
    Decode(#[from] tl_adapters::file_store::FileStoreError),
    #[error("failed to decode source image: {0}")]
    TileSource(#[from] tl_adapters::tile_source::TileSourceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("kernel error: {0}")]
    Kernel(#[from] tl_adapters::kernel::KernelError),
    #[error("blocking task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    pub tile_size: u32,
    pub tile_overlap: u32,
}

/// Runs a job to completion, handling its own terminal-state bookkeeping:
/// callers never need to inspect the `Result`, only observe the resulting
/// `JobState` through `jobs`.
pub async fn run_job(
    job_id: JobId,
    jobs: Arc<JobStore>,
    files: Arc<dyn FileStore>,
    kernel: Arc<dyn ComputeKernel>,
    config: ExecutorConfig,
) {
    jobs.update_state(job_id, JobState::Running).ok();

    match try_run(job_id, &jobs, files.as_ref(), kernel, config).await {
        Ok(manifest_path) => {
            jobs.set_result_path(job_id, manifest_path).ok();
            jobs.update_state(job_id, JobState::Succeeded).ok();
        }
        Err(err) => {
            tracing::warn!(%job_id, error = %err, "job failed");
            if let Ok(job_dir) = files.job_dir(job_id) {
                let artifact = ErrorArtifact { error: err.to_string() };
                let error_path = job_dir.join("error.json");
                if std::fs::write(&error_path, serde_json::to_vec(&artifact).unwrap_or_default()).is_ok() {
                    jobs.set_result_path(job_id, error_path).ok();
                }
            }
            jobs.update_state(job_id, JobState::Failed).ok();
        }
    }
}

async fn try_run(
    job_id: JobId,
    jobs: &JobStore,
    files: &dyn FileStore,
    kernel: Arc<dyn ComputeKernel>,
    config: ExecutorConfig,
) -> Result<PathBuf, RunError> {
    let job = jobs.get(job_id).ok_or(RunError::JobVanished(job_id))?;
    let src_path = files.disk_path(job.file_id).ok_or(RunError::NoSourceFile(job_id))?;
    let job_dir = files.job_dir(job_id)?;

    let source = {
        let path = src_path.clone();
        tokio::task::spawn_blocking(move || GeneralDecoderSource::open(path)).await??
    };
    let source = Arc::new(source);
    let (width, height) = (source.width(), source.height());
    let tiles = enumerate_tiles(width, height, config.tile_size, config.tile_overlap);
    let total = tiles.len() as u32;

    let mut tile_coords = Vec::with_capacity(tiles.len());
    let mut artifacts = Vec::with_capacity(tiles.len());
    let mut used_fallback = false;

    for (processed, tile) in tiles.iter().enumerate() {
        let tile = *tile;
        let source = source.clone();
        let kernel = kernel.clone();
        let job_dir = job_dir.clone();
        let job_type = job.job_type;

        // Region read and kernel invocation are CPU-bound; offload to the
        // blocking pool so the cooperative scheduler never stalls on them
        // (spec §5).
        let (mask_path, fell_back) = tokio::task::spawn_blocking(move || {
            let region = source.read_region(tile.x, tile.y, tile.w, tile.h);
            let (output, fell_back) = match kernel.run(job_type, &region.image) {
                Ok(output) => (output, false),
                Err(_) => (FallbackKernel.run(job_type, &region.image)?, true),
            };
            let mask_path = job_dir.join(format!("mask_{}_{}.png", tile.x, tile.y));
            output.mask.save(&mask_path).map_err(|e| RunError::Io(std::io::Error::other(e)))?;
            Ok::<_, RunError>((mask_path, fell_back))
        })
        .await??;

        used_fallback |= fell_back;
        artifacts.push(mask_path);
        tile_coords.push(TileCoord { x: tile.x, y: tile.y });

        let processed = processed as u32 + 1;
        jobs.set_progress(job_id, processed as f64 / total.max(1) as f64, processed, total).ok();
    }

    let color = overlay_color(job.job_type);
    let job_dir_for_preview = job_dir.clone();
    let tiles_for_preview = tiles.clone();
    let preview_path = tokio::task::spawn_blocking(move || {
        build_preview(&job_dir_for_preview, width, height, &tiles_for_preview, color)
    })
    .await??;

    let manifest = Manifest {
        job_id,
        job_type: job.job_type,
        source_file: src_path,
        tiles: tile_coords,
        artifacts,
        preview: preview_path,
        tile_size: config.tile_size,
        overlap: config.tile_overlap,
        note: used_fallback.then(|| fallback_note(job.job_type)),
    };

    let manifest_path = job_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest)?)?;
    Ok(manifest_path)
}

fn fallback_note(_job_type: tl_core::JobType) -> String {
    "fallback: mean-threshold mask".to_string()
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
