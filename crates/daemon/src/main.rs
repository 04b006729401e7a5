// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tissuelabd`: the tiled-image job scheduler process.

use std::net::SocketAddr;
use std::sync::Arc;
use tl_adapters::{DiskFileStore, FallbackKernel};
use tl_daemon::Config;
use tl_executor::ExecutorConfig;
use tl_http::{build_router, AppState};
use tl_scheduler::{Scheduler, SchedulerConfig};
use tl_storage::{JobStore, WorkflowStore};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "tissuelabd=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        max_workers = config.max_workers,
        max_active_users = config.max_active_users,
        tile_size = config.tile_size,
        tile_overlap = config.tile_overlap,
        upload_dir = %config.upload_dir.display(),
        "starting tissuelabd"
    );

    if config.enable_real_kernel {
        tracing::warn!("TL_ENABLE_REAL_KERNEL is set but no real kernel is wired in; falling back to FallbackKernel");
    }

    let jobs = Arc::new(JobStore::new());
    let workflows = Arc::new(WorkflowStore::new());
    let files = Arc::new(DiskFileStore::new(&config.upload_dir)?);
    let kernel: Arc<dyn tl_adapters::ComputeKernel> = Arc::new(FallbackKernel);

    let scheduler = Scheduler::new(
        jobs.clone(),
        files.clone(),
        kernel,
        SchedulerConfig {
            max_workers: config.max_workers,
            max_active_users: config.max_active_users,
            executor: ExecutorConfig { tile_size: config.tile_size, tile_overlap: config.tile_overlap },
        },
    );

    let state = AppState { jobs, workflows, files, scheduler };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
