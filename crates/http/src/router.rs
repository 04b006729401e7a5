// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route table for the HTTP surface (spec §6).

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{files, jobs, workflows};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/files/", post(files::upload_file))
        .route("/files/:file_id", get(files::get_file))
        .route("/workflows/", post(workflows::create_workflow))
        .route("/workflows/:workflow_id", get(workflows::get_workflow))
        .route("/workflows/:workflow_id/jobs", get(workflows::list_workflow_jobs))
        .route("/workflows/:workflow_id/events", get(workflows::workflow_events))
        .route("/jobs/", post(jobs::create_job).get(jobs::list_jobs))
        .route("/jobs/:job_id", get(jobs::get_job))
        .route("/jobs/:job_id/start", post(jobs::start_job))
        .route("/jobs/:job_id/cancel", post(jobs::cancel_job))
        .route("/jobs/:job_id/retry", post(jobs::retry_job))
        .route("/jobs/:job_id/result", get(jobs::get_result))
        .route("/jobs/:job_id/preview", get(jobs::get_preview))
        .route("/jobs/:job_id/artifacts.zip", get(jobs::get_artifacts_zip))
        .route("/jobs/:job_id/events", get(jobs::job_events))
        .route("/jobs/:job_id/queue_status", get(jobs::queue_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
