// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/jobs/*` (spec §6): creation, lifecycle actions, result retrieval, and
//! the per-job event stream and queue-status introspection.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use std::convert::Infallible;
use std::io::Write as _;
use tl_core::{JobId, JobRecord, JobState, TlError, UserId};
use tl_executor::Manifest;
use tl_scheduler::QueueStatus;
use tl_wire::{CreateJobRequest, JobActionResponse, JobInfo, JobListResponse, JobResponse};

use crate::error::ApiError;
use crate::extract::{RequireUserId, StreamUserId};
use crate::state::AppState;

fn load_owned_job(state: &AppState, job_id: JobId, user_id: &UserId) -> Result<JobRecord, ApiError> {
    let record = state.jobs.get(job_id).ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
    if &record.user_id != user_id {
        return Err(TlError::not_owned("job", job_id.to_string()).into());
    }
    Ok(record)
}

pub async fn create_job(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Json(body): Json<CreateJobRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    let workflow = state
        .workflows
        .get(body.workflow_id)
        .ok_or_else(|| TlError::not_found("workflow", body.workflow_id.to_string()))?;
    if workflow.owner != user_id {
        return Err(TlError::not_owned("workflow", body.workflow_id.to_string()).into());
    }

    let file = state.files.get_info(body.file_id).ok_or_else(|| TlError::not_found("file", body.file_id.to_string()))?;
    if file.user_id != user_id {
        return Err(TlError::not_owned("file", body.file_id.to_string()).into());
    }

    let record = state.jobs.create(body.workflow_id, body.branch, user_id, body.file_id, body.job_type);
    Ok(Json(JobResponse { job: JobInfo::from(record) }))
}

pub async fn list_jobs(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
) -> Json<JobListResponse> {
    let jobs = state.jobs.list_for_user(&user_id).into_iter().map(JobInfo::from).collect();
    Json(JobListResponse { jobs })
}

pub async fn get_job(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<Json<JobResponse>, ApiError> {
    let record = load_owned_job(&state, job_id, &user_id)?;
    Ok(Json(JobResponse { job: JobInfo::from(record) }))
}

pub async fn start_job(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<Json<JobActionResponse>, ApiError> {
    let record = load_owned_job(&state, job_id, &user_id)?;
    if record.state != JobState::Pending {
        return Err(TlError::InvalidState("job is not PENDING").into());
    }
    state.scheduler.enqueue(job_id);
    Ok(Json(JobActionResponse::started()))
}

pub async fn cancel_job(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<Json<JobActionResponse>, ApiError> {
    let record = load_owned_job(&state, job_id, &user_id)?;
    if record.state != JobState::Pending {
        return Err(TlError::InvalidState("job is not PENDING").into());
    }
    state.jobs.cancel_if_pending(job_id)?;
    Ok(Json(JobActionResponse::canceled()))
}

pub async fn retry_job(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<Json<JobActionResponse>, ApiError> {
    load_owned_job(&state, job_id, &user_id)?;
    state.jobs.reset_for_retry(job_id)?;
    Ok(Json(JobActionResponse::retried()))
}

async fn read_manifest(record: &JobRecord) -> Result<Manifest, ApiError> {
    let path = record
        .result_path
        .clone()
        .filter(|_| record.state == JobState::Succeeded)
        .ok_or_else(|| TlError::not_found("result", record.job_id.to_string()))?;
    let bytes = tokio::fs::read(&path).await.map_err(ApiError::Io)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

pub async fn get_result(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, ApiError> {
    let record = load_owned_job(&state, job_id, &user_id)?;
    if record.state != JobState::Succeeded {
        return Err(TlError::not_found("result", job_id.to_string()).into());
    }
    let path = record.result_path.ok_or_else(|| TlError::not_found("result", job_id.to_string()))?;
    let bytes = tokio::fs::read(&path).await.map_err(ApiError::Io)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], bytes))
}

pub async fn get_preview(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, ApiError> {
    let record = load_owned_job(&state, job_id, &user_id)?;
    let manifest = read_manifest(&record).await?;
    let bytes = tokio::fs::read(&manifest.preview).await.map_err(ApiError::Io)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], bytes))
}

pub async fn get_artifacts_zip(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, ApiError> {
    let record = load_owned_job(&state, job_id, &user_id)?;
    let manifest = read_manifest(&record).await?;
    let job_dir = state.files.job_dir(job_id).map_err(|e| ApiError::Zip(e.to_string()))?;

    let bytes = tokio::task::spawn_blocking(move || build_artifacts_zip(&job_dir, &manifest))
        .await
        .map_err(|e| ApiError::Zip(e.to_string()))?
        .map_err(|e| ApiError::Zip(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/zip")],
        bytes,
    ))
}

fn build_artifacts_zip(job_dir: &std::path::Path, manifest: &Manifest) -> Result<Vec<u8>, std::io::Error> {
    let zip_path = job_dir.join("artifacts.zip");
    let file = std::fs::File::create(&zip_path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let paths = manifest.artifacts.iter().chain(std::iter::once(&manifest.preview));
    for path in paths {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("artifact").to_string();
        let contents = std::fs::read(path)?;
        writer.start_file(name, options).map_err(std::io::Error::other)?;
        writer.write_all(&contents)?;
    }
    writer.finish().map_err(std::io::Error::other)?;
    std::fs::read(&zip_path)
}

pub async fn job_events(
    State(state): State<AppState>,
    StreamUserId(user_id): StreamUserId,
    Path(job_id): Path<JobId>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    load_owned_job(&state, job_id, &user_id)?;
    let rx = tl_scheduler::subscribe_job(state.jobs.clone(), job_id);
    let stream = tokio_stream::wrappers::ReceiverStream::new(rx).map(|payload| {
        let data = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
        Ok(Event::default().event("message").data(data))
    });
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub async fn queue_status(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(job_id): Path<JobId>,
) -> Result<Json<QueueStatus>, ApiError> {
    load_owned_job(&state, job_id, &user_id)?;
    let status = state.scheduler.queue_status(job_id).ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
    Ok(Json(status))
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
