// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/workflows/*` (spec §6).

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use std::convert::Infallible;
use tl_core::{TlError, WorkflowId};
use tl_wire::{CreateWorkflowRequest, JobInfo, WorkflowInfo, WorkflowJobsResponse, WorkflowResponse};

use crate::error::ApiError;
use crate::extract::{RequireUserId, StreamUserId};
use crate::state::AppState;

fn default_workflow_name() -> String {
    "Untitled workflow".to_string()
}

pub async fn create_workflow(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    body: Option<Json<CreateWorkflowRequest>>,
) -> Json<WorkflowResponse> {
    let name = body.and_then(|b| b.0.name).unwrap_or_else(default_workflow_name);
    let record = state.workflows.create(user_id, name);
    let derived = tl_core::WorkflowInfo::derive(&record, &[]);
    Json(WorkflowResponse { workflow: WorkflowInfo::from_parts(&record, derived) })
}

fn load_owned_workflow(
    state: &AppState,
    workflow_id: WorkflowId,
    user_id: &tl_core::UserId,
) -> Result<tl_core::WorkflowRecord, ApiError> {
    let record =
        state.workflows.get(workflow_id).ok_or_else(|| TlError::not_found("workflow", workflow_id.to_string()))?;
    if &record.owner != user_id {
        return Err(TlError::not_owned("workflow", workflow_id.to_string()).into());
    }
    Ok(record)
}

pub async fn get_workflow(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(workflow_id): Path<WorkflowId>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    let record = load_owned_workflow(&state, workflow_id, &user_id)?;
    let info = state.workflows.get_info(workflow_id, &state.jobs)?;
    Ok(Json(WorkflowResponse { workflow: WorkflowInfo::from_parts(&record, info) }))
}

pub async fn list_workflow_jobs(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(workflow_id): Path<WorkflowId>,
) -> Result<Json<WorkflowJobsResponse>, ApiError> {
    load_owned_workflow(&state, workflow_id, &user_id)?;
    let jobs = state.jobs.list_for_workflow(workflow_id).into_iter().map(JobInfo::from).collect();
    Ok(Json(WorkflowJobsResponse { jobs }))
}

pub async fn workflow_events(
    State(state): State<AppState>,
    StreamUserId(user_id): StreamUserId,
    Path(workflow_id): Path<WorkflowId>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    load_owned_workflow(&state, workflow_id, &user_id)?;
    let rx = tl_scheduler::subscribe_workflow(state.jobs.clone(), state.workflows.clone(), workflow_id);
    let stream = tokio_stream::wrappers::ReceiverStream::new(rx).map(|payload| {
        let data = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
        Ok(Event::default().event("message").data(data))
    });
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
#[path = "workflows_tests.rs"]
mod tests;
