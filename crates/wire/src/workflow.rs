// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `WorkflowInfo` — the derived view of a workflow plus its stored identity
//! (spec §3, §6 `/workflows/*`). Unlike `tl_core::WorkflowInfo`, which
//! derives only state and percent-complete from member jobs, this wire type
//! also carries the stored `name` so a single REST response has everything
//! a client needs.

use serde::{Deserialize, Serialize};
use tl_core::{UserId, WorkflowId, WorkflowRecord, WorkflowState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowInfo {
    pub workflow_id: WorkflowId,
    pub owner: UserId,
    pub name: String,
    pub state: WorkflowState,
    pub percent_complete: f64,
}

impl WorkflowInfo {
    pub fn from_parts(record: &WorkflowRecord, derived: tl_core::WorkflowInfo) -> Self {
        Self {
            workflow_id: record.workflow_id,
            owner: record.owner.clone(),
            name: record.name.clone(),
            state: derived.state,
            percent_complete: derived.percent_complete,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateWorkflowRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub workflow: WorkflowInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJobsResponse {
    pub jobs: Vec<crate::job::JobInfo>,
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
