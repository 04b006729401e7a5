// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow identifier and the derived workflow aggregation view.
//!
//! A [`WorkflowRecord`] stores only identity and ownership; state and
//! percent-complete are never stored, only derived from member jobs (spec
//! §3). That derivation lives here, as a pure function over a job slice,
//! so `tl-storage` and any future caller compute it identically.

use crate::job::{JobRecord, JobState};
use crate::user::UserId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a workflow.
    pub struct WorkflowId("wfl-");
}

/// `(workflow_id, owner, display name)` — the only state actually stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub workflow_id: WorkflowId,
    pub owner: UserId,
    pub name: String,
}

impl WorkflowRecord {
    pub fn new(owner: UserId, name: String) -> Self {
        Self { workflow_id: WorkflowId::new(), owner, name }
    }
}

/// Derived workflow state (spec §3). Canceled jobs count toward neither the
/// failed nor the succeeded branch: a workflow whose only jobs are canceled
/// reports `Pending`, never `Succeeded`. Confirmed intentional — see
/// DESIGN.md Open Question resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

crate::simple_display! {
    WorkflowState {
        Pending => "PENDING",
        Running => "RUNNING",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
    }
}

/// Derived view of a workflow: state and percent-complete computed over its
/// current member jobs, plus the owner for ownership checks at the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowInfo {
    pub workflow_id: WorkflowId,
    pub owner: UserId,
    pub state: WorkflowState,
    pub percent_complete: f64,
}

impl WorkflowInfo {
    /// Derive state and percent-complete from a consistent snapshot of the
    /// workflow's member jobs (spec §3). `jobs` must already be filtered to
    /// this workflow's id.
    pub fn derive(record: &WorkflowRecord, jobs: &[JobRecord]) -> Self {
        if jobs.is_empty() {
            return Self {
                workflow_id: record.workflow_id,
                owner: record.owner.clone(),
                state: WorkflowState::Pending,
                percent_complete: 0.0,
            };
        }

        let percent_complete = jobs.iter().map(|j| j.progress).sum::<f64>() / jobs.len() as f64;

        let state = if jobs.iter().any(|j| j.state == JobState::Failed) {
            WorkflowState::Failed
        } else if jobs.iter().all(|j| j.state == JobState::Succeeded) {
            WorkflowState::Succeeded
        } else if jobs.iter().any(|j| j.state == JobState::Running) {
            WorkflowState::Running
        } else {
            WorkflowState::Pending
        };

        Self { workflow_id: record.workflow_id, owner: record.owner.clone(), state, percent_complete }
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
