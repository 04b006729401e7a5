// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier, job type, and job state machine.

use crate::user::UserId;
use crate::workflow::WorkflowId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

crate::define_id! {
    /// Unique identifier for one unit of tiled work.
    pub struct JobId("job-");
}

crate::define_id! {
    /// Unique identifier for an uploaded input file.
    pub struct FileId("file-");
}

/// Sentinel effective branch used when a job specifies none. Grouping by
/// this sentinel gives every workflow an implicit default serial chain.
pub const DEFAULT_BRANCH: &str = "__default__";

/// Closed set of supported tiled-analysis job kinds, each backed by its own
/// compute kernel (see `tl_adapters::kernel`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    SegmentCells,
    TissueMask,
}

crate::simple_display! {
    JobType {
        SegmentCells => "SEGMENT_CELLS",
        TissueMask => "TISSUE_MASK",
    }
}

/// Lifecycle state of a [`JobRecord`].
///
/// Transitions: `Pending -> Running -> {Succeeded, Failed}`, plus the
/// frontend-initiated `Pending -> Canceled` and the retry-initiated
/// `{Succeeded, Failed, Canceled} -> Pending`. There is no `Running ->
/// Canceled` transition: cancellation of a running job is a documented
/// non-goal, not a missing feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
}

crate::simple_display! {
    JobState {
        Pending => "PENDING",
        Running => "RUNNING",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
        Canceled => "CANCELED",
    }
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed | JobState::Canceled)
    }
}

/// Identity and state of one unit of tiled work (spec §3 `JobRecord`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: JobId,
    pub workflow_id: WorkflowId,
    pub user_id: UserId,
    pub file_id: FileId,
    pub job_type: JobType,
    /// Optional serial-group tag. `None` means the implicit default branch.
    pub branch: Option<String>,
    pub state: JobState,
    pub progress: f64,
    pub tiles_processed: u32,
    pub tiles_total: u32,
    /// Set at terminal transitions: manifest path on success, error
    /// artifact path on failure.
    pub result_path: Option<PathBuf>,
}

impl JobRecord {
    pub fn new(
        job_id: JobId,
        workflow_id: WorkflowId,
        user_id: UserId,
        file_id: FileId,
        job_type: JobType,
        branch: Option<String>,
    ) -> Self {
        Self {
            job_id,
            workflow_id,
            user_id,
            file_id,
            job_type,
            branch,
            state: JobState::Pending,
            progress: 0.0,
            tiles_processed: 0,
            tiles_total: 0,
            result_path: None,
        }
    }

    /// The `(workflow_id, effective_branch)` key the scheduler serializes on.
    pub fn effective_branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }
}

crate::builder! {
    pub struct JobRecordBuilder => JobRecord {
        set {
            job_id: JobId = JobId::new(),
            workflow_id: WorkflowId = WorkflowId::new(),
            user_id: UserId = UserId::new("test-user"),
            file_id: FileId = FileId::new(),
            job_type: JobType = JobType::TissueMask,
            state: JobState = JobState::Pending,
            progress: f64 = 0.0,
            tiles_processed: u32 = 0,
            tiles_total: u32 = 0,
        }
        option {
            branch: String = None,
            result_path: PathBuf = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
