// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `JobInfo` and the job-creation request body (spec §6 `/jobs/*`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tl_core::{FileId, JobId, JobRecord, JobState, JobType, UserId, WorkflowId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInfo {
    pub job_id: JobId,
    pub workflow_id: WorkflowId,
    pub user_id: UserId,
    pub file_id: FileId,
    pub job_type: JobType,
    pub branch: Option<String>,
    pub state: JobState,
    pub progress: f64,
    pub tiles_processed: u32,
    pub tiles_total: u32,
    pub result_path: Option<PathBuf>,
}

impl From<JobRecord> for JobInfo {
    fn from(job: JobRecord) -> Self {
        Self {
            job_id: job.job_id,
            workflow_id: job.workflow_id,
            user_id: job.user_id,
            file_id: job.file_id,
            job_type: job.job_type,
            branch: job.branch,
            state: job.state,
            progress: job.progress,
            tiles_processed: job.tiles_processed,
            tiles_total: job.tiles_total,
            result_path: job.result_path,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub workflow_id: WorkflowId,
    pub file_id: FileId,
    pub job_type: JobType,
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub job: JobInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobInfo>,
}

/// `{status: "started"}` etc — the body of the start/cancel/retry actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobActionResponse {
    pub status: &'static str,
}

impl JobActionResponse {
    pub fn started() -> Self {
        Self { status: "started" }
    }

    pub fn canceled() -> Self {
        Self { status: "canceled" }
    }

    pub fn retried() -> Self {
        Self { status: "retried" }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
