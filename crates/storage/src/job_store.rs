// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe `job_id -> JobRecord` mapping (spec §4.1).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use tl_core::{FileId, JobId, JobRecord, JobState, JobType, TlError, UserId, WorkflowId};

#[derive(Default)]
pub struct JobStore {
    jobs: Mutex<HashMap<JobId, JobRecord>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh id, inserts in `PENDING` with zeroed progress.
    pub fn create(
        &self,
        workflow_id: WorkflowId,
        branch: Option<String>,
        user_id: UserId,
        file_id: FileId,
        job_type: JobType,
    ) -> JobRecord {
        let record = JobRecord::new(JobId::new(), workflow_id, user_id, file_id, job_type, branch);
        tracing::debug!(job_id = %record.job_id, workflow_id = %record.workflow_id, "job created");
        self.jobs.lock().insert(record.job_id, record.clone());
        record
    }

    /// Snapshot read: the returned record cannot alias the store's internal state.
    pub fn get(&self, job_id: JobId) -> Option<JobRecord> {
        self.jobs.lock().get(&job_id).cloned()
    }

    pub fn list_for_user(&self, user_id: &UserId) -> Vec<JobRecord> {
        self.jobs
            .lock()
            .values()
            .filter(|j| &j.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn list_for_workflow(&self, workflow_id: WorkflowId) -> Vec<JobRecord> {
        self.jobs
            .lock()
            .values()
            .filter(|j| j.workflow_id == workflow_id)
            .cloned()
            .collect()
    }

    /// Used by the scheduler's queue-status introspection.
    pub fn list_all(&self) -> Vec<JobRecord> {
        self.jobs.lock().values().cloned().collect()
    }

    pub fn update_state(&self, job_id: JobId, new_state: JobState) -> Result<JobRecord, TlError> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(&job_id)
            .ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
        job.state = new_state;
        tracing::debug!(job_id = %job_id, state = %new_state, "job state updated");
        Ok(job.clone())
    }

    pub fn set_progress(
        &self,
        job_id: JobId,
        progress: f64,
        tiles_processed: u32,
        tiles_total: u32,
    ) -> Result<JobRecord, TlError> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(&job_id)
            .ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
        job.progress = progress;
        job.tiles_processed = tiles_processed;
        job.tiles_total = tiles_total;
        Ok(job.clone())
    }

    pub fn set_result_path(&self, job_id: JobId, path: PathBuf) -> Result<JobRecord, TlError> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(&job_id)
            .ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
        job.result_path = Some(path);
        Ok(job.clone())
    }

    /// Sets `CANCELED` iff the job is currently `PENDING`; otherwise a no-op.
    /// Returns the resulting record either way.
    pub fn cancel_if_pending(&self, job_id: JobId) -> Result<JobRecord, TlError> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(&job_id)
            .ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
        if job.state == JobState::Pending {
            job.state = JobState::Canceled;
            tracing::info!(job_id = %job_id, "job canceled");
        }
        Ok(job.clone())
    }

    /// Clears progress and result, sets `PENDING`, preserves tile totals.
    /// Fails with `InvalidState` if the job is currently `RUNNING`.
    pub fn reset_for_retry(&self, job_id: JobId) -> Result<JobRecord, TlError> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(&job_id)
            .ok_or_else(|| TlError::not_found("job", job_id.to_string()))?;
        if job.state == JobState::Running {
            return Err(TlError::InvalidState("job is currently running"));
        }
        job.state = JobState::Pending;
        job.progress = 0.0;
        job.tiles_processed = 0;
        job.result_path = None;
        tracing::info!(job_id = %job_id, "job reset for retry");
        Ok(job.clone())
    }
}

#[cfg(test)]
#[path = "job_store_tests.rs"]
mod tests;
