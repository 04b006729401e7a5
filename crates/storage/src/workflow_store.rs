// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe `workflow_id -> WorkflowRecord` mapping (spec §4.2).
//!
//! Only identity and ownership are stored here; `get_info` derives state and
//! percent-complete by reading a consistent snapshot of the owning
//! [`JobStore`]'s member jobs, never persisting the derived view.

use crate::job_store::JobStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use tl_core::{TlError, UserId, WorkflowId, WorkflowInfo, WorkflowRecord};

#[derive(Default)]
pub struct WorkflowStore {
    workflows: Mutex<HashMap<WorkflowId, WorkflowRecord>>,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_id: UserId, name: String) -> WorkflowRecord {
        let record = WorkflowRecord::new(user_id, name);
        tracing::debug!(workflow_id = %record.workflow_id, "workflow created");
        self.workflows.lock().insert(record.workflow_id, record.clone());
        record
    }

    pub fn get(&self, workflow_id: WorkflowId) -> Option<WorkflowRecord> {
        self.workflows.lock().get(&workflow_id).cloned()
    }

    pub fn owned_by(&self, workflow_id: WorkflowId, user_id: &UserId) -> bool {
        self.workflows
            .lock()
            .get(&workflow_id)
            .is_some_and(|w| &w.owner == user_id)
    }

    /// Performs the §3 derivation against `jobs`, reading the member jobs for
    /// this workflow in one `list_for_workflow` call so no individual job's
    /// state can be torn mid-derivation.
    pub fn get_info(&self, workflow_id: WorkflowId, jobs: &JobStore) -> Result<WorkflowInfo, TlError> {
        let record = self
            .get(workflow_id)
            .ok_or_else(|| TlError::not_found("workflow", workflow_id.to_string()))?;
        let member_jobs = jobs.list_for_workflow(workflow_id);
        Ok(WorkflowInfo::derive(&record, &member_jobs))
    }
}

#[cfg(test)]
#[path = "workflow_store_tests.rs"]
mod tests;
