// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tl_core::{FileId, JobState, JobType};

#[test]
fn owned_by_distinguishes_owner_from_other_users() {
    let store = WorkflowStore::new();
    let owner = UserId::new("u1");
    let record = store.create(owner.clone(), "wf".into());
    assert!(store.owned_by(record.workflow_id, &owner));
    assert!(!store.owned_by(record.workflow_id, &UserId::new("u2")));
}

#[test]
fn get_info_on_unknown_workflow_is_not_found() {
    let store = WorkflowStore::new();
    let jobs = JobStore::new();
    let err = store.get_info(WorkflowId::new(), &jobs).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn get_info_derives_from_current_member_jobs() {
    let wf_store = WorkflowStore::new();
    let job_store = JobStore::new();
    let owner = UserId::new("u1");
    let wf = wf_store.create(owner.clone(), "wf".into());

    let job = job_store.create(wf.workflow_id, None, owner, FileId::new(), JobType::TissueMask);
    job_store.update_state(job.job_id, JobState::Running).unwrap();
    job_store.set_progress(job.job_id, 0.5, 1, 2).unwrap();

    let info = wf_store.get_info(wf.workflow_id, &job_store).unwrap();
    assert_eq!(info.state, tl_core::WorkflowState::Running);
    assert_eq!(info.percent_complete, 0.5);
}
