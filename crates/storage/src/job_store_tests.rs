// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn new_job(store: &JobStore) -> JobId {
    store
        .create(
            WorkflowId::new(),
            None,
            UserId::new("u1"),
            FileId::new(),
            JobType::TissueMask,
        )
        .job_id
}

#[test]
fn create_inserts_pending_with_zeroed_progress() {
    let store = JobStore::new();
    let id = new_job(&store);
    let job = store.get(id).expect("job present");
    assert_eq!(job.state, JobState::Pending);
    assert_eq!(job.progress, 0.0);
}

#[test]
fn get_is_a_snapshot_not_an_alias() {
    let store = JobStore::new();
    let id = new_job(&store);
    let mut snapshot = store.get(id).unwrap();
    snapshot.progress = 0.9;
    assert_eq!(store.get(id).unwrap().progress, 0.0);
}

#[test]
fn list_for_user_filters_by_owner() {
    let store = JobStore::new();
    let u1 = UserId::new("u1");
    let u2 = UserId::new("u2");
    store.create(WorkflowId::new(), None, u1.clone(), FileId::new(), JobType::TissueMask);
    store.create(WorkflowId::new(), None, u2, FileId::new(), JobType::TissueMask);
    assert_eq!(store.list_for_user(&u1).len(), 1);
}

#[test]
fn cancel_if_pending_transitions_only_from_pending() {
    let store = JobStore::new();
    let id = new_job(&store);
    store.update_state(id, JobState::Running).unwrap();
    let after = store.cancel_if_pending(id).unwrap();
    assert_eq!(after.state, JobState::Running, "running job is untouched");

    let store2 = JobStore::new();
    let id2 = new_job(&store2);
    let after2 = store2.cancel_if_pending(id2).unwrap();
    assert_eq!(after2.state, JobState::Canceled);
}

#[test]
fn reset_for_retry_rejects_running_job() {
    let store = JobStore::new();
    let id = new_job(&store);
    store.update_state(id, JobState::Running).unwrap();
    let err = store.reset_for_retry(id).unwrap_err();
    assert!(matches!(err, TlError::InvalidState(_)));
}

#[test]
fn reset_for_retry_clears_progress_and_result() {
    let store = JobStore::new();
    let id = new_job(&store);
    store.update_state(id, JobState::Failed).unwrap();
    store.set_progress(id, 0.5, 3, 6).unwrap();
    store.set_result_path(id, PathBuf::from("/tmp/error.json")).unwrap();

    let reset = store.reset_for_retry(id).unwrap();
    assert_eq!(reset.state, JobState::Pending);
    assert_eq!(reset.progress, 0.0);
    assert_eq!(reset.tiles_total, 6, "tile totals are preserved");
    assert!(reset.result_path.is_none());
}

#[test]
fn operations_on_unknown_job_report_not_found() {
    let store = JobStore::new();
    let err = store.update_state(JobId::new(), JobState::Running).unwrap_err();
    assert!(err.is_not_found());
}
