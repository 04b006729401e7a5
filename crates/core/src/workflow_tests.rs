// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::{FileId, JobRecord, JobType};
use proptest::prelude::*;

fn arb_job_state() -> impl Strategy<Value = JobState> {
    prop_oneof![
        Just(JobState::Pending),
        Just(JobState::Running),
        Just(JobState::Succeeded),
        Just(JobState::Failed),
        Just(JobState::Canceled),
    ]
}

fn job(state: JobState, progress: f64) -> JobRecord {
    let mut j = JobRecord::new(
        JobId::new(),
        WorkflowId::new(),
        UserId::new("u1"),
        FileId::new(),
        JobType::TissueMask,
        None,
    );
    j.state = state;
    j.progress = progress;
    j
}

#[test]
fn empty_workflow_is_pending_with_zero_percent() {
    let record = WorkflowRecord::new(UserId::new("u1"), "wf".into());
    let info = WorkflowInfo::derive(&record, &[]);
    assert_eq!(info.state, WorkflowState::Pending);
    assert_eq!(info.percent_complete, 0.0);
}

#[yare::parameterized(
    all_succeeded = { vec![(JobState::Succeeded, 1.0), (JobState::Succeeded, 1.0)], WorkflowState::Succeeded },
    any_failed = { vec![(JobState::Succeeded, 1.0), (JobState::Failed, 0.4)], WorkflowState::Failed },
    any_running = { vec![(JobState::Succeeded, 1.0), (JobState::Running, 0.2)], WorkflowState::Running },
    mixed_pending_and_canceled = { vec![(JobState::Pending, 0.0), (JobState::Canceled, 0.0)], WorkflowState::Pending },
    only_canceled_is_pending_not_succeeded = { vec![(JobState::Canceled, 0.0)], WorkflowState::Pending },
)]
fn derives_state_per_job_configuration(cases: Vec<(JobState, f64)>, expected: WorkflowState) {
    let record = WorkflowRecord::new(UserId::new("u1"), "wf".into());
    let jobs: Vec<JobRecord> = cases.into_iter().map(|(s, p)| job(s, p)).collect();
    let info = WorkflowInfo::derive(&record, &jobs);
    assert_eq!(info.state, expected);
}

#[test]
fn percent_complete_is_mean_progress() {
    let record = WorkflowRecord::new(UserId::new("u1"), "wf".into());
    let jobs = vec![job(JobState::Running, 0.5), job(JobState::Running, 1.0)];
    let info = WorkflowInfo::derive(&record, &jobs);
    assert!((info.percent_complete - 0.75).abs() < 1e-9);
}

proptest! {
    /// Spec I1/I4-adjacent: for any member-job configuration, the derived
    /// percent is always the arithmetic mean of the member progresses, and
    /// always falls within [0, 1] since each job's own progress does.
    #[test]
    fn percent_complete_is_always_the_mean(
        progresses in prop::collection::vec(0.0f64..=1.0, 1..12),
        states in prop::collection::vec(arb_job_state(), 1..12),
    ) {
        let n = progresses.len().min(states.len());
        let record = WorkflowRecord::new(UserId::new("u1"), "wf".into());
        let jobs: Vec<JobRecord> = (0..n).map(|i| job(states[i], progresses[i])).collect();
        let info = WorkflowInfo::derive(&record, &jobs);
        let expected = jobs.iter().map(|j| j.progress).sum::<f64>() / jobs.len() as f64;
        prop_assert!((info.percent_complete - expected).abs() < 1e-9);
        prop_assert!((0.0..=1.0).contains(&info.percent_complete));
    }

    /// Spec §3: a workflow is FAILED iff any member job is FAILED, regardless
    /// of how many other jobs are present or in what state.
    #[test]
    fn any_failed_job_makes_the_workflow_failed(
        states in prop::collection::vec(arb_job_state(), 0..12),
    ) {
        let record = WorkflowRecord::new(UserId::new("u1"), "wf".into());
        let jobs: Vec<JobRecord> = states.iter().map(|s| job(*s, 0.0)).collect();
        let info = WorkflowInfo::derive(&record, &jobs);
        let any_failed = states.iter().any(|s| *s == JobState::Failed);
        prop_assert_eq!(any_failed, info.state == WorkflowState::Failed);
    }

    /// Spec §3: canceled-only workflows report PENDING, never SUCCEEDED —
    /// derivation never treats CANCELED as a form of completion.
    #[test]
    fn only_canceled_jobs_never_derive_succeeded(
        count in 1usize..12,
    ) {
        let record = WorkflowRecord::new(UserId::new("u1"), "wf".into());
        let jobs: Vec<JobRecord> = (0..count).map(|_| job(JobState::Canceled, 0.0)).collect();
        let info = WorkflowInfo::derive(&record, &jobs);
        prop_assert_eq!(info.state, WorkflowState::Pending);
    }
}
