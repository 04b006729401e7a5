// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `EventPublisher` (spec §4.5): per-job and per-workflow change streams.
//!
//! Implemented as change-coalesced polling at a 250ms cadence — the
//! "acceptable fallback" the original reference design itself uses, rather
//! than a push-based notification graph threaded through the executor's
//! tile loop. Each stream emits the current snapshot immediately on
//! subscribe, then only payloads that differ from the last one emitted, and
//! terminates once the underlying entity reaches a terminal state.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tl_core::{JobId, JobState, WorkflowId, WorkflowState};
use tl_storage::{JobStore, WorkflowStore};
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEventPayload {
    pub state: JobState,
    pub progress: f64,
    pub tiles_processed: u32,
    pub tiles_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEventPayload {
    pub state: WorkflowState,
    pub percent_complete: f64,
    pub jobs: Vec<JobEventPayload>,
}

/// Subscribe to a job's state changes. The channel closes when the job
/// reaches a terminal state or disappears.
pub fn subscribe_job(jobs: Arc<JobStore>, job_id: JobId) -> mpsc::Receiver<JobEventPayload> {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut last: Option<JobEventPayload> = None;
        loop {
            let Some(job) = jobs.get(job_id) else { break };
            let payload = JobEventPayload {
                state: job.state,
                progress: job.progress,
                tiles_processed: job.tiles_processed,
                tiles_total: job.tiles_total,
            };
            let changed = last.as_ref() != Some(&payload);
            let terminal = job.state.is_terminal();
            if changed {
                if tx.send(payload.clone()).await.is_err() {
                    break;
                }
                last = Some(payload);
            }
            if terminal {
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    });
    rx
}

/// Subscribe to a workflow's derived state changes. Callers must perform
/// their own ownership check before subscribing: this stream terminates
/// only on a terminal workflow state or the workflow disappearing, not on
/// an ownership mismatch (that opacity check belongs to the HTTP edge).
pub fn subscribe_workflow(
    jobs: Arc<JobStore>,
    workflows: Arc<WorkflowStore>,
    workflow_id: WorkflowId,
) -> mpsc::Receiver<WorkflowEventPayload> {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut last: Option<WorkflowEventPayload> = None;
        loop {
            let Ok(info) = workflows.get_info(workflow_id, &jobs) else { break };
            let member_jobs = jobs.list_for_workflow(workflow_id);
            let payload = WorkflowEventPayload {
                state: info.state,
                percent_complete: info.percent_complete,
                jobs: member_jobs
                    .iter()
                    .map(|j| JobEventPayload {
                        state: j.state,
                        progress: j.progress,
                        tiles_processed: j.tiles_processed,
                        tiles_total: j.tiles_total,
                    })
                    .collect(),
            };
            let changed = last.as_ref() != Some(&payload);
            let terminal =
                matches!(info.state, WorkflowState::Succeeded | WorkflowState::Failed);
            if changed {
                if tx.send(payload.clone()).await.is_err() {
                    break;
                }
                last = Some(payload);
            }
            if terminal {
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    });
    rx
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
