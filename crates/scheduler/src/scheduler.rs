// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Scheduler`: `enqueue(job_id)` and the worker task protocol that
//! composes the three admission gates in order — branch lock, user slot,
//! worker semaphore — before calling `Executor.run` (spec §4.3).

use crate::gate::{BranchLocks, UserGate};
use crate::queue_status::{QueueStatus, WaitReason};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tl_adapters::{ComputeKernel, FileStore};
use tl_core::{JobId, JobState, UserId};
use tl_executor::ExecutorConfig;
use tl_storage::JobStore;
use tokio::sync::Semaphore;

pub struct SchedulerConfig {
    pub max_workers: usize,
    pub max_active_users: usize,
    pub executor: ExecutorConfig,
}

pub struct Scheduler {
    jobs: Arc<JobStore>,
    files: Arc<dyn FileStore>,
    kernel: Arc<dyn ComputeKernel>,
    executor_config: ExecutorConfig,
    max_workers: u32,
    branch_locks: BranchLocks,
    user_gate: UserGate,
    worker_semaphore: Arc<Semaphore>,
    active_workers: AtomicU32,
    scheduled: Mutex<HashSet<JobId>>,
}

impl Scheduler {
    pub fn new(
        jobs: Arc<JobStore>,
        files: Arc<dyn FileStore>,
        kernel: Arc<dyn ComputeKernel>,
        config: SchedulerConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            jobs,
            files,
            kernel,
            executor_config: config.executor,
            max_workers: config.max_workers as u32,
            branch_locks: BranchLocks::new(),
            user_gate: UserGate::new(config.max_active_users),
            worker_semaphore: Arc::new(Semaphore::new(config.max_workers)),
            active_workers: AtomicU32::new(0),
            scheduled: Mutex::new(HashSet::new()),
        })
    }

    /// Idempotent: if `job_id` already has a live worker task, this is a
    /// no-op. Otherwise spawns the worker task and returns immediately.
    pub fn enqueue(self: &Arc<Self>, job_id: JobId) {
        {
            let mut scheduled = self.scheduled.lock();
            if !scheduled.insert(job_id) {
                return;
            }
        }
        let scheduler = self.clone();
        tokio::spawn(async move {
            scheduler.worker_task(job_id).await;
        });
    }

    pub fn queue_status(&self, job_id: JobId) -> Option<QueueStatus> {
        let job = self.jobs.get(job_id)?;
        let queued = job.state == JobState::Pending;
        let mut waiting_for = Vec::new();

        if queued {
            let effective_branch = job.effective_branch().to_string();
            let same_branch_running = self.jobs.list_all().iter().any(|j| {
                j.job_id != job.job_id
                    && j.workflow_id == job.workflow_id
                    && j.effective_branch() == effective_branch
                    && j.state == JobState::Running
            });
            if same_branch_running {
                waiting_for.push(WaitReason::Branch);
            }

            if !self.user_gate.is_active(&job.user_id)
                && self.user_gate.active_user_count() >= self.max_users()
            {
                waiting_for.push(WaitReason::UserSlot);
            }

            if self.active_workers.load(Ordering::SeqCst) >= self.max_workers {
                waiting_for.push(WaitReason::Worker);
            }
        }

        Some(QueueStatus {
            active_users: self.user_gate.active_user_count(),
            max_active_users: self.max_users(),
            active_workers: self.active_workers.load(Ordering::SeqCst),
            max_workers: self.max_workers,
            queued,
            waiting_for,
        })
    }

    fn max_users(&self) -> usize {
        self.user_gate.max_active_users()
    }

    async fn worker_task(self: Arc<Self>, job_id: JobId) {
        let _scheduled_guard = ScheduledGuard { scheduler: self.clone(), job_id };

        let Some(job) = self.jobs.get(job_id) else { return };
        let effective_branch = job.effective_branch().to_string();
        let branch_lock = self.branch_locks.get_or_create(job.workflow_id, &effective_branch);

        let _branch_guard = branch_lock.lock().await;

        if !self.is_still_runnable(job_id) {
            return;
        }

        self.user_gate.acquire(&job.user_id).await;
        let _user_guard = UserSlotGuard { scheduler: self.clone(), user_id: job.user_id.clone() };

        if !self.is_still_runnable(job_id) {
            return;
        }

        // The semaphore is never closed, so acquisition only fails if that
        // invariant is violated; bail out of the worker task rather than
        // panic if it ever is.
        let Ok(permit) = self.worker_semaphore.clone().acquire_owned().await else { return };

        if !self.is_still_runnable(job_id) {
            return;
        }

        self.active_workers.fetch_add(1, Ordering::SeqCst);
        tl_executor::run_job(
            job_id,
            self.jobs.clone(),
            self.files.clone(),
            self.kernel.clone(),
            self.executor_config,
        )
        .await;
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
        drop(permit);
    }

    /// Re-read the job: absent or `CANCELED` means the gate protocol must
    /// stop without transitioning state (spec §4.3 steps 4/6/8).
    fn is_still_runnable(&self, job_id: JobId) -> bool {
        self.jobs.get(job_id).is_some_and(|j| j.state != JobState::Canceled)
    }
}

struct ScheduledGuard {
    scheduler: Arc<Scheduler>,
    job_id: JobId,
}

impl Drop for ScheduledGuard {
    fn drop(&mut self) {
        self.scheduler.scheduled.lock().remove(&self.job_id);
    }
}

struct UserSlotGuard {
    scheduler: Arc<Scheduler>,
    user_id: UserId,
}

impl Drop for UserSlotGuard {
    fn drop(&mut self) {
        self.scheduler.user_gate.release(&self.user_id);
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
