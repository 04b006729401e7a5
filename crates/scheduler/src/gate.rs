// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The branch-lock table and the user-admission condition-variable gate
//! (spec §4.3).

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tl_core::{UserId, WorkflowId};
use tokio::sync::Notify;

/// `(workflow_id, effective_branch) -> Mutex`, lazily created, never
/// removed during process lifetime (spec §4.3: "acceptable memory cost,
/// avoids lock-churn races").
#[derive(Default)]
pub struct BranchLocks {
    table: Mutex<HashMap<(WorkflowId, String), Arc<tokio::sync::Mutex<()>>>>,
}

impl BranchLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, workflow_id: WorkflowId, branch: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut table = self.table.lock();
        table
            .entry((workflow_id, branch.to_string()))
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

#[derive(Default)]
struct UserGateState {
    active_users: HashSet<UserId>,
    active_counts: HashMap<UserId, u32>,
}

/// Gate admitting at most `max_active_users` distinct users with >=1
/// running job; already-active users are admitted immediately regardless of
/// how many of their jobs are already running (spec §4.3 starvation note).
pub struct UserGate {
    max_active_users: usize,
    state: Mutex<UserGateState>,
    notify: Notify,
}

impl UserGate {
    pub fn new(max_active_users: usize) -> Self {
        Self { max_active_users, state: Mutex::new(UserGateState::default()), notify: Notify::new() }
    }

    /// Blocks until `user_id` is already active, or there is a free slot.
    pub async fn acquire(&self, user_id: &UserId) {
        loop {
            // `enable()` must run before the predicate check: it arms the
            // notification so a concurrent `release`'s `notify_waiters()`
            // landing between the check and the `await` below is still
            // observed, rather than being dropped because nothing had
            // polled the future yet.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.state.lock();
                if state.active_users.contains(user_id) || state.active_users.len() < self.max_active_users {
                    state.active_users.insert(user_id.clone());
                    *state.active_counts.entry(user_id.clone()).or_insert(0) += 1;
                    return;
                }
            }
            notified.as_mut().await;
        }
    }

    pub fn release(&self, user_id: &UserId) {
        let mut state = self.state.lock();
        let Some(count) = state.active_counts.get_mut(user_id) else { return };
        *count -= 1;
        if *count == 0 {
            state.active_counts.remove(user_id);
            state.active_users.remove(user_id);
            drop(state);
            self.notify.notify_waiters();
        }
    }

    pub fn active_user_count(&self) -> usize {
        self.state.lock().active_users.len()
    }

    pub fn max_active_users(&self) -> usize {
        self.max_active_users
    }

    pub fn is_active(&self, user_id: &UserId) -> bool {
        self.state.lock().active_users.contains(user_id)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
