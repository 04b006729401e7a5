// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue-status introspection (spec §4.3): a best-effort, non-transactional
//! snapshot of why a `PENDING` job hasn't started yet.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitReason {
    Branch,
    UserSlot,
    Worker,
}

tl_core::simple_display! {
    WaitReason {
        Branch => "BRANCH",
        UserSlot => "USER_SLOT",
        Worker => "WORKER",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    pub active_users: usize,
    pub max_active_users: usize,
    pub active_workers: u32,
    pub max_workers: u32,
    pub queued: bool,
    pub waiting_for: Vec<WaitReason>,
}
