// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared application state handed to every handler via `axum::State`.

use std::sync::Arc;
use tl_adapters::FileStore;
use tl_scheduler::Scheduler;
use tl_storage::{JobStore, WorkflowStore};

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<JobStore>,
    pub workflows: Arc<WorkflowStore>,
    pub files: Arc<dyn FileStore>,
    pub scheduler: Arc<Scheduler>,
}
