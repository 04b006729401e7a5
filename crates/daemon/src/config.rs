// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-variable configuration (spec §6 "Configuration").

use std::path::PathBuf;

const DEFAULT_MAX_WORKERS: usize = 4;
const DEFAULT_MAX_ACTIVE_USERS: usize = 3;
const DEFAULT_TILE_SIZE: u32 = 1024;
const DEFAULT_TILE_OVERLAP: u32 = 64;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub max_workers: usize,
    pub max_active_users: usize,
    pub tile_size: u32,
    pub tile_overlap: u32,
    pub upload_dir: PathBuf,
    pub port: u16,
    /// Selects the real compute kernel over the deterministic fallback.
    /// No real-kernel crate is in the dependency stack (DESIGN.md), so
    /// setting this only logs a warning and still runs the fallback.
    pub enable_real_kernel: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            max_workers: env_usize("TL_MAX_WORKERS", DEFAULT_MAX_WORKERS),
            max_active_users: env_usize("TL_MAX_ACTIVE_USERS", DEFAULT_MAX_ACTIVE_USERS),
            tile_size: env_u32("TL_TILE_SIZE", DEFAULT_TILE_SIZE),
            tile_overlap: env_u32("TL_TILE_OVERLAP", DEFAULT_TILE_OVERLAP),
            upload_dir: std::env::var("TL_UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("./data")),
            port: env_u16("TL_PORT", DEFAULT_PORT),
            enable_real_kernel: env_bool("TL_ENABLE_REAL_KERNEL"),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str) -> bool {
    matches!(std::env::var(key).ok().as_deref(), Some("1") | Some("true"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
