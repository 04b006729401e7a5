// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn env_usize_falls_back_to_default_when_unset_or_unparsable() {
    assert_eq!(env_usize("TL_DAEMON_TEST_NONEXISTENT_VAR", 7), 7);
}

#[test]
fn env_bool_accepts_1_and_true_only() {
    std::env::set_var("TL_DAEMON_TEST_BOOL", "1");
    assert!(env_bool("TL_DAEMON_TEST_BOOL"));
    std::env::set_var("TL_DAEMON_TEST_BOOL", "true");
    assert!(env_bool("TL_DAEMON_TEST_BOOL"));
    std::env::set_var("TL_DAEMON_TEST_BOOL", "yes");
    assert!(!env_bool("TL_DAEMON_TEST_BOOL"));
    std::env::remove_var("TL_DAEMON_TEST_BOOL");
}

#[test]
fn from_env_uses_documented_defaults_when_unset() {
    std::env::remove_var("TL_MAX_WORKERS");
    std::env::remove_var("TL_MAX_ACTIVE_USERS");
    std::env::remove_var("TL_TILE_SIZE");
    std::env::remove_var("TL_TILE_OVERLAP");
    let config = Config::from_env();
    assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
    assert_eq!(config.max_active_users, DEFAULT_MAX_ACTIVE_USERS);
    assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
    assert_eq!(config.tile_overlap, DEFAULT_TILE_OVERLAP);
}
