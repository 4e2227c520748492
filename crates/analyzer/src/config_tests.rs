// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

const VARS: [&str; 3] =
    ["TREEWATCH_MAX_CONCURRENT_BUILDERS", "TREEWATCH_MAX_RECENT_BUILDS", "TREEWATCH_TREE"];

fn clear() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_env() {
    clear();
    assert_eq!(AnalyzerConfig::from_env(), AnalyzerConfig::default());
    assert_eq!(AnalyzerConfig::default().max_concurrent_builders, 10);
    assert_eq!(AnalyzerConfig::default().max_recent_builds, 100);
}

#[test]
#[serial]
fn env_overrides() {
    clear();
    std::env::set_var("TREEWATCH_MAX_CONCURRENT_BUILDERS", "4");
    std::env::set_var("TREEWATCH_MAX_RECENT_BUILDS", "25");
    std::env::set_var("TREEWATCH_TREE", "chromium");

    let config = AnalyzerConfig::from_env();
    clear();

    assert_eq!(config.max_concurrent_builders, 4);
    assert_eq!(config.max_recent_builds, 25);
    assert_eq!(config.tree.as_deref(), Some("chromium"));
}

#[test]
#[serial]
fn invalid_values_fall_back() {
    for value in ["0", "-3", "ten"] {
        clear();
        std::env::set_var("TREEWATCH_MAX_CONCURRENT_BUILDERS", value);
        std::env::set_var("TREEWATCH_TREE", "");

        let config = AnalyzerConfig::from_env();
        clear();

        assert_eq!(config.max_concurrent_builders, 10, "value {value:?}");
        assert_eq!(config.tree, None);
    }
}
