// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_core::test_support::{build, steps};
use tw_core::Status;

fn names<'a>(steps: impl IntoIterator<Item = &'a Step>) -> Vec<&'a str> {
    steps.into_iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn parent_followed_by_child_is_not_a_leaf() {
    let steps = vec![
        Step::failure("compile"),
        Step::failure("compile|gn"),
        Step::success("compile|ninja"),
        Step::success("browser_tests"),
    ];
    assert_eq!(names(leaf_steps(&steps)), ["compile|gn", "compile|ninja", "browser_tests"]);
}

#[yare::parameterized(
    prefix_without_separator = { "test", "tests" },
    unrelated                = { "compile", "lint" },
    sibling_child            = { "a|b", "a|c" },
)]
fn next_step_not_a_child(first: &str, second: &str) {
    let steps = vec![Step::failure(first), Step::failure(second)];
    assert_eq!(leaf_steps(&steps).len(), 2);
}

#[test]
fn last_step_is_always_a_leaf() {
    let steps = vec![Step::failure("compile")];
    assert_eq!(names(leaf_steps(&steps)), ["compile"]);
    assert!(leaf_steps(&[]).is_empty());
}

#[yare::parameterized(
    failure        = { "compile",        Status::Failure,      true },
    infra_failure  = { "bot_update",     Status::InfraFailure, true },
    canceled       = { "tests",          Status::Canceled,     true },
    success        = { "compile",        Status::Success,      false },
    failure_reason = { "Failure reason", Status::Failure,      false },
    steps_wrapper  = { "steps",          Status::Failure,      false },
)]
fn alertable(name: &str, status: Status, expected: bool) {
    assert_eq!(is_alertable(&Step::new(name, status)), expected);
}

#[test]
fn alertable_leaf_names_skip_parents_and_passing() {
    let mut all = vec![Step::failure("steps"), Step::failure("steps|compile")];
    all.extend(steps(&["lint"], &["Failure reason", "unit_tests"]));
    let b = build("linux-rel", 1, all);

    let alertable: Vec<String> = alertable_leaf_names(&b).into_iter().collect();
    assert_eq!(alertable, ["steps|compile", "unit_tests"]);

    let attempted = attempted_step_names(&b);
    assert_eq!(attempted.len(), 5);
    assert!(attempted.contains("steps"));
    assert!(attempted.contains("lint"));
}
