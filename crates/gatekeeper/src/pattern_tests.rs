// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn glob_matches(pattern: &str, name: &str) -> bool {
    GlobSet::compile([pattern]).0.matches(name)
}

#[yare::parameterized(
    experimental_suffix      = { "* (experimental)", "unit_tests (experimental)", true },
    experimental_needs_suffix = { "* (experimental)", "unit_tests",               false },
    star_matches_empty       = { "unit_tests*",      "unit_tests",                true },
    star_crosses_slash       = { "*",                "webkit/layout|tests",       true },
    question_is_one_char     = { "Linux Tests (dbg)(?)", "Linux Tests (dbg)(1)",  true },
    question_not_zero_chars  = { "Linux Tests (dbg)(?)", "Linux Tests (dbg)()",   false },
    char_class               = { "win[78]_rel",      "win7_rel",                  true },
    char_class_miss          = { "win[78]_rel",      "win10_rel",                 false },
    negated_class            = { "win[!7]_rel",      "win7_rel",                  false },
    anchored_start           = { "tests",            "unit_tests",                false },
    anchored_end             = { "unit",             "unit_tests",                false },
    case_sensitive           = { "Compile",          "compile",                   false },
    exact                    = { "compile",          "compile",                   true },
    double_star_suffix       = { "a**",              "abc",                       true },
    triple_star_alone        = { "***",              "x",                         true },
    star_runs_in_middle      = { "*_tests**",        "unit_tests (experimental)", true },
    triple_star_anchored     = { "foo***",           "barfoo",                    false },
)]
fn glob_semantics(pattern: &str, name: &str, expected: bool) {
    assert_eq!(glob_matches(pattern, name), expected);
}

#[test]
fn unclosed_class_is_malformed_and_never_matches() {
    let (set, malformed) = GlobSet::compile(["[abc"]);
    assert_eq!(malformed.len(), 1);
    assert!(!set.matches("[abc"));
    assert!(!set.matches("anything"));
}

#[test]
fn star_runs_are_not_malformed() {
    let (set, malformed) = GlobSet::compile(["foo***", "a**b"]);
    assert!(malformed.is_empty());
    assert!(set.matches("foo"));
    assert!(set.matches("a/b"));
}

#[test]
fn glob_set_reports_malformed_and_keeps_matching_others() {
    let (set, malformed) = GlobSet::compile(["[abc", "*_rel"]);
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].0, "[abc");
    assert!(set.matches("linux_rel"));
    assert!(!set.matches("[abc"));
    assert!(set.contains_exact_or_wildcard("[abc"));
}

#[test]
fn glob_set_exact_or_wildcard_is_literal() {
    let (set, _) = GlobSet::compile(["linux_*"]);
    assert!(!set.contains_exact_or_wildcard("linux_rel"));
    assert!(set.contains_exact_or_wildcard("linux_*"));

    let (star, _) = GlobSet::compile(["*"]);
    assert!(star.contains_exact_or_wildcard("anything"));
}

#[test]
fn empty_glob_set_matches_nothing() {
    let set = GlobSet::default();
    assert!(!set.matches(""));
    assert!(!set.contains_exact_or_wildcard("x"));
}
