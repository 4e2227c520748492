// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell-style glob matching for builder and step names.
//!
//! `*` matches any run of characters (including `/` and the empty run), `?`
//! exactly one character, `[...]` / `[!...]` a character class. Matching is
//! anchored and case-sensitive. A malformed pattern never matches.

use glob::{MatchOptions, Pattern};

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compile a gatekeeper pattern.
///
/// Runs of `*` collapse to one, so `a**` means `a*` rather than the
/// path-recursive token the `glob` crate reserves `**` for.
fn compile(pattern: &str) -> Result<Pattern, glob::PatternError> {
    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if !(c == '*' && collapsed.ends_with('*')) {
            collapsed.push(c);
        }
    }
    Pattern::new(&collapsed)
}

/// A list of pre-compiled patterns.
///
/// Malformed entries are kept for exact lookups but never glob-match.
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    entries: Vec<(String, Option<Pattern>)>,
}

impl GlobSet {
    /// Compile every pattern, returning the malformed ones with their error.
    pub fn compile<I, S>(patterns: I) -> (Self, Vec<(String, String)>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut malformed = Vec::new();
        let entries = patterns
            .into_iter()
            .map(|raw| {
                let raw = raw.into();
                let compiled = match compile(&raw) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        tracing::warn!(pattern = %raw, error = %e, "malformed gatekeeper pattern");
                        malformed.push((raw.clone(), e.to_string()));
                        None
                    }
                };
                (raw, compiled)
            })
            .collect();
        (Self { entries }, malformed)
    }

    /// True if any well-formed pattern matches `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, p)| p.as_ref().is_some_and(|p| p.matches_with(name, OPTIONS)))
    }

    /// True if some entry is literally `name` or the literal `*` wildcard.
    pub fn contains_exact_or_wildcard(&self, name: &str) -> bool {
        self.entries.iter().any(|(raw, _)| raw == name || raw == "*")
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
