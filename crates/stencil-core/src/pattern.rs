//! Placeholder token matching.
//!
//! A placeholder is a delimited run inside an identifier spelling that
//! stands in for a caller-supplied concrete name: `_type_`, `_typeKey_`,
//! `_TypeValue_`. The delimiter convention lives behind the
//! [`PlaceholderMatcher`] trait so the mark pass never depends on it
//! directly; swapping the convention means swapping the matcher, not
//! touching the traversal.

use std::ops::Range;

use regex::Regex;

/// A matched placeholder run: byte range into the identifier spelling.
pub type PlaceholderRun = Range<usize>;

/// Capability: find placeholder runs in an identifier spelling.
pub trait PlaceholderMatcher {
    /// Find all non-overlapping placeholder runs, left to right.
    ///
    /// Must be deterministic and total: the same token is found whether
    /// it appears as the whole spelling or embedded inside a longer one.
    fn find_runs(&self, spelling: &str) -> Vec<PlaceholderRun>;

    /// Whether the spelling contains at least one placeholder run.
    fn contains_placeholder(&self, spelling: &str) -> bool {
        !self.find_runs(spelling).is_empty()
    }
}

/// The reference matcher: case-insensitive `type` plus an optional
/// alphanumeric qualifier, wrapped in underscores.
///
/// Matches `_type_`, `_typeKey_`, `_TYPEVALUE_`; does not match `mytype`,
/// `_type` (unterminated) or `_ty_pe_`.
#[derive(Debug, Clone)]
pub struct UnderscoreMatcher {
    re: Regex,
}

impl UnderscoreMatcher {
    pub fn new() -> Self {
        // The pattern is a constant, so compilation cannot fail.
        Self {
            re: Regex::new(r"(?i)_type[^\W_]*_").expect("placeholder pattern"),
        }
    }
}

impl Default for UnderscoreMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderMatcher for UnderscoreMatcher {
    fn find_runs(&self, spelling: &str) -> Vec<PlaceholderRun> {
        self.re.find_iter(spelling).map(|m| m.range()).collect()
    }
}
