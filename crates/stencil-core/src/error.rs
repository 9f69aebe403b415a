//! Error types for mapping construction and placeholder expansion.
//!
//! Two phase-specific enums live here: [`ConfigError`] for malformed
//! caller input (surfaced before any file is touched) and [`ExpandError`]
//! for failures during the mark pass. Driver-level errors (parse and I/O
//! failures) wrap these in the `stencil` crate.
//!
//! Every error is terminal for the whole run; there is no
//! continue-on-error mode.

use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while building the mapping table from caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A mapping pair had an empty placeholder name.
    #[error("empty placeholder name in mapping pair {pair:?}")]
    EmptyKey { pair: String },

    /// A placeholder name contained the `=` separator.
    #[error("placeholder name contains '=' in mapping pair {pair:?}")]
    KeyContainsSeparator { pair: String },

    /// A command-line mapping argument had no `=` separator.
    #[error("missing '=' in mapping pair {pair:?}")]
    MissingSeparator { pair: String },
}

// ============================================================================
// Expansion Errors
// ============================================================================

/// Errors raised by the mark pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// A placeholder-shaped token has no mapping table entry.
    ///
    /// Skipping it would emit code referencing a nonexistent type, so
    /// the run aborts with the offending token instead.
    #[error("no mapping for {token:?}")]
    UnknownPlaceholder { token: String },

    /// Substitution produced a spelling that is not a legal identifier.
    #[error("substitution produced invalid identifier {spelling:?}")]
    InvalidIdentifier { spelling: String },
}

impl ExpandError {
    /// The placeholder token this error reports, when it carries one.
    pub fn token(&self) -> Option<&str> {
        match self {
            ExpandError::UnknownPlaceholder { token } => Some(token),
            ExpandError::InvalidIdentifier { .. } => None,
        }
    }
}
