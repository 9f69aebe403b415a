//! Core data types for stencil.
//!
//! This crate holds the pure, tree-free leaves of the expansion
//! pipeline:
//! - Placeholder matching ([`PlaceholderMatcher`], [`UnderscoreMatcher`])
//! - The placeholder-to-replacement table ([`MappingTable`])
//! - The per-file record of replacements ([`ReplacementRecord`])
//! - Error types for configuration and expansion failures
//!
//! The actual syntax-tree passes live in `stencil-expand`.

pub mod error;
pub mod mapping;
pub mod pattern;

pub use error::{ConfigError, ExpandError};
pub use mapping::{MappingTable, ReplacementRecord};
pub use pattern::{PlaceholderMatcher, PlaceholderRun, UnderscoreMatcher};
