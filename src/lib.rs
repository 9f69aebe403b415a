//! stencil: build-time pseudo-generics expansion for Rust source files.
//!
//! A template file spells placeholder types as underscore-wrapped
//! identifiers (`_type_`, `_typeKey_`, capitalized variants for exported
//! positions). stencil substitutes caller-supplied concrete names for
//! the placeholders, removes the template type's own declaration, and
//! writes a new source file whose name encodes the instantiation:
//!
//! ```text
//! stencil typeKey=u32 typeValue=String templates/map.rs
//! # -> map_u32_string.rs
//! ```
//!
//! The pipeline per file is parse (`syn`) -> mark -> sweep ->
//! pretty-print (`prettyplease`) -> write. Any failure is fatal for the
//! whole run; a template with an unmapped placeholder never produces
//! output.
//!
//! The passes themselves live in [`stencil_expand`]; the pure data
//! pieces (mapping table, placeholder matcher, records) in
//! [`stencil_core`]. This crate adds the driver, source resolution, and
//! the command-line binary.

pub mod driver;
pub mod resolve;

pub use driver::{Driver, StencilError};
pub use resolve::{FsResolver, SourceResolver};

pub use stencil_core::{
    ConfigError, ExpandError, MappingTable, PlaceholderMatcher, PlaceholderRun, ReplacementRecord,
    UnderscoreMatcher,
};
pub use stencil_expand::{MarkReport, MarkedDecls, compute_output_name, mark, sweep, transform};
