//! Syntax-tree passes for pseudo-generics expansion.
//!
//! One parsed source file flows through two passes:
//!
//! - [`mark`]: depth-first substitution of placeholder identifiers,
//!   recording what was replaced and which top-level declarations are
//!   the template type's own definition
//! - [`sweep`]: removal of the collected declarations from the
//!   top-level item list
//!
//! [`transform`] composes the two; [`compute_output_name`] derives the
//! generated file's name from the replacements the mark pass observed.

mod mark;
mod namer;
mod sweep;

pub use mark::{MarkReport, mark};
pub use namer::compute_output_name;
pub use sweep::{MarkedDecls, sweep};

use stencil_core::{ExpandError, MappingTable, PlaceholderMatcher, ReplacementRecord};

/// Run the mark and sweep passes over one parsed source file.
///
/// On success the file has every placeholder identifier substituted and
/// the template type's declaration removed; the returned record lists
/// the placeholders actually replaced, for output naming.
///
/// # Errors
/// Fails on the first placeholder with no mapping entry. The tree may be
/// partially rewritten at that point and must be discarded; no output
/// should be produced from it.
pub fn transform(
    file: &mut syn::File,
    mapping: &MappingTable,
    matcher: &dyn PlaceholderMatcher,
) -> Result<ReplacementRecord, ExpandError> {
    let report = mark(file, mapping, matcher)?;
    sweep(file, &report.marked);
    Ok(report.replaced)
}
