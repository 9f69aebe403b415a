//! Sweep pass: remove the declarations collected by the mark pass.

use rustc_hash::FxHashSet;

/// Identities of top-level declarations pending removal.
///
/// Indices into `syn::File::items`, recorded by the mark pass and
/// consumed here. Holding the identities out-of-band keeps the tree free
/// of sentinel names: whether an item is marked is a set query, not a
/// string comparison against a magic value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedDecls {
    indices: FxHashSet<usize>,
}

impl MarkedDecls {
    pub(crate) fn insert(&mut self, index: usize) {
        self.indices.insert(index);
    }

    /// Whether the item at `index` is pending removal.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of declarations pending removal.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Remove every marked top-level declaration, preserving the order of
/// the rest.
///
/// Only the item list is touched, one level deep. References to a
/// removed declaration's old name elsewhere in the tree keep whatever
/// text the mark pass substituted: the generic skeleton is compiled out
/// while the code written against it, now concretized, stays.
pub fn sweep(file: &mut syn::File, marked: &MarkedDecls) {
    if marked.is_empty() {
        return;
    }

    let mut index = 0;
    file.items.retain(|_| {
        let keep = !marked.contains(index);
        index += 1;
        keep
    });
}
