//! Mapping table construction and the per-file replacement record.

use rustc_hash::FxHashMap;

use crate::error::ConfigError;

/// Placeholder-to-replacement associations for one run.
///
/// Built once from the caller's ordered `(name, value)` pairs and shared
/// read-only across every file in the run. Each pair contributes two
/// entries, so a template can spell the placeholder in both unexported
/// and exported positions:
///
/// ```
/// use stencil_core::MappingTable;
///
/// let table = MappingTable::build(&[("typeKey".into(), "u32".into())]).unwrap();
/// assert_eq!(table.get("_typeKey_"), Some("u32"));
/// assert_eq!(table.get("_TypeKey_"), Some("U32"));
/// ```
///
/// The capitalized form uppercases the first letter only; a different
/// exported-name convention is a change to [`capitalize`] alone.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: FxHashMap<String, String>,
    /// Lowercase token forms in caller order, for output naming.
    keys: Vec<String>,
}

impl MappingTable {
    /// Build a table from ordered `(name, value)` pairs.
    ///
    /// Supplying the same name twice is not an error: the last value
    /// wins, and the name keeps its first position in the key order.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a name is empty or contains `=`.
    pub fn build(pairs: &[(String, String)]) -> Result<Self, ConfigError> {
        let mut entries = FxHashMap::default();
        let mut keys = Vec::with_capacity(pairs.len());

        for (name, value) in pairs {
            if name.is_empty() {
                return Err(ConfigError::EmptyKey {
                    pair: format!("{name}={value}"),
                });
            }
            if name.contains('=') {
                return Err(ConfigError::KeyContainsSeparator {
                    pair: format!("{name}={value}"),
                });
            }

            let token = format!("_{name}_");
            if !entries.contains_key(&token) {
                keys.push(token.clone());
            }
            entries.insert(format!("_{}_", capitalize(name)), capitalize(value));
            entries.insert(token, value.clone());
        }

        Ok(Self { entries, keys })
    }

    /// Split a `name=value` command-line argument into a pair.
    ///
    /// The value may itself contain `=`; only the first separator splits.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingSeparator`] if there is no `=`.
    pub fn parse_pair(arg: &str) -> Result<(String, String), ConfigError> {
        match arg.split_once('=') {
            Some((name, value)) => Ok((name.to_string(), value.to_string())),
            None => Err(ConfigError::MissingSeparator {
                pair: arg.to_string(),
            }),
        }
    }

    /// Look up the replacement for an exact token spelling.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Whether an exact token spelling has an entry.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// The lowercase token forms (`_name_`) in caller order.
    ///
    /// This is the key order the output namer walks.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of entries (two per caller-supplied pair).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Uppercase the first letter, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The subset of the mapping table actually exercised for one file.
///
/// Populated by the mark pass as replacements happen, consumed by the
/// output namer, then discarded with the file's tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementRecord {
    replaced: FxHashMap<String, String>,
}

impl ReplacementRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that `token` was replaced with `value`.
    pub fn record(&mut self, token: &str, value: &str) {
        self.replaced.insert(token.to_string(), value.to_string());
    }

    /// The replacement applied for `token`, if it was encountered.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.replaced.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.replaced.contains_key(token)
    }

    /// Number of distinct tokens replaced.
    pub fn len(&self) -> usize {
        self.replaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replaced.is_empty()
    }
}
