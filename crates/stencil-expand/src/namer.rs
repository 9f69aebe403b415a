//! Output file naming.

use std::path::{Path, PathBuf};

use stencil_core::ReplacementRecord;

/// Stem suffix marking a test source file.
///
/// It survives instantiation as a middle fragment, so a generated test
/// file is still test-named: `map_test.rs` becomes `map_u32_test.rs`.
const TEST_SUFFIX: &str = "_test";

/// Derive the generated file's name from the template's name and the
/// placeholders actually replaced.
///
/// One lowercase suffix is appended per replaced placeholder, walking
/// `keys` in the caller-supplied order, so distinct instantiations of
/// one template never collide:
///
/// - `list.rs` + `type=Point` -> `list_point.rs`
/// - `map.rs` + `typeKey=u32 typeValue=String` -> `map_u32_string.rs`
///
/// Pure function of its inputs. Returns a bare file name; generated
/// files land in the output directory, not next to the template.
pub fn compute_output_name(
    original: &Path,
    replaced: &ReplacementRecord,
    keys: &[String],
) -> PathBuf {
    let file_name = original
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (mut base, mut ext) = match file_name.rfind('.') {
        Some(dot) => (file_name[..dot].to_string(), file_name[dot..].to_string()),
        None => (file_name, String::new()),
    };

    if let Some(stripped) = base.strip_suffix(TEST_SUFFIX) {
        base = stripped.to_string();
        ext = format!("{TEST_SUFFIX}{ext}");
    }

    for key in keys {
        if let Some(value) = replaced.get(key) {
            base.push('_');
            base.push_str(&value.to_lowercase());
        }
    }

    base.push_str(&ext);
    PathBuf::from(base)
}
