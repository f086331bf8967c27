//! Discovers fixture files on disk and matches suite labels against CLI filters.
//!
//! Discovery is the only part of the harness that touches the filesystem
//! outside of fixture parsing. The walk skips dependency and VCS directories
//! and returns files sorted, so merge order (and therefore name-collision
//! resolution) is deterministic.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::HarnessError;

/// Directories never descended into during a fixture walk.
const SKIP_DIRS: [&str; 3] = ["target", ".git", "node_modules"];

#[derive(Debug)]
pub struct FixtureDiscoverer;

impl FixtureDiscoverer {
    /// Recursively scans `root` for fixture files.
    ///
    /// A fixture file is any file named `<name>.fixtures.json`,
    /// `<name>.fixtures.yaml`, or `<name>.fixtures.yml`. The returned list is
    /// sorted to make the later merge order deterministic.
    pub fn discover_fixture_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, HarnessError> {
        let root = root.as_ref();
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !(entry.file_type().is_dir() && Self::is_skipped_dir(entry.path())));

        for entry in walker {
            let entry = entry.map_err(|e| HarnessError::Discovery {
                root: root.to_path_buf(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if !Self::is_fixture_file(entry.path()) {
                continue;
            }

            files.push(entry.into_path());
        }
        files.sort();
        Ok(files)
    }

    fn is_skipped_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| SKIP_DIRS.contains(&name))
    }

    /// Returns true for `<name>.fixtures.{json,yaml,yml}`.
    fn is_fixture_file(path: &Path) -> bool {
        let has_data_ext = path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "yaml" || ext == "yml");
        if !has_data_ext {
            return false;
        }
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(".fixtures"))
    }
}

/// Matches a suite's source label against the positional CLI filters.
///
/// With no filters every suite runs. Otherwise a suite runs when some filter
/// `arg` satisfies an exact, case-insensitive match of `"<arg>.test"` against
/// the label's base name (a trailing `.rs` on the label is ignored, so both
/// `"spy.test"` and `"tests/spy.test.rs"` match the filter `spy`).
pub fn suite_matches_filters(source: &str, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    let base = Path::new(source)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(source)
        .to_lowercase();
    let base = base.strip_suffix(".rs").unwrap_or(&base);
    filters
        .iter()
        .any(|arg| format!("{}.test", arg.to_lowercase()) == base)
}
