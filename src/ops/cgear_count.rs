//! Implementation of `cgear count`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::builder::cmake::CGEAR_DIR;
use crate::ops::project::Project;

/// Extensions of the sources that are counted.
pub const SOURCE_EXTENSIONS: [&str; 3] = ["h", "hpp", "cpp"];

/// Totals reported by `cgear count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCount {
    pub files: usize,
    pub lines: usize,
}

/// Count the lines of every C++ source under the project root.
///
/// The build directory, `.cgear` and hidden directories are skipped.
pub fn count(project: &Project) -> Result<LineCount> {
    let build_dir = project.config.build_path(&project.root);
    let cgear_dir = project.root.join(CGEAR_DIR);

    let walker = WalkDir::new(&project.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !(is_hidden(e) || e.path() == build_dir || e.path() == cgear_dir)
        });

    let mut total = LineCount::default();
    for entry in walker {
        let entry = entry.context("failed to walk the project")?;
        if !entry.file_type().is_file() || !is_source(entry.path()) {
            continue;
        }
        let bytes = fs::read(entry.path())
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        let lines = String::from_utf8_lossy(&bytes).lines().count();
        tracing::debug!("{}: {} lines", entry.path().display(), lines);

        total.files += 1;
        total.lines += lines;
    }
    Ok(total)
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
