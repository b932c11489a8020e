//! Implementation of `cgear clean`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::builder::cmake::CGEAR_DIR;
use crate::ops::project::Project;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove the build directory, and with `all` the generated `.cgear` directory.
///
/// Returns the directories that existed and were removed.
pub fn clean(project: &Project, all: bool) -> Result<Vec<PathBuf>> {
    let mut targets = vec![project.config.build_path(&project.root)];
    if all {
        targets.push(project.root.join(CGEAR_DIR));
    }

    let mut removed = Vec::new();
    for dir in targets {
        if !dir.exists() {
            continue;
        }
        remove_dir_all_if_exists(&dir)
            .with_context(|| format!("failed to remove {}", dir.display()))?;
        removed.push(dir);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::GlobalContext;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, Project) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "").unwrap();
        fs::create_dir_all(tmp.path().join("build/CMakeFiles")).unwrap();
        fs::create_dir_all(tmp.path().join(CGEAR_DIR).join("cmake")).unwrap();
        let ctx = GlobalContext::with_paths(tmp.path(), tmp.path().join("home"));
        let project = Project::load(&ctx).unwrap();
        (tmp, project)
    }

    #[test]
    fn test_clean_build_dir_only() {
        let (tmp, project) = project();
        let removed = clean(&project, false).unwrap();
        assert_eq!(removed, vec![tmp.path().join("build")]);
        assert!(tmp.path().join(CGEAR_DIR).exists());
        assert!(tmp.path().join("CMakeLists.txt").exists());
    }

    #[test]
    fn test_clean_all() {
        let (tmp, project) = project();
        let removed = clean(&project, true).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(!tmp.path().join(CGEAR_DIR).exists());

        // Nothing left to remove.
        assert!(clean(&project, true).unwrap().is_empty());
    }
}
