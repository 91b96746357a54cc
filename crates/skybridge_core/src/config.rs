use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::PROJECT_DIRECTORIES;

/// Find the closest ancestor of `start` (inclusive) containing a `.git` entry.
pub fn find_git_root_from(start: &Path) -> Option<PathBuf> {
    debug!("Searching for git root from: {:?}", start);
    let mut current_dir = Some(start);

    while let Some(dir) = current_dir {
        let git_dir = dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", dir);
            return Some(dir.to_path_buf());
        }
        current_dir = dir.parent();
    }

    debug!("Could not find .git directory in any parent folder");
    None
}

/// Presence of one of the conventional project directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStatus {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
}

/// Snapshot of the project layout shown by `config info`.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub version: String,
    pub git_root: Option<PathBuf>,
    pub directories: Vec<DirectoryStatus>,
}

impl ProjectInfo {
    /// Inspect the project rooted at `base`.
    pub fn collect(version: &str, base: &Path) -> Self {
        let directories = PROJECT_DIRECTORIES
            .iter()
            .map(|name| {
                let path = base.join(name);
                let exists = path.is_dir();
                trace!("Project directory {} exists: {}", path.display(), exists);
                DirectoryStatus { name: name.to_string(), path, exists }
            })
            .collect();

        Self {
            version: version.to_string(),
            git_root: find_git_root_from(base),
            directories,
        }
    }
}
