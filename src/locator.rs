//! # Repository Locator
//!
//! Finds the repositories to work on: the immediate subdirectories of a root
//! directory that have a `.git` directory at their top level.
//!
//! The scan is deliberately shallow. Nested repositories, submodules and
//! worktrees (whose `.git` is a file) are not picked up.
//!
//! Any directory that cannot be read aborts the scan with
//! [`Error::Filesystem`]. Skipping it would produce a report that silently
//! misses repositories.

use crate::defaults::REPOSITORY_MARKER;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A repository root found under the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRepository {
    /// Directory name, unique within one scan.
    pub name: String,
    /// Full path of the repository root.
    pub path: PathBuf,
}

/// Lists the repositories directly under `root`, sorted by name.
///
/// Directories whose name matches one of `ignore` are neither inspected nor
/// returned.
pub fn locate_repositories(root: &Path, ignore: &[glob::Pattern]) -> Result<Vec<LocatedRepository>> {
    let metadata = fs::metadata(root).map_err(|e| Error::Filesystem {
        path: root.display().to_string(),
        message: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(Error::Filesystem {
            path: root.display().to_string(),
            message: "not a directory".to_string(),
        });
    }

    let mut repositories = Vec::new();
    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry.map_err(|e| Error::Filesystem {
            path: e
                .path()
                .unwrap_or(root)
                .display()
                .to_string(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore.iter().any(|pattern| pattern.matches(&name)) {
            log::debug!("Ignoring {}", name);
            continue;
        }

        if is_repository_root(entry.path())? {
            repositories.push(LocatedRepository {
                name,
                path: entry.into_path(),
            });
        }
    }

    log::info!(
        "Found {} repositories in {}",
        repositories.len(),
        root.display()
    );
    Ok(repositories)
}

/// Whether `dir` has a `.git` directory at its top level.
pub fn is_repository_root(dir: &Path) -> Result<bool> {
    let filesystem_error = |e: std::io::Error| Error::Filesystem {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(filesystem_error)? {
        let entry = entry.map_err(filesystem_error)?;
        if entry.file_name() == REPOSITORY_MARKER {
            return Ok(entry.file_type().map_err(filesystem_error)?.is_dir());
        }
    }
    Ok(false)
}
