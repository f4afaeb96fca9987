use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use path_clean::clean;
use std::path::{Component, Path, PathBuf};

use crate::constants::{ALWAYS_IGNORED_DIRS, MARKUP_EXTENSIONS, SCRIPT_EXTENSIONS};

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Directories to skip, relative to `root` or absolute
    pub ignored_dirs: Vec<PathBuf>,
}

/// Whether `path` has an extension the extractor knows how to read.
pub fn is_candidate_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext) || MARKUP_EXTENSIONS.contains(&ext))
}

/// Absolute form of the configured ignore directories, symlinks resolved
/// where the directory exists so they compare against a canonical root.
pub fn resolve_ignored_dirs(root: &Path, ignored_dirs: &[PathBuf]) -> Vec<PathBuf> {
    ignored_dirs
        .iter()
        .map(|d| {
            let joined = root.join(d);
            joined.canonicalize().unwrap_or_else(|_| clean(joined))
        })
        .collect()
}

/// Whether `path` lies outside what [`collect_files`] walks: outside `root`,
/// inside a dependency directory, or under one of `ignored`.
///
/// `root` and `ignored` are expected in canonical form (see [`resolve_ignored_dirs`]).
pub fn is_ignored_path(root: &Path, ignored: &[PathBuf], path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return true;
    };
    let in_dependency_dir = rel.components().any(|c| {
        matches!(c, Component::Normal(name) if name.to_str().is_some_and(|n| ALWAYS_IGNORED_DIRS.contains(&n)))
    });
    in_dependency_dir || ignored.iter().any(|dir| path.starts_with(dir))
}

/// Lists every candidate source file under the root.
///
/// Honors `.gitignore` (even outside a git checkout), skips dependency
/// directories and the configured ignore list. Returned paths are absolute.
pub fn collect_files(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files");
    let root = cfg
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve project root {}", cfg.root.display()))?;
    let ignored = resolve_ignored_dirs(&root, &cfg.ignored_dirs);
    trace!("Ignored directories: {:?}", ignored);
    let filter_root = root.clone();

    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(&root)
        .hidden(false)
        .ignore(true)
        .git_ignore(true)
        .require_git(false)
        .filter_entry(move |dent| !is_excluded(dent, &filter_root, &ignored))
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };
        let p = dent.path();
        if !p.is_file() || !is_candidate_file(p) {
            continue;
        }
        trace!("Found source file: {}", p.display());
        files.push(p.to_path_buf());
    }

    debug!("Collected {} source files", files.len());
    Ok(files)
}

fn is_excluded(dent: &DirEntry, root: &Path, ignored: &[PathBuf]) -> bool {
    if dent.depth() == 0 {
        return false;
    }
    if is_ignored_path(root, ignored, dent.path()) {
        trace!("Skipping ignored path: {}", dent.path().display());
        return true;
    }
    false
}
