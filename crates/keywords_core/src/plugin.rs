use anyhow::Result;
use ignore::gitignore::Gitignore;
use log::{debug, trace};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    collector::{is_candidate_file, is_ignored_path, resolve_ignored_dirs},
    config::KeywordsConfig,
    constants::{RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID},
    emitter::{render_module, write_types},
    extractor::Extractor,
    generate::generate_types,
    keywords::{KeywordSet, TargetModules},
    logger::Logger,
};

/// Build-tool integration: serves the runtime module behind the virtual
/// import and keeps the keyword set current while files change.
pub struct KeywordsPlugin {
    root: PathBuf,
    config: KeywordsConfig,
    ignored_dirs: Vec<PathBuf>,
    /// Canonical root and ignore dirs, for matching changed paths
    canonical_root: PathBuf,
    resolved_ignored: Vec<PathBuf>,
    /// Rules from the root `.gitignore`
    gitignore: Gitignore,
    dev: bool,
    extractor: Extractor,
    keywords: KeywordSet,
}

impl KeywordsPlugin {
    pub fn new(root: PathBuf, config: KeywordsConfig, ignored_dirs: Vec<PathBuf>, dev: bool) -> Self {
        let extractor = Extractor::new(TargetModules::from(&config));
        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.clone());
        let resolved_ignored = resolve_ignored_dirs(&canonical_root, &ignored_dirs);
        let gitignore_path = canonical_root.join(".gitignore");
        let gitignore = if gitignore_path.is_file() {
            let (gitignore, err) = Gitignore::new(&gitignore_path);
            if let Some(err) = err {
                debug!("Partially invalid {}: {}", gitignore_path.display(), err);
            }
            gitignore
        } else {
            Gitignore::empty()
        };
        Self {
            root,
            config,
            ignored_dirs,
            canonical_root,
            resolved_ignored,
            gitignore,
            dev,
            extractor,
            keywords: KeywordSet::new(),
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Full scan; also writes the declaration file.
    pub fn build_start(&mut self, logger: &dyn Logger) -> Result<()> {
        self.keywords = generate_types(&self.root, logger, &self.ignored_dirs, &self.config)?;
        Ok(())
    }

    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        (id == VIRTUAL_MODULE_ID).then_some(RESOLVED_VIRTUAL_MODULE_ID)
    }

    pub fn load(&self, id: &str) -> Option<String> {
        (id == RESOLVED_VIRTUAL_MODULE_ID).then(|| render_module(&self.keywords, self.dev))
    }

    /// Re-extracts one changed file.
    ///
    /// Returns `true` when it introduced new keywords, in which case the
    /// declaration file has been rewritten and the host should reload the
    /// virtual module. Keywords are never removed during a session. Files
    /// the full scan would skip are ignored here too.
    pub fn handle_file_change(&mut self, path: &Path, logger: &dyn Logger) -> Result<bool> {
        if !is_candidate_file(path) || self.is_excluded(path) {
            trace!("Ignoring change to {}", path.display());
            return Ok(false);
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                logger.warn(&format!("Failed to read {}: {}", path.display(), err));
                return Ok(false);
            }
        };

        let before = self.keywords.len();
        self.keywords.extend(self.extractor.extract(path, &text));
        if self.keywords.len() == before {
            return Ok(false);
        }

        debug!("{} added {} keywords", path.display(), self.keywords.len() - before);
        write_types(&self.root, &self.keywords)?;
        Ok(true)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        // Resolve the parent only, so deleted files still compare canonically
        let path = match (path.parent().and_then(|p| p.canonicalize().ok()), path.file_name()) {
            (Some(parent), Some(name)) => parent.join(name),
            _ => path.to_path_buf(),
        };
        if is_ignored_path(&self.canonical_root, &self.resolved_ignored, &path) {
            return true;
        }
        self.gitignore.matched_path_or_any_parents(&path, false).is_ignore()
    }
}
