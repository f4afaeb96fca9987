use std::collections::BTreeSet;

use crate::config::KeywordsConfig;
use crate::constants::VIRTUAL_MODULE_ID;

/// Set of discovered keywords.
///
/// Ordered so that everything rendered from it is reproducible regardless of
/// which file finished scanning first.
pub type KeywordSet = BTreeSet<String>;

/// The virtual module name plus any additionally configured module names.
///
/// Import sources are matched against these literally; no module resolution
/// takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetModules {
    names: Vec<String>,
}

impl TargetModules {
    pub fn new(additional: &[String]) -> Self {
        let mut names = vec![VIRTUAL_MODULE_ID.to_string()];
        for name in additional {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Self { names }
    }

    pub fn contains(&self, source: &str) -> bool {
        self.names.iter().any(|n| n == source)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for TargetModules {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl From<&KeywordsConfig> for TargetModules {
    fn from(cfg: &KeywordsConfig) -> Self {
        Self::new(&cfg.additional_modules_to_scan)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub keywords: KeywordSet,
    pub files_scanned: usize,
    /// Files that could not be read or extracted and contributed nothing
    pub files_failed: usize,
}
