use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::constants::CONFIG_FILE;

/// Settings read from `keywords.config.json` in the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordsConfig {
    /// Module names treated exactly like the virtual module when matching imports
    pub additional_modules_to_scan: Vec<String>,
}

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        let git_dir = current_dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}

/// Loads the project configuration, falling back to defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<KeywordsConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
        return Ok(KeywordsConfig::default());
    }

    trace!("Reading config at: {:?}", path);
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_no_comments = strip_line_comments(&content);

    let cfg: KeywordsConfig = serde_json::from_str(&content_no_comments)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!("Loaded {} additional modules to scan", cfg.additional_modules_to_scan.len());
    Ok(cfg)
}

/// Removes `//` comments, leaving `//` inside string literals alone.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            for (idx, c) in line.char_indices() {
                match c {
                    _ if escaped => escaped = false,
                    '\\' if in_string => escaped = true,
                    '"' => in_string = !in_string,
                    '/' if !in_string && line[idx + 1..].starts_with('/') => return &line[..idx],
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
