//! Renders a [`KeywordSet`] into the two generated artifacts.
//!
//! Both artifacts bind each keyword to an internal `_`-prefixed name and end
//! with the same export block, so the declaration file and the runtime module
//! expose identical export names. The set is ordered, which makes the output
//! byte-for-byte reproducible.

use anyhow::{Context, Result};
use log::debug;
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    constants::{KEYWORDS_DIR, TYPES_FILE},
    keywords::KeywordSet,
};

const INTERNAL_PREFIX: &str = "_";

/// Local name for `Symbol` in the runtime module. Never `_`-prefixed, so it
/// cannot collide with an internal binding.
const FACTORY: &str = "sym";

fn internal_name(keyword: &str) -> String {
    format!("{}{}", INTERNAL_PREFIX, keyword)
}

fn export_block(keywords: &KeywordSet) -> String {
    if keywords.is_empty() {
        return "export {};\n".to_string();
    }
    let mut out = String::from("export {\n");
    for keyword in keywords {
        let _ = writeln!(out, "  {} as {},", internal_name(keyword), keyword);
    }
    out.push_str("};\n");
    out
}

/// Type-only declaration: one `unique symbol` per keyword.
pub fn render_types(keywords: &KeywordSet) -> String {
    let mut out = String::new();
    for keyword in keywords {
        let _ = writeln!(out, "declare const {}: unique symbol;", internal_name(keyword));
    }
    if !keywords.is_empty() {
        out.push('\n');
    }
    out.push_str(&export_block(keywords));
    out
}

/// Runtime module served in place of the virtual import.
///
/// In development every symbol carries its keyword as description; otherwise
/// the symbols are created bare.
pub fn render_module(keywords: &KeywordSet, dev: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "const {} = Symbol;", FACTORY);
    for keyword in keywords {
        let label = if dev {
            // A JSON string is a valid JS string literal
            serde_json::to_string(keyword).unwrap_or_default()
        } else {
            String::new()
        };
        let _ = writeln!(out, "const {} = {}({});", internal_name(keyword), FACTORY, label);
    }
    out.push('\n');
    out.push_str(&export_block(keywords));
    out
}

/// Location of the declaration artifact for a project.
pub fn types_path(root: &Path) -> PathBuf {
    root.join(KEYWORDS_DIR).join(TYPES_FILE)
}

/// Writes the declaration artifact, replacing any previous one.
pub fn write_types(root: &Path, keywords: &KeywordSet) -> Result<PathBuf> {
    let path = types_path(root);
    let dir = root.join(KEYWORDS_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    fs::write(&path, render_types(keywords))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote {} keywords to {}", keywords.len(), path.display());
    Ok(path)
}
