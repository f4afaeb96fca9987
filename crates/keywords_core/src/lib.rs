//! Static keyword interning for JavaScript/TypeScript projects.
//!
//! Application code imports symbolic keys from a virtual module
//! (`import * as K from 'virtual:keywords'`) and refers to them by name. This
//! crate finds every such name across a project and generates:
//! - `.keywords/index.d.ts`, declaring one `unique symbol` per keyword
//! - the runtime module the build tool serves for the virtual import, binding
//!   each keyword to a fresh `Symbol`
//!
//! Discovery is a two-pass walk per file: imports from the virtual module (or
//! any configured equivalent) are classified first, then property accesses and
//! qualified type names rooted at a namespace import are collected.
//!
//! # Examples
//!
//! ```no_run
//! use keywords_core::{KeywordsConfig, LogLogger, generate_types, load_config};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = Path::new("/path/to/project");
//! let config = load_config(root)?;
//! let keywords = generate_types(root, &LogLogger, &[], &config)?;
//! println!("{} keywords", keywords.len());
//! # Ok(())
//! # }
//! ```

mod aggregator;
mod collector;
mod config;
mod constants;
mod emitter;
mod extractor;
mod filter;
mod generate;
mod keywords;
mod logger;
mod parser;
mod plugin;
mod resolver;
mod scanner;

// Re-export public API
pub use aggregator::aggregate;
pub use collector::{
    CollectorConfig, collect_files, is_candidate_file, is_ignored_path, resolve_ignored_dirs,
};
pub use config::{KeywordsConfig, find_git_root, load_config};
pub use constants::{
    BATCH_SIZE, CONFIG_FILE, DEFAULT_KEYWORD, KEYWORDS_DIR, RESOLVED_VIRTUAL_MODULE_ID,
    TYPES_FILE, VIRTUAL_MODULE_ID,
};
pub use emitter::{render_module, render_types, types_path, write_types};
pub use extractor::Extractor;
pub use filter::may_reference;
pub use generate::{generate_types, scan_project};
pub use keywords::{KeywordSet, ScanResult, TargetModules};
pub use logger::{LogLogger, Logger};
pub use plugin::KeywordsPlugin;
