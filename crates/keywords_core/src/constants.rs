//! Constants shared by the scanner, the emitters and the host plugin.
//!
//! ## Candidate Extensions
//!
//! - **Script**: `.ts`, `.tsx`, `.mts`, `.cts`, `.js`, `.jsx`, `.mjs`, `.cjs`
//! - **Markup**: `.vue`, `.svelte`, `.astro` (only their `<script>` blocks and
//!   frontmatter are parsed)

/// Module name application code imports keywords from.
pub const VIRTUAL_MODULE_ID: &str = "virtual:keywords";

/// Resolved form of [`VIRTUAL_MODULE_ID`] handed back to the host build tool.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:keywords";

/// Directory (relative to the project root) holding generated declarations
pub const KEYWORDS_DIR: &str = ".keywords";

/// File name of the generated type declaration artifact
pub const TYPES_FILE: &str = "index.d.ts";

/// Optional per-project configuration file, looked up in the project root
pub const CONFIG_FILE: &str = "keywords.config.json";

/// Keyword contributed by any default import of a target module
pub const DEFAULT_KEYWORD: &str = "default";

/// Number of files read and extracted concurrently before moving to the next batch
pub const BATCH_SIZE: usize = 100;

/// Script extensions parsed as a whole
pub const SCRIPT_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
];

/// Component markup extensions whose embedded scripts are parsed
pub const MARKUP_EXTENSIONS: &[&str] = &["vue", "svelte", "astro"];

/// Directories never descended into, regardless of ignore rules
pub const ALWAYS_IGNORED_DIRS: &[&str] = &["node_modules", ".git", KEYWORDS_DIR];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_id_wraps_virtual_id() {
        assert_eq!(RESOLVED_VIRTUAL_MODULE_ID.strip_prefix('\0'), Some(VIRTUAL_MODULE_ID));
    }

    #[test]
    fn test_script_and_markup_extensions_disjoint() {
        for ext in MARKUP_EXTENSIONS {
            assert!(
                !SCRIPT_EXTENSIONS.contains(ext),
                "'{}' is listed as both script and markup",
                ext
            );
        }
        assert_eq!(SCRIPT_EXTENSIONS.len(), 8);
    }

    #[test]
    fn test_typescript_module_extensions_included() {
        assert!(SCRIPT_EXTENSIONS.contains(&"mts"));
        assert!(SCRIPT_EXTENSIONS.contains(&"cts"));
    }
}
