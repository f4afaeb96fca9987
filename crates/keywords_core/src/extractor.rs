use log::{debug, trace};
use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    filter::may_reference,
    keywords::{KeywordSet, TargetModules},
    parser::parse_with,
    resolver::resolve_imports,
    scanner::UsageScanner,
};

/// Per-file keyword extraction: fast-path filter, parse, import pass, usage pass.
///
/// Safe to share across threads; each call works on its own syntax tree.
#[derive(Debug)]
pub struct Extractor {
    targets: TargetModules,
    parses: AtomicUsize,
}

impl Extractor {
    pub fn new(targets: TargetModules) -> Self {
        Self { targets, parses: AtomicUsize::new(0) }
    }

    pub fn targets(&self) -> &TargetModules {
        &self.targets
    }

    /// Number of files handed to the parser so far.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }

    /// Keywords referenced by one file. A file that cannot be parsed yields none.
    pub fn extract(&self, path: &Path, text: &str) -> KeywordSet {
        if !may_reference(text, &self.targets) {
            trace!("Skipping {}: no target module mentioned", path.display());
            return KeywordSet::new();
        }

        self.parses.fetch_add(1, Ordering::Relaxed);
        let keywords = parse_with(path, text, |program| {
            let resolved = resolve_imports(program, &self.targets);
            let mut keywords = resolved.keywords;
            if !resolved.namespaces.is_empty() {
                keywords.extend(UsageScanner::new(&resolved.namespaces).scan(program));
            }
            keywords
        })
        .unwrap_or_default();

        debug!("Found {} keywords in {}", keywords.len(), path.display());
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        Extractor::new(TargetModules::default())
            .extract(Path::new("test.ts"), text)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_namespace_member() {
        assert_eq!(extract("import * as K from 'virtual:keywords'; K.foo;"), vec!["foo"]);
    }

    #[test]
    fn test_named_import() {
        assert_eq!(extract("import { bar } from 'virtual:keywords';"), vec!["bar"]);
    }

    #[test]
    fn test_default_import() {
        assert_eq!(extract("import Def from 'virtual:keywords';"), vec!["default"]);
    }

    #[test]
    fn test_computed_access() {
        let text = "import * as K from 'virtual:keywords'; const name = 'foo'; K[name];";
        assert!(extract(text).is_empty());
    }

    #[test]
    fn test_type_reference() {
        assert_eq!(extract("import * as K from 'virtual:keywords'; let x: K.baz;"), vec!["baz"]);
    }

    #[test]
    fn test_mixed_sources() {
        let text = r#"
import Def, * as K from 'virtual:keywords';
import { open as openKey } from 'virtual:keywords';
import * as Other from 'other';
const handlers = { [K.close]: 1, [openKey]: 2 };
Other.ignored;
let t: K.Status;
"#;
        assert_eq!(extract(text), vec!["Status", "close", "default", "open"]);
    }

    #[test]
    fn test_alias_from_other_file_not_resolved() {
        // K is not imported here, so K.foo is just a property access
        assert!(extract("// virtual:keywords\nK.foo;").is_empty());
    }

    #[test]
    fn test_fast_path_skips_parser() {
        let extractor = Extractor::new(TargetModules::default());
        let keywords = extractor.extract(Path::new("a.ts"), "import * as K from 'other'; K.foo;");
        assert!(keywords.is_empty());
        assert_eq!(extractor.parse_count(), 0);

        extractor.extract(Path::new("b.ts"), "import { x } from 'virtual:keywords';");
        assert_eq!(extractor.parse_count(), 1);
    }

    #[test]
    fn test_parse_failure_yields_nothing() {
        let extractor = Extractor::new(TargetModules::default());
        let keywords = extractor
            .extract(Path::new("bad.ts"), "import * as K from 'virtual:keywords';\nK.foo;\nfunction (");
        assert!(keywords.is_empty());
        assert_eq!(extractor.parse_count(), 1);
    }

    #[test]
    fn test_additional_module_with_markup() {
        let extractor = Extractor::new(TargetModules::new(&["@app/keys".to_string()]));
        let text = "<script lang=\"ts\">\nimport * as A from '@app/keys';\nA.selected;\n</script>\n<div />";
        let keywords = extractor.extract(Path::new("Item.svelte"), text);
        assert_eq!(keywords.into_iter().collect::<Vec<_>>(), vec!["selected"]);
    }
}
