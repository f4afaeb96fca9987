use log::trace;
use oxc_ast::ast::*;
use std::collections::HashSet;

use crate::{
    constants::DEFAULT_KEYWORD,
    keywords::{KeywordSet, TargetModules},
};

/// Outcome of the import pass over one file.
#[derive(Debug, Default)]
pub(crate) struct ResolvedImports {
    /// Local names bound to a target module's namespace (`import * as K`)
    pub(crate) namespaces: HashSet<String>,
    /// Keywords contributed by the imports themselves (named and default)
    pub(crate) keywords: KeywordSet,
}

/// First pass: classifies every binding imported from a target module.
pub(crate) fn resolve_imports(program: &Program<'_>, targets: &TargetModules) -> ResolvedImports {
    let mut resolved = ResolvedImports::default();

    for stmt in &program.body {
        let Statement::ImportDeclaration(decl) = stmt else { continue };
        if !targets.contains(decl.source.value.as_str()) {
            continue;
        }
        let Some(specifiers) = &decl.specifiers else {
            // import 'virtual:keywords'
            continue;
        };

        for spec in specifiers {
            match spec {
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    trace!("Namespace alias '{}' for '{}'", s.local.name, decl.source.value);
                    resolved.namespaces.insert(s.local.name.to_string());
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => {
                    resolved.keywords.insert(DEFAULT_KEYWORD.to_string());
                }
                ImportDeclarationSpecifier::ImportSpecifier(s) => match &s.imported {
                    // `import { "not-an-ident" as x }` cannot be re-exported as a binding
                    ModuleExportName::StringLiteral(lit) => {
                        trace!("Skipping string import name '{}'", lit.value);
                    }
                    imported => {
                        resolved.keywords.insert(imported.name().to_string());
                    }
                },
            }
        }
    }

    resolved
}
