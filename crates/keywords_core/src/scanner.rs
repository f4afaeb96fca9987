use log::trace;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use std::collections::HashSet;

use crate::keywords::KeywordSet;

/// Second pass: collects every property reached through a namespace alias.
///
/// Handles value positions (`K.foo`, `K?.foo`, `K.foo = x`) and type
/// positions (`let x: K.foo`, `typeof K.foo`). Computed access (`K[name]`)
/// is never a keyword. Scoping is flat: a shadowing local named like the
/// alias still counts.
pub(crate) struct UsageScanner<'n> {
    namespaces: &'n HashSet<String>,
    keywords: KeywordSet,
}

impl<'n> UsageScanner<'n> {
    pub(crate) fn new(namespaces: &'n HashSet<String>) -> Self {
        Self { namespaces, keywords: KeywordSet::new() }
    }

    pub(crate) fn scan(mut self, program: &Program<'_>) -> KeywordSet {
        self.visit_program(program);
        self.keywords
    }

    fn record(&mut self, alias: &str, property: &str) {
        if self.namespaces.contains(alias) {
            trace!("Keyword '{}' via '{}'", property, alias);
            self.keywords.insert(property.to_string());
        }
    }
}

impl<'a> Visit<'a> for UsageScanner<'_> {
    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        if let Expression::Identifier(object) = &it.object {
            self.record(object.name.as_str(), it.property.name.as_str());
        }
        walk::walk_static_member_expression(self, it);
    }

    fn visit_ts_qualified_name(&mut self, it: &TSQualifiedName<'a>) {
        if let TSTypeName::IdentifierReference(left) = &it.left {
            self.record(left.name.as_str(), it.right.name.as_str());
        }
        walk::walk_ts_qualified_name(self, it);
    }
}
