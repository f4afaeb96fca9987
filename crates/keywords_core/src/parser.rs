use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{ParseOptions, Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{borrow::Cow, path::Path};

use crate::constants::MARKUP_EXTENSIONS;

/// Parses `text` and hands the program to `f`.
///
/// Recoverable syntax errors still produce a program. Returns `None` only when
/// the parser gave up on the file entirely.
pub(crate) fn parse_with<R>(path: &Path, text: &str, f: impl FnOnce(&Program<'_>) -> R) -> Option<R> {
    let source = script_source(path, text);
    let st = source_type_for(path);
    let allocator = Allocator::default();
    let options = ParseOptions { allow_return_outside_function: true, ..ParseOptions::default() };
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, &source, st).with_options(options).parse();

    if panicked {
        debug!("Giving up on {}: {} syntax errors", path.display(), errors.len());
        return None;
    }
    if !errors.is_empty() {
        trace!("Recovered from {} syntax errors in {}", errors.len(), path.display());
    }

    Some(f(&program))
}

fn is_markup(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext))
}

pub(crate) fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    if is_markup(path) {
        return SourceType::default().with_module(true).with_typescript(true);
    }

    // .ts stays JSX-free so that `<T>value` casts parse
    SourceType::default()
        .with_module(true)
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
        .with_jsx(!matches!(ext, Some("ts") | Some("mts") | Some("cts")))
}

/// Script text of a file: the file itself, or the embedded scripts of a markup file.
pub(crate) fn script_source<'s>(path: &Path, text: &'s str) -> Cow<'s, str> {
    if !is_markup(path) {
        return Cow::Borrowed(text);
    }
    let frontmatter = path.extension().and_then(|e| e.to_str()) == Some("astro");
    Cow::Owned(markup_scripts(text, frontmatter))
}

fn markup_scripts(text: &str, frontmatter: bool) -> String {
    const OPEN: &str = "<script";
    const CLOSE: &str = "</script>";

    let mut blocks: Vec<&str> = Vec::new();
    let mut rest = text;

    if frontmatter
        && let Some(body) = rest.trim_start().strip_prefix("---")
        && let Some(end) = body.find("\n---")
    {
        blocks.push(&body[..end]);
        rest = &body[end + "\n---".len()..];
    }

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        if !after.starts_with(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/') {
            // <scripts-list>, <script-view>
            rest = after;
            continue;
        }
        let Some(open_end) = after.find('>') else { break };
        if after[..open_end].ends_with('/') {
            // <script src="..." />
            rest = &after[open_end + 1..];
            continue;
        }
        let body = &after[open_end + 1..];
        let Some(close) = body.find(CLOSE) else { break };
        blocks.push(&body[..close]);
        rest = &body[close + CLOSE.len()..];
    }

    trace!("Extracted {} script blocks from markup", blocks.len());
    blocks.join("\n")
}
