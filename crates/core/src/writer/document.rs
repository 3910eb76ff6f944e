use crate::{
    analysis::SourceFile,
    config::InsertPosition,
    error::{Error, Result},
    parser::utils::node_text,
    resolver::{Anchor, ResolvedTarget, measured_indent},
    types::Region,
    utils::text::{line_indent, line_start, next_line_start, reindent, squash, starts_line},
};
use std::ops::Range;
use tracing::trace;

/// Splices rendered edits into a [`SourceFile`].
///
/// Only the bytes at the insertion point change; the rest of the file keeps
/// its layout.
pub struct DocumentWriter;

impl DocumentWriter {
    /// Insert or substitute `text` at `target`
    pub fn apply(
        file: &mut SourceFile,
        target: &ResolvedTarget,
        position: InsertPosition,
        text: &str,
    ) -> Result<()> {
        let (range, replacement) = plan(file.source(), file.newline(), target, position, text)?;
        trace!("{:?} {:?} in {}: {:?}", position, range, target.scope, replacement);
        file.splice(range, &replacement)
    }

    /// Append a member declaration just before the closing brace of `class`
    pub fn insert_member(file: &mut SourceFile, class: &Region, text: &str) -> Result<()> {
        let source = file.source();
        let nl = file.newline();
        let close = class.close_brace.ok_or_else(|| {
            Error::ParseError(format!("class {} has no closing brace", class.name))
        })?;
        let indent = measured_indent(class, source);
        let rendered = reindent(text, Some(&indent), nl);

        let (at, replacement) = if starts_line(source, close) {
            (line_start(source, close), format!("{rendered}{nl}"))
        } else {
            (
                close,
                format!("{nl}{rendered}{nl}{}", line_indent(source, close)),
            )
        };
        file.splice(at..at, &replacement)
    }

    /// Add `using namespace;` after the existing directives unless already imported.
    ///
    /// In a file without directives the new one goes first, followed by a
    /// blank line. Returns whether the file changed.
    pub fn ensure_using(file: &mut SourceFile, namespace: &str) -> Result<bool> {
        let wanted = format!("using{};", squash(namespace));
        let root = file.tree().root_node();
        let imported = root
            .named_children(&mut root.walk())
            .filter(|n| n.kind() == "using_directive")
            .any(|n| squash(node_text(&n, file.source())).ends_with(&wanted));
        if imported {
            return Ok(false);
        }

        let last = root
            .named_children(&mut root.walk())
            .filter(|n| n.kind() == "using_directive")
            .last()
            .map(|n| n.end_byte());

        let source = file.source();
        let nl = file.newline();
        let directive = format!("using {};", namespace.trim());
        let (at, text) = match last {
            Some(end) => {
                let at = next_line_start(source, end);
                if at == source.len() && !source.ends_with('\n') {
                    (at, format!("{nl}{directive}{nl}"))
                } else {
                    (at, format!("{directive}{nl}"))
                }
            }
            None if source.starts_with(nl) => (0, format!("{directive}{nl}")),
            None => (0, format!("{directive}{nl}{nl}")),
        };
        file.splice(at..at, &text)?;
        Ok(true)
    }
}

fn plan(
    source: &str,
    nl: &str,
    target: &ResolvedTarget,
    position: InsertPosition,
    text: &str,
) -> Result<(Range<usize>, String)> {
    let rendered = reindent(text, target.indent.as_deref(), nl);

    match (&target.anchor, position) {
        (Anchor::ScopeStart { range, inline_close }, _) => {
            let replacement = match inline_close {
                Some(close_indent) => format!("{nl}{rendered}{nl}{close_indent}"),
                None => format!("{rendered}{nl}"),
            };
            Ok((range.clone(), replacement))
        }

        (Anchor::Statement { span, .. }, InsertPosition::Before) => {
            if starts_line(source, span.start) {
                let at = line_start(source, span.start);
                Ok((at..at, format!("{rendered}{nl}")))
            } else {
                let indent = line_indent(source, span.start);
                Ok((
                    span.start..span.start,
                    format!("{}{nl}{indent}", rendered.trim_start()),
                ))
            }
        }

        (Anchor::Statement { span, .. }, InsertPosition::After) => {
            let at = next_line_start(source, span.end);
            if at == source.len() && !source.ends_with('\n') {
                Ok((at..at, format!("{nl}{rendered}{nl}")))
            } else {
                Ok((at..at, format!("{rendered}{nl}")))
            }
        }

        (Anchor::Statement { span, .. }, InsertPosition::Replace) => {
            if starts_line(source, span.start) {
                Ok((line_start(source, span.start)..span.end, rendered))
            } else {
                Ok((span.clone(), rendered.trim_start().to_string()))
            }
        }

        (Anchor::Statement { terminator, .. }, InsertPosition::Chain) => {
            let at = terminator.ok_or_else(|| {
                Error::Other(format!("no terminator to chain onto in {}", target.scope))
            })?;
            Ok((at..at, text.trim().to_string()))
        }
    }
}
