use super::strategy::ScopeStrategy;
use crate::{
    config::InsertPosition,
    types::Region,
    utils::text::{line_indent, line_start, next_line_start, squash, starts_line},
};
use std::ops::Range;

/// Why an edit found no place to land
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveMiss {
    #[error("scope '{0}' not found")]
    ScopeNotFound(String),

    #[error("no statement in '{scope}' matches `{pattern}`")]
    AnchorNotFound { scope: String, pattern: String },

    #[error("'{position}' needs an anchor statement")]
    MissingAnchor { position: InsertPosition },

    #[error("statement matching `{pattern}` has no `;` to chain onto")]
    NotChainable { pattern: String },
}

/// Where in the text an edit lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// A matched statement
    Statement {
        span: Range<usize>,
        terminator: Option<usize>,
    },
    /// Top of the scope, for edits without an anchor pattern
    ScopeStart {
        /// Empty, or the blank between braces that share a line
        range: Range<usize>,
        /// Indent of the closing brace when it shares the opening brace's line
        inline_close: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub scope: String,
    pub anchor: Anchor,
    pub indent: Option<String>,
}

/// Find the insertion point for an edit in `scope`.
///
/// `pattern` is matched against each direct statement of the scope with all
/// whitespace removed; the first statement in source order wins.
pub fn resolve(
    strategy: &dyn ScopeStrategy,
    regions: &[Region],
    source: &str,
    scope: &str,
    pattern: Option<&str>,
    position: InsertPosition,
) -> Result<ResolvedTarget, ResolveMiss> {
    let region = strategy
        .locate(regions, scope)
        .ok_or_else(|| ResolveMiss::ScopeNotFound(scope.to_string()))?;
    let indent = strategy.indent_for(region, source);

    let Some(pattern) = pattern else {
        if matches!(position, InsertPosition::Replace | InsertPosition::Chain) {
            return Err(ResolveMiss::MissingAnchor { position });
        }
        return Ok(ResolvedTarget {
            scope: region.name.clone(),
            anchor: scope_start(region, source),
            indent,
        });
    };

    let needle = squash(pattern);
    let item = region
        .items
        .iter()
        .find(|item| squash(&source[item.span.clone()]).contains(&needle))
        .ok_or_else(|| ResolveMiss::AnchorNotFound {
            scope: scope.to_string(),
            pattern: pattern.to_string(),
        })?;

    if position == InsertPosition::Chain && item.terminator.is_none() {
        return Err(ResolveMiss::NotChainable {
            pattern: pattern.to_string(),
        });
    }

    Ok(ResolvedTarget {
        scope: region.name.clone(),
        anchor: Anchor::Statement {
            span: item.span.clone(),
            terminator: item.terminator,
        },
        indent,
    })
}

fn scope_start(region: &Region, source: &str) -> Anchor {
    if let Some(first) = region.items.first() {
        let offset = if starts_line(source, first.span.start) {
            line_start(source, first.span.start)
        } else {
            first.span.start
        };
        return Anchor::ScopeStart {
            range: offset..offset,
            inline_close: None,
        };
    }

    match (region.open_brace, region.close_brace) {
        (Some(open), Some(close)) if line_start(source, open) == line_start(source, close) => {
            Anchor::ScopeStart {
                range: open + 1..close,
                inline_close: Some(line_indent(source, open).to_string()),
            }
        }
        (Some(open), _) => {
            let offset = next_line_start(source, open);
            Anchor::ScopeStart {
                range: offset..offset,
                inline_close: None,
            }
        }
        (None, _) => Anchor::ScopeStart {
            range: 0..0,
            inline_close: None,
        },
    }
}
