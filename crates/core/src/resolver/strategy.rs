use crate::{
    analysis::StyleFacts,
    types::{GLOBAL_SCOPE, Region, RegionKind},
    utils::text::line_indent,
};

const INDENT_UNIT: &str = "    ";

/// How scope names map onto a file's regions, and how inserted text is indented.
///
/// Chosen once per file from its style facts.
pub trait ScopeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Region addressed by `scope`; `Global` means the entry code
    fn locate<'r>(&self, regions: &'r [Region], scope: &str) -> Option<&'r Region>;

    /// Indentation for statements inserted into `region`; `None` keeps the template's own
    fn indent_for(&self, region: &Region, source: &str) -> Option<String>;
}

/// Entry code written as bare top-level statements
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLevelStrategy;

/// Entry code wrapped in an explicit `Main` method
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryMethodStrategy;

impl ScopeStrategy for TopLevelStrategy {
    fn name(&self) -> &'static str {
        "top-level"
    }

    fn locate<'r>(&self, regions: &'r [Region], scope: &str) -> Option<&'r Region> {
        if scope.eq_ignore_ascii_case(GLOBAL_SCOPE) {
            return regions.iter().find(|r| r.kind == RegionKind::TopLevel);
        }
        named_method(regions, scope)
    }

    fn indent_for(&self, region: &Region, source: &str) -> Option<String> {
        match region.kind {
            RegionKind::TopLevel => None,
            _ => Some(measured_indent(region, source)),
        }
    }
}

impl ScopeStrategy for EntryMethodStrategy {
    fn name(&self) -> &'static str {
        "entry-method"
    }

    fn locate<'r>(&self, regions: &'r [Region], scope: &str) -> Option<&'r Region> {
        if scope.eq_ignore_ascii_case(GLOBAL_SCOPE) {
            return regions.iter().find(|r| r.kind == RegionKind::EntryMethod);
        }
        named_method(regions, scope)
    }

    fn indent_for(&self, region: &Region, source: &str) -> Option<String> {
        Some(measured_indent(region, source))
    }
}

pub fn strategy_for(facts: StyleFacts) -> &'static dyn ScopeStrategy {
    if facts.is_entry_point_top_level() {
        &TopLevelStrategy
    } else {
        &EntryMethodStrategy
    }
}

fn named_method<'r>(regions: &'r [Region], scope: &str) -> Option<&'r Region> {
    regions
        .iter()
        .find(|r| r.is_executable() && r.kind != RegionKind::TopLevel && r.has_name(scope))
}

/// Indent of the first item, or one level deeper than the opening brace's line
pub fn measured_indent(region: &Region, source: &str) -> String {
    if let Some(first) = region.items.first() {
        return line_indent(source, first.span.start).to_string();
    }
    match region.open_brace {
        Some(brace) => format!("{}{INDENT_UNIT}", line_indent(source, brace)),
        None => String::new(),
    }
}
