use super::utils::{node_text, node_to_position};
use crate::{
    error::{Error, Result},
    types::{GLOBAL_SCOPE, Item, Region, RegionKind},
};
use tree_sitter::{Node, Tree};

/// Name of the method that wraps entry code in the explicit style
pub const ENTRY_METHOD: &str = "Main";

/// Walks a C# syntax tree and collects its named structural regions
pub struct RegionDetector;

impl Default for RegionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect_regions(&self, tree: &Tree, source: &str) -> Result<Vec<Region>> {
        let mut regions = Vec::new();
        let root_node = tree.root_node();

        if let Some(top_level) = self.top_level_region(&root_node) {
            regions.push(top_level);
        }

        self.visit_node(&root_node, source, &mut regions)?;

        Ok(regions)
    }

    fn top_level_region(&self, root: &Node) -> Option<Region> {
        let statements: Vec<Node> = root
            .named_children(&mut root.walk())
            .filter(|child| child.kind() == "global_statement")
            .collect();

        let first = statements.first()?;
        let last = statements.last()?;

        Some(Region {
            name: GLOBAL_SCOPE.to_string(),
            kind: RegionKind::TopLevel,
            start: node_to_position(first, true),
            end: node_to_position(last, false),
            open_brace: None,
            close_brace: None,
            items: statements.iter().map(to_item).collect(),
        })
    }

    fn visit_node(&self, node: &Node, source: &str, regions: &mut Vec<Region>) -> Result<()> {
        match node.kind() {
            "method_declaration" | "local_function_statement" => {
                self.handle_method(node, source, regions)?;
            }
            "class_declaration" | "struct_declaration" | "record_declaration" => {
                self.handle_type(node, source, regions)?;
            }
            _ => {}
        }

        for child in node.children(&mut node.walk()) {
            self.visit_node(&child, source, regions)?;
        }

        Ok(())
    }

    fn handle_method(&self, node: &Node, source: &str, regions: &mut Vec<Region>) -> Result<()> {
        let name_node = node
            .child_by_field_name("name")
            .ok_or_else(|| Error::ParseError("Method without name".to_string()))?;
        let name = name_node
            .utf8_text(source.as_bytes())
            .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in method name: {e}")))?
            .to_string();

        // Expression-bodied and abstract methods have no statements to target
        let Some(body) = node
            .child_by_field_name("body")
            .filter(|b| b.kind() == "block")
        else {
            return Ok(());
        };

        let kind = if name == ENTRY_METHOD && node.kind() == "method_declaration" {
            RegionKind::EntryMethod
        } else {
            RegionKind::Method
        };

        regions.push(braced_region(name, kind, &body));
        Ok(())
    }

    fn handle_type(&self, node: &Node, source: &str, regions: &mut Vec<Region>) -> Result<()> {
        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source).to_string())
            .ok_or_else(|| Error::ParseError("Type declaration without name".to_string()))?;

        // Positional records (`record Foo(int X);`) have no member list
        let Some(body) = node
            .child_by_field_name("body")
            .filter(|b| b.kind() == "declaration_list")
        else {
            return Ok(());
        };

        regions.push(braced_region(name, RegionKind::ClassBody, &body));
        Ok(())
    }
}

fn braced_region(name: String, kind: RegionKind, body: &Node) -> Region {
    let mut open_brace = None;
    let mut close_brace = None;
    let mut items = Vec::new();

    for child in body.children(&mut body.walk()) {
        match child.kind() {
            "{" => open_brace = Some(child.start_byte()),
            "}" => close_brace = Some(child.start_byte()),
            "comment" => {}
            _ if child.is_named() => items.push(to_item(&child)),
            _ => {}
        }
    }

    Region {
        name,
        kind,
        start: node_to_position(body, true),
        end: node_to_position(body, false),
        open_brace,
        close_brace,
        items,
    }
}

fn to_item(node: &Node) -> Item {
    Item {
        span: node.start_byte()..node.end_byte(),
        terminator: statement_terminator(node),
    }
}

/// Offset of the `;` closing a statement, looking through `global_statement` wrappers
fn statement_terminator(node: &Node) -> Option<usize> {
    let statement = if node.kind() == "global_statement" {
        node.named_child(0)?
    } else {
        *node
    };

    statement
        .children(&mut statement.walk())
        .last()
        .filter(|last| last.kind() == ";")
        .map(|last| last.start_byte())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CSharpParser;

    fn regions_of(source: &str) -> Vec<Region> {
        let mut parser = CSharpParser::new().unwrap();
        parser.get_regions(source).unwrap()
    }

    #[test]
    fn test_statement_terminators_are_recorded() {
        let source = "var builder = DistributedApplication.CreateBuilder(args);\nbuilder.Build().Run();\n";
        let regions = regions_of(source);
        let global = &regions[0];

        let first = &global.items[0];
        let terminator = first.terminator.expect("terminator");
        assert_eq!(&source[terminator..terminator + 1], ";");
        assert_eq!(terminator + 1, first.span.end);
    }

    #[test]
    fn test_comments_are_not_items() {
        let source = r#"class Program
{
    static void Main()
    {
        // leading comment
        System.Console.WriteLine("hi");
    }
}
"#;
        let regions = regions_of(source);
        let main = regions
            .iter()
            .find(|r| r.kind == RegionKind::EntryMethod)
            .unwrap();
        assert_eq!(main.items.len(), 1);
        assert!(main.open_brace.is_some());
        assert!(main.close_brace.is_some());
    }

    #[test]
    fn test_expression_bodied_method_has_no_region() {
        let source = "class C { int Value() => 42; }\n";
        let regions = regions_of(source);
        assert!(!regions.iter().any(|r| r.name == "Value"));
        assert!(regions.iter().any(|r| r.name == "C" && r.kind == RegionKind::ClassBody));
    }

    #[test]
    fn test_classes_after_top_level_statements() {
        let source = r#"var app = WebApplication.CreateBuilder(args).Build();
app.Run();

public partial class Program { }
"#;
        let regions = regions_of(source);
        assert_eq!(regions[0].kind, RegionKind::TopLevel);
        assert_eq!(regions[0].items.len(), 2);
        assert!(
            regions
                .iter()
                .any(|r| r.name == "Program" && r.kind == RegionKind::ClassBody)
        );
    }
}
