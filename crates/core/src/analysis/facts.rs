//! Authoring-style classification of a single compilation unit

use crate::parser::utils::node_text;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

/// Invocations that only appear in the verbose host-builder bootstrap
const VERBOSE_BUILDER_CALLS: &[&str] = &["ConfigureWebHostDefaults", "ConfigureWebHost", "UseStartup"];

/// Method that carries the services block of a `Startup` class
const SERVICES_METHOD: &str = "ConfigureServices";

/// Style facts of one file, computed once when the file is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleFacts {
    /// Entry code is a bare statement sequence rather than an explicit method
    pub top_level_statements: bool,
    /// Bootstrap uses direct builder calls, without a host-builder/services block
    pub minimal_setup: bool,
}

impl StyleFacts {
    pub fn analyze(tree: &Tree, source: &str) -> Self {
        let root = tree.root_node();
        let top_level_statements = root
            .named_children(&mut root.walk())
            .any(|child| child.kind() == "global_statement");

        Self {
            top_level_statements,
            minimal_setup: !has_verbose_setup(&root, source),
        }
    }

    pub fn is_entry_point_top_level(&self) -> bool {
        self.top_level_statements
    }

    pub fn is_minimal_setup(&self) -> bool {
        self.minimal_setup
    }
}

fn has_verbose_setup(node: &Node, source: &str) -> bool {
    match node.kind() {
        "method_declaration" => {
            let declares_services = node
                .child_by_field_name("name")
                .is_some_and(|name| node_text(&name, source) == SERVICES_METHOD);
            if declares_services {
                return true;
            }
        }
        "invocation_expression" => {
            if let Some(callee) = invoked_member_name(node, source) {
                if VERBOSE_BUILDER_CALLS.contains(&callee) {
                    return true;
                }
            }
        }
        _ => {}
    }

    node.children(&mut node.walk())
        .any(|child| has_verbose_setup(&child, source))
}

/// `UseStartup` for `web.UseStartup<Startup>()`, `Build` for `builder.Build()`
fn invoked_member_name<'a>(invocation: &Node, source: &'a str) -> Option<&'a str> {
    let function = invocation.child_by_field_name("function")?;
    let name_node = match function.kind() {
        "member_access_expression" => function.child_by_field_name("name")?,
        _ => function,
    };
    let text = node_text(&name_node, source);
    Some(text.split('<').next().unwrap_or(text).trim())
}
