//! Discovery of the symbolic names a host project uses to reference other projects.
//!
//! The host build generates one class per referenced project inside the
//! `Projects` namespace, each exposing the referenced project file through a
//! `ProjectPath` property:
//!
//! ```csharp
//! namespace Projects;
//! public class Shop_Api : global::Aspire.Hosting.IProjectMetadata
//! {
//!     public string ProjectPath => """/src/Shop.Api/Shop.Api.csproj""";
//! }
//! ```

use super::source_file::SourceFile;
use crate::parser::utils::node_text;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use tree_sitter::Node;

const GENERATED_NAMESPACE: &str = "Projects";
const PATH_PROPERTY: &str = "ProjectPath";

/// Generated project-reference names keyed by normalized project path.
///
/// Built once from the host project and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectReferences {
    by_path: BTreeMap<String, String>,
}

impl ProjectReferences {
    pub fn discover(units: &[SourceFile]) -> Self {
        let mut by_path = BTreeMap::new();
        for unit in units {
            collect_references(&unit.tree().root_node(), unit.source(), &mut by_path);
        }
        debug!("Discovered {} generated project references", by_path.len());
        Self { by_path }
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Generated name for `project_file`, if the host declares one
    pub fn lookup(&self, project_file: &Path) -> Option<&str> {
        let key = normalize_path(&project_file.to_string_lossy());
        if let Some(name) = self.by_path.get(&key) {
            return Some(name.as_str());
        }

        let canonical = std::fs::canonicalize(project_file)
            .map(|p| normalize_path(&p.to_string_lossy()))
            .ok();
        if let Some(name) = canonical.and_then(|c| self.by_path.get(&c)) {
            return Some(name.as_str());
        }

        // Paths recorded on another machine still identify the project by file name
        let file_name = file_name_of(&key)?;
        let mut matches = self
            .by_path
            .iter()
            .filter(|(path, _)| file_name_of(path) == Some(file_name));
        match (matches.next(), matches.next()) {
            (Some((_, name)), None) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Generated name for `project_file`, falling back to the generator's naming rule
    pub fn reference_for(&self, project_file: &Path) -> String {
        match self.lookup(project_file) {
            Some(name) => name.to_string(),
            None => conventional_reference(project_file),
        }
    }
}

/// `Projects.Shop_Api` for `Shop.Api.csproj`
pub fn conventional_reference(project_file: &Path) -> String {
    let stem = project_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let identifier: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{GENERATED_NAMESPACE}.{identifier}")
}

fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/").to_lowercase()
}

fn file_name_of(normalized: &str) -> Option<&str> {
    normalized.rsplit('/').next().filter(|n| !n.is_empty())
}

fn collect_references(node: &Node, source: &str, by_path: &mut BTreeMap<String, String>) {
    if node.kind() == "class_declaration"
        && enclosing_namespace(node, source).as_deref() == Some(GENERATED_NAMESPACE)
    {
        let class_name = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source));
        if let (Some(class_name), Some(path)) = (class_name, project_path_value(node, source)) {
            by_path
                .entry(normalize_path(&path))
                .or_insert_with(|| format!("{GENERATED_NAMESPACE}.{class_name}"));
        }
        return;
    }

    for child in node.children(&mut node.walk()) {
        collect_references(&child, source, by_path);
    }
}

fn enclosing_namespace(node: &Node, source: &str) -> Option<String> {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if matches!(
            parent.kind(),
            "namespace_declaration" | "file_scoped_namespace_declaration"
        ) {
            return namespace_name(&parent, source);
        }
        if parent.kind() == "compilation_unit" {
            break;
        }
        current = parent;
    }

    // `namespace Projects;` precedes the declarations it applies to
    let mut sibling = current.prev_named_sibling();
    while let Some(s) = sibling {
        if s.kind() == "file_scoped_namespace_declaration" {
            return namespace_name(&s, source);
        }
        sibling = s.prev_named_sibling();
    }
    None
}

fn namespace_name(namespace: &Node, source: &str) -> Option<String> {
    namespace
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).trim().to_string())
}

fn project_path_value(class: &Node, source: &str) -> Option<String> {
    let body = class.child_by_field_name("body")?;
    let property = body
        .named_children(&mut body.walk())
        .filter(|member| member.kind() == "property_declaration")
        .find(|member| {
            member
                .child_by_field_name("name")
                .is_some_and(|n| node_text(&n, source) == PATH_PROPERTY)
        })?;
    let literal = find_string_literal(&property)?;
    unquote(node_text(&literal, source))
}

fn find_string_literal<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    if matches!(
        node.kind(),
        "string_literal" | "verbatim_string_literal" | "raw_string_literal"
    ) {
        return Some(*node);
    }
    node.children(&mut node.walk())
        .find_map(|child| find_string_literal(&child))
}

fn unquote(literal: &str) -> Option<String> {
    let literal = literal.trim();
    if let Some(rest) = literal.strip_prefix("\"\"\"") {
        let inner = rest.trim_end_matches('"');
        return Some(inner.trim().to_string());
    }
    if let Some(rest) = literal.strip_prefix("@\"") {
        let inner = rest.strip_suffix('"')?;
        return Some(inner.replace("\"\"", "\""));
    }
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\\\\", "\\").replace("\\\"", "\""))
}
