//! Declared-variable types and call-receiver resolution
//!
//! The table is flat: every declared name in the unit maps to the type text
//! of its first declaration. That is enough to classify the receivers the
//! deprecated-API rewrite cares about without a full type checker.

use crate::constants::{is_class_type, is_file_type};
use crate::models::Node;
use std::collections::HashMap;
use tree_sitter::Node as TsNode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    types: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every variable declaration reachable from `root`.
    pub fn collect(root: TsNode<'_>, source: &str) -> Self {
        let mut table = Self::new();
        let mut stack = vec![root];
        let mut ordered = Vec::new();
        // Pre-order so the first declaration in source order wins.
        while let Some(node) = stack.pop() {
            ordered.push(node);
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        for node in ordered {
            table.record(node, source);
        }
        table
    }

    fn record(&mut self, node: TsNode<'_>, source: &str) {
        let text = |n: TsNode<'_>| source.get(n.byte_range()).unwrap_or_default().trim().to_string();
        match node.kind() {
            "local_variable_declaration" | "field_declaration" => {
                let Some(type_node) = node.child_by_field_name("type") else {
                    return;
                };
                let type_name = text(type_node);
                let mut cursor = node.walk();
                let names: Vec<_> = node
                    .children_by_field_name("declarator", &mut cursor)
                    .filter_map(|declarator| declarator.child_by_field_name("name"))
                    .map(text)
                    .collect();
                for name in names {
                    self.declare(name, type_name.clone());
                }
            }
            "formal_parameter" | "enhanced_for_statement" | "resource" => {
                if let (Some(type_node), Some(name)) =
                    (node.child_by_field_name("type"), node.child_by_field_name("name"))
                {
                    self.declare(text(name), text(type_node));
                }
            }
            "catch_formal_parameter" => {
                let mut cursor = node.walk();
                let catch_type = node
                    .named_children(&mut cursor)
                    .find(|child| child.kind() == "catch_type");
                if let (Some(type_node), Some(name)) = (catch_type, node.child_by_field_name("name")) {
                    self.declare(text(name), text(type_node));
                }
            }
            _ => {}
        }
    }

    /// Record `name: type_name` unless `name` is already declared.
    pub fn declare(&mut self, name: impl Into<String>, type_name: impl Into<String>) {
        self.types.entry(name.into()).or_insert_with(|| type_name.into());
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Static type of a call receiver, if it can be determined.
    ///
    /// Resolves declared identifiers, object creations, class literals and
    /// parenthesised forms of these; anything else is unresolved.
    pub fn resolve_receiver(&self, receiver: &Node) -> Option<String> {
        match receiver {
            Node::Identifier(name) => self.type_of(name).map(str::to_string),
            Node::ObjectCreation(creation) => Some(creation.type_name.clone()),
            Node::Verbatim(verbatim) if verbatim.kind == "class_literal" => Some("Class".to_string()),
            Node::Verbatim(verbatim) if verbatim.kind == "parenthesized_expression" => {
                let mut inner = verbatim.children();
                match (inner.next(), inner.next()) {
                    (Some(only), None) => self.resolve_receiver(only),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn is_file_like(&self, receiver: &Node) -> Option<bool> {
        self.resolve_receiver(receiver).map(|ty| is_file_type(&ty))
    }

    pub fn is_class_like(&self, receiver: &Node) -> Option<bool> {
        self.resolve_receiver(receiver).map(|ty| is_class_type(&ty))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{MethodCall, Node};
    use crate::parser::parse;

    fn receivers(source: &str) -> Vec<Node> {
        let unit = parse(source).unwrap();
        let mut found = Vec::new();
        unit.root().walk(&mut |node| {
            if let Node::MethodCall(MethodCall { receiver: Some(receiver), .. }) = node {
                found.push((**receiver).clone());
            }
        });
        found
    }

    #[test]
    fn test_collects_all_declaration_forms() {
        let source = r"
            class A {
                private java.io.File root;
                void f(File dir, Class<?> type) throws Exception {
                    String a = null, b = null;
                    for (File child : dir.listFiles()) { }
                    try (java.io.FileReader reader = new java.io.FileReader(dir)) {
                    } catch (java.io.IOException | RuntimeException e) { }
                }
            }";
        let unit = parse(source).unwrap();
        let symbols = unit.symbols();
        assert_eq!(symbols.type_of("root"), Some("java.io.File"));
        assert_eq!(symbols.type_of("dir"), Some("File"));
        assert_eq!(symbols.type_of("type"), Some("Class<?>"));
        assert_eq!(symbols.type_of("a"), Some("String"));
        assert_eq!(symbols.type_of("b"), Some("String"));
        assert_eq!(symbols.type_of("child"), Some("File"));
        assert_eq!(symbols.type_of("reader"), Some("java.io.FileReader"));
        assert_eq!(symbols.type_of("e"), Some("java.io.IOException | RuntimeException"));
        assert_eq!(symbols.type_of("missing"), None);
    }

    #[test]
    fn test_first_declaration_wins() {
        let unit = parse("class A { void f() { File x = null; } void g() { String x = null; } }").unwrap();
        assert_eq!(unit.symbols().type_of("x"), Some("File"));
    }

    #[test]
    fn test_resolve_receivers() {
        let source = "class A { void f(File dir) { dir.list(); (dir).list(); new File(\"a\").toURL(); String.class.newInstance(); other.list(); } }";
        let unit = parse(source).unwrap();
        let symbols = unit.symbols();
        let found = receivers(source);

        assert_eq!(symbols.resolve_receiver(&found[0]).as_deref(), Some("File"));
        assert_eq!(symbols.resolve_receiver(&found[1]).as_deref(), Some("File"));
        assert_eq!(symbols.resolve_receiver(&found[2]).as_deref(), Some("File"));
        assert_eq!(symbols.is_class_like(&found[3]), Some(true));
        assert_eq!(symbols.resolve_receiver(&found[4]), None);
        assert_eq!(symbols.is_file_like(&found[0]), Some(true));
    }
}
