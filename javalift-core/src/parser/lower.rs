//! Lowering from the tree-sitter concrete tree into [`Node`]
//!
//! Only constructs some analysis or rewrite looks at become typed nodes.
//! Expressions are typed wherever they appear when they are calls or object
//! creations; operators are typed only inside `for` headers, which print in
//! canonical form anyway. Everything else keeps its source text.

use crate::models::{
    Binary, BinaryOp, Declarator, EntryForm, ForLoop, Fragment, MethodCall, MethodDecl, Node,
    ObjectCreation, Switch, SwitchEntry, Unary, UnaryOp, VarDecl, Verbatim, WhileLoop,
};
use tree_sitter::Node as TsNode;

/// Parents under which a `switch` is a statement rather than an expression
const STATEMENT_PARENTS: [&str; 10] = [
    "block",
    "constructor_body",
    "switch_block_statement_group",
    "program",
    "labeled_statement",
    "if_statement",
    "while_statement",
    "for_statement",
    "enhanced_for_statement",
    "do_statement",
];

pub(crate) struct Lowerer<'s> {
    source: &'s str,
}

impl<'s> Lowerer<'s> {
    pub(crate) const fn new(source: &'s str) -> Self {
        Self { source }
    }

    /// The root spans the whole text, including leading and trailing trivia.
    pub(crate) fn lower_root(&self, root: TsNode<'_>) -> Node {
        Node::Verbatim(self.verbatim_range(root, 0, self.source.len()))
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        self.source.get(start..end).unwrap_or_default()
    }

    fn text(&self, node: TsNode<'_>) -> &'s str {
        self.slice(node.start_byte(), node.end_byte())
    }

    fn lower(&self, node: TsNode<'_>) -> Node {
        let typed = match node.kind() {
            "for_statement" => self.lower_for(node),
            "while_statement" => self.lower_while(node),
            "switch_expression" | "switch_statement" if is_statement_position(node) => {
                self.lower_switch(node)
            }
            "return_statement" => Some(Node::Return(self.first_operand(node))),
            "yield_statement" => Some(Node::Yield(self.first_operand(node))),
            "method_declaration" => self.lower_method(node),
            "method_invocation" => self.lower_call(node),
            "object_creation_expression" => self.lower_creation(node),
            "identifier" => Some(Node::Identifier(self.text(node).to_string())),
            "true" => Some(Node::Bool(true)),
            "false" => Some(Node::Bool(false)),
            _ => None,
        };
        typed.unwrap_or_else(|| self.verbatim_node(node))
    }

    fn verbatim_node(&self, node: TsNode<'_>) -> Node {
        Node::Verbatim(self.verbatim_range(node, node.start_byte(), node.end_byte()))
    }

    fn verbatim_range(&self, node: TsNode<'_>, start: usize, end: usize) -> Verbatim {
        let mut parts = Vec::new();
        let mut pos = start;
        for child in named_children(node) {
            let gap = self.slice(pos, child.start_byte());
            if !gap.is_empty() {
                parts.push(Fragment::Text(gap.to_string()));
            }
            parts.push(Fragment::Child(self.lower(child)));
            pos = child.end_byte();
        }
        let tail = self.slice(pos, end);
        if !tail.is_empty() {
            parts.push(Fragment::Text(tail.to_string()));
        }
        Verbatim {
            kind: node.kind().to_string(),
            parts,
        }
    }

    fn first_operand(&self, node: TsNode<'_>) -> Option<Box<Node>> {
        named_children(node)
            .into_iter()
            .next()
            .map(|child| Box::new(self.lower(child)))
    }

    fn lower_for(&self, node: TsNode<'_>) -> Option<Node> {
        let body = node.child_by_field_name("body")?;

        let mut cursor = node.walk();
        let init = node
            .children_by_field_name("init", &mut cursor)
            .map(|child| {
                if child.kind() == "local_variable_declaration" {
                    self.lower_var_decl(child, false)
                        .unwrap_or_else(|| self.verbatim_node(child))
                } else {
                    self.lower_operator(child)
                }
            })
            .collect();
        let update = node
            .children_by_field_name("update", &mut cursor)
            .map(|child| self.lower_operator(child))
            .collect();
        let condition = node
            .child_by_field_name("condition")
            .map(|child| Box::new(self.lower_operator(child)));

        Some(Node::For(ForLoop {
            init,
            condition,
            update,
            body: Box::new(self.lower(body)),
        }))
    }

    /// Expressions in a `for` header, with operators typed.
    fn lower_operator(&self, node: TsNode<'_>) -> Node {
        let typed = match node.kind() {
            "binary_expression" => self.lower_binary(node),
            "unary_expression" => self.lower_unary(node),
            "update_expression" => self.lower_update(node),
            _ => None,
        };
        typed.unwrap_or_else(|| self.lower(node))
    }

    fn lower_binary(&self, node: TsNode<'_>) -> Option<Node> {
        let left = node.child_by_field_name("left")?;
        let right = node.child_by_field_name("right")?;
        let operator = node.child_by_field_name("operator").map_or_else(
            || self.slice(left.end_byte(), right.start_byte()).trim(),
            |op| self.text(op),
        );
        let op = BinaryOp::from_token(operator)?;
        Some(Node::Binary(Binary {
            op,
            left: Box::new(self.lower_operator(left)),
            right: Box::new(self.lower_operator(right)),
        }))
    }

    fn lower_unary(&self, node: TsNode<'_>) -> Option<Node> {
        let operand = node.child_by_field_name("operand")?;
        let operator = node
            .child_by_field_name("operator")
            .map_or_else(|| self.slice(node.start_byte(), operand.start_byte()).trim(), |op| self.text(op));
        let op = match operator {
            "+" => UnaryOp::Plus,
            "-" => UnaryOp::Minus,
            "!" => UnaryOp::Not,
            "~" => UnaryOp::Complement,
            _ => return None,
        };
        Some(Node::Unary(Unary {
            op,
            operand: Box::new(self.lower_operator(operand)),
        }))
    }

    fn lower_update(&self, node: TsNode<'_>) -> Option<Node> {
        let operand = named_children(node).into_iter().next()?;
        let prefix = self.slice(node.start_byte(), operand.start_byte()).trim();
        let suffix = self.slice(operand.end_byte(), node.end_byte()).trim();
        let op = match (prefix, suffix) {
            ("++", "") => UnaryOp::PreIncrement,
            ("--", "") => UnaryOp::PreDecrement,
            ("", "++") => UnaryOp::PostIncrement,
            ("", "--") => UnaryOp::PostDecrement,
            _ => return None,
        };
        Some(Node::Unary(Unary {
            op,
            operand: Box::new(self.lower_operator(operand)),
        }))
    }

    fn lower_var_decl(&self, node: TsNode<'_>, terminated: bool) -> Option<Node> {
        let mut cursor = node.walk();
        let declarators: Vec<_> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        let first = declarators.first()?;
        let prefix = self.slice(node.start_byte(), first.start_byte()).trim().to_string();

        let declarators = declarators
            .iter()
            .map(|declarator| {
                let value = declarator.child_by_field_name("value");
                let name = value.map_or_else(
                    || self.text(*declarator).trim(),
                    |value| {
                        self.slice(declarator.start_byte(), value.start_byte())
                            .trim()
                            .trim_end_matches('=')
                            .trim_end()
                    },
                );
                Declarator {
                    name: name.to_string(),
                    init: value.map(|value| Box::new(self.lower(value))),
                }
            })
            .collect();

        Some(Node::VarDecl(VarDecl {
            prefix,
            declarators,
            terminated,
        }))
    }

    fn lower_while(&self, node: TsNode<'_>) -> Option<Node> {
        let condition = node.child_by_field_name("condition")?;
        let body = node.child_by_field_name("body")?;
        Some(Node::While(WhileLoop {
            condition: Box::new(self.lower(unwrap_parens(condition))),
            body: Box::new(self.lower(body)),
        }))
    }

    fn lower_switch(&self, node: TsNode<'_>) -> Option<Node> {
        let selector = field_or_kind(node, "condition", "parenthesized_expression")?;
        let body = field_or_kind(node, "body", "switch_block")?;

        let mut entries = Vec::new();
        for child in named_children(body) {
            match child.kind() {
                "switch_block_statement_group" => self.lower_group(child, &mut entries),
                "switch_rule" => entries.push(self.lower_rule(child)?),
                _ => return None,
            }
        }

        Some(Node::Switch(Switch {
            selector: Box::new(self.lower(unwrap_parens(selector))),
            entries,
        }))
    }

    /// `case A: case B: stmts` yields one entry per label; only the last
    /// one owns the statements.
    fn lower_group(&self, group: TsNode<'_>, entries: &mut Vec<SwitchEntry>) {
        let mut current: Option<SwitchEntry> = None;
        for child in named_children(group) {
            if child.kind() == "switch_label" {
                if let Some(entry) = current.take() {
                    entries.push(entry);
                }
                current = Some(SwitchEntry {
                    labels: self.lower_labels(child),
                    statements: Vec::new(),
                    form: EntryForm::Colon,
                });
            } else if let Some(entry) = current.as_mut() {
                entry.statements.push(self.lower(child));
            }
        }
        entries.extend(current);
    }

    fn lower_rule(&self, rule: TsNode<'_>) -> Option<SwitchEntry> {
        let children = named_children(rule);
        let label = children
            .iter()
            .find(|child| child.kind() == "switch_label")?;
        let statements = children
            .iter()
            .filter(|child| child.kind() != "switch_label")
            .map(|child| self.lower(*child))
            .collect();
        Some(SwitchEntry {
            labels: self.lower_labels(*label),
            statements,
            form: EntryForm::Arrow,
        })
    }

    /// `default` has no named children and lowers to no labels.
    fn lower_labels(&self, label: TsNode<'_>) -> Vec<Node> {
        named_children(label)
            .into_iter()
            .map(|child| self.lower(child))
            .collect()
    }

    fn lower_method(&self, node: TsNode<'_>) -> Option<Node> {
        let name = node.child_by_field_name("name")?;
        let annotations = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "modifiers")
            .flat_map(named_children)
            .filter(|child| matches!(child.kind(), "marker_annotation" | "annotation"))
            .filter_map(|annotation| annotation.child_by_field_name("name"))
            .map(|name| self.text(name).to_string())
            .collect();

        Some(Node::Method(MethodDecl {
            name: self.text(name).to_string(),
            annotations,
            decl: Box::new(self.verbatim_node(node)),
        }))
    }

    fn lower_call(&self, node: TsNode<'_>) -> Option<Node> {
        let name = node.child_by_field_name("name")?;
        let arguments = node.child_by_field_name("arguments")?;
        let (receiver, separator) = match node.child_by_field_name("object") {
            Some(object) => (
                Some(Box::new(self.lower(object))),
                self.slice(object.end_byte(), name.start_byte()),
            ),
            None => (None, self.slice(node.start_byte(), name.start_byte())),
        };

        Some(Node::MethodCall(MethodCall {
            receiver,
            separator: separator.to_string(),
            name: self.text(name).to_string(),
            args: self.lower_arguments(arguments),
        }))
    }

    /// Unqualified `new T(args) [body]` without explicit type arguments
    fn lower_creation(&self, node: TsNode<'_>) -> Option<Node> {
        if node.child(0)?.kind() != "new" || node.child_by_field_name("type_arguments").is_some() {
            return None;
        }
        let type_node = node.child_by_field_name("type")?;
        let arguments = node.child_by_field_name("arguments")?;
        let body = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "class_body")
            .map(|body| Box::new(self.lower(body)));

        Some(Node::ObjectCreation(ObjectCreation {
            type_name: self.text(type_node).to_string(),
            args: self.lower_arguments(arguments),
            body,
        }))
    }

    fn lower_arguments(&self, arguments: TsNode<'_>) -> Vec<Node> {
        named_children(arguments)
            .into_iter()
            .map(|argument| self.lower(argument))
            .collect()
    }
}

/// Named children, comments excluded
fn named_children(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// Strip one layer of parentheses. Newer grammars wrap `while` conditions
/// in a `condition` node instead of a `parenthesized_expression`.
fn unwrap_parens(node: TsNode<'_>) -> TsNode<'_> {
    if matches!(node.kind(), "parenthesized_expression" | "condition") {
        if let Some(inner) = named_children(node).into_iter().next() {
            return inner;
        }
    }
    node
}

fn field_or_kind<'t>(node: TsNode<'t>, field: &str, kind: &str) -> Option<TsNode<'t>> {
    node.child_by_field_name(field)
        .or_else(|| named_children(node).into_iter().find(|child| child.kind() == kind))
}

fn is_statement_position(node: TsNode<'_>) -> bool {
    node.parent()
        .is_some_and(|parent| STATEMENT_PARENTS.contains(&parent.kind()))
}
