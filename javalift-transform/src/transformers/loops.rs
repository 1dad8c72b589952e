//! Loop modernization
//!
//! Three rules run one after another over the whole tree:
//! 1. Collection-shaped `for` loops get their body replaced by a spliced
//!    `for (<init> : <bound>) <body>` statement. Matched loops are not
//!    searched for further loops.
//! 2. `while (true)` loops are rebuilt in canonical form.
//! 3. Index-shaped `for` loops, nested ones included, become
//!    `IntStream.range().forEach(() -> <body>)` with no range bounds. A
//!    bare expression statement becomes an expression body.
//!
//! A loop matching both shapes goes through rule 1 and then rule 3, so the
//! lambda ends up wrapping the spliced body.

use super::{TransformContext, Transformer};
use crate::types::TransformationType;
use crate::{Result, TransformError};
use javalift_core::constants::RANGE_FACTORY;
use javalift_core::models::{ForLoop, Lambda, MethodCall, WhileLoop};
use javalift_core::pattern::{is_collection_loop, is_index_loop, is_infinite_while};
use javalift_core::Node;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopTransformer;

impl LoopTransformer {
    pub const fn new() -> Self {
        Self
    }

    fn collection_rule(&self, node: Node, rewrites: &mut usize) -> Result<Node> {
        match node {
            Node::For(mut for_loop) if is_collection_loop(&for_loop) => {
                let splice = enhanced_for_text(&for_loop)?;
                for_loop.body = Box::new(Node::Block(vec![Node::Splice(splice)]));
                *rewrites += 1;
                Ok(Node::For(for_loop))
            }
            other => other.try_map_children(&mut |child| self.collection_rule(child, rewrites)),
        }
    }

    fn infinite_while_rule(&self, node: Node, rewrites: &mut usize) -> Result<Node> {
        let node = node.try_map_children(&mut |child| self.infinite_while_rule(child, rewrites))?;
        match node {
            Node::While(while_loop) if is_infinite_while(&while_loop) => {
                *rewrites += 1;
                Ok(Node::While(WhileLoop {
                    condition: Box::new(Node::Bool(true)),
                    body: while_loop.body,
                }))
            }
            other => Ok(other),
        }
    }

    fn index_rule(&self, node: Node, rewrites: &mut usize) -> Result<Node> {
        let node = node.try_map_children(&mut |child| self.index_rule(child, rewrites))?;
        match node {
            Node::For(for_loop) if is_index_loop(&for_loop) => {
                *rewrites += 1;
                Ok(range_for_each(*for_loop.body))
            }
            other => Ok(other),
        }
    }
}

/// `for (<init> : <right operand of the condition>) <body>`
fn enhanced_for_text(for_loop: &ForLoop) -> Result<String> {
    let (Some(init), Some(Node::Binary(condition))) =
        (for_loop.init.first(), for_loop.condition.as_deref())
    else {
        return Err(TransformError::Pass {
            pass: TransformationType::LoopModernization,
            message: "collection loop without a declaration and comparison".to_string(),
        });
    };
    Ok(format!(
        "for ({} : {}) {}",
        init.to_source(),
        condition.right.to_source(),
        for_loop.body.to_source()
    ))
}

/// `IntStream.range().forEach(() -> body);`
fn range_for_each(body: Node) -> Node {
    let range = Node::MethodCall(MethodCall::new(
        Some(Node::identifier(RANGE_FACTORY)),
        "range",
        Vec::new(),
    ));
    let lambda = Node::Lambda(Lambda {
        params: "()".to_string(),
        body: Box::new(lambda_body(body)),
    });
    Node::ExprStmt(Box::new(Node::MethodCall(MethodCall::new(
        Some(range),
        "forEach",
        vec![lambda],
    ))))
}

/// Expression statements lose their `;`; other non-block statements get braces.
fn lambda_body(body: Node) -> Node {
    if let Node::Verbatim(statement) = &body {
        if statement.kind == "expression_statement" {
            if let [expr] = statement.children().collect::<Vec<_>>().as_slice() {
                return (*expr).clone();
            }
        }
    }
    match body {
        Node::ExprStmt(expr) => *expr,
        Node::Verbatim(block) if block.kind == "block" => Node::Verbatim(block),
        Node::Block(statements) => Node::Block(statements),
        other => Node::Block(vec![other]),
    }
}

impl Transformer for LoopTransformer {
    fn transformation_type(&self) -> TransformationType {
        TransformationType::LoopModernization
    }

    fn apply(&self, root: Node, _context: &TransformContext<'_>) -> Result<(Node, usize)> {
        let mut collection = 0;
        let root = self.collection_rule(root, &mut collection)?;
        let mut infinite = 0;
        let root = self.infinite_while_rule(root, &mut infinite)?;
        let mut index = 0;
        let root = self.index_rule(root, &mut index)?;

        tracing::debug!(
            "Loop rewrites: {} collection, {} while, {} index",
            collection,
            infinite,
            index
        );
        Ok((root, collection + infinite + index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalift_core::parse;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> (String, usize) {
        let unit = parse(source).unwrap();
        let context = TransformContext {
            symbols: unit.symbols(),
        };
        let (root, rewrites) = LoopTransformer::new()
            .apply(unit.root().clone(), &context)
            .unwrap();
        (root.to_source(), rewrites)
    }

    #[test]
    fn test_collection_only_loop_is_spliced() {
        let (out, rewrites) = run("class A { void f(int[] a) { for (int i = 0; i < a.length; i += 2) { use(a[i]); } } }");
        assert_eq!(rewrites, 1);
        assert_eq!(
            out,
            "class A { void f(int[] a) { for (int i = 0; i < a.length; i += 2) {\n    for (int i = 0 : a.length) { use(a[i]); }\n} } }"
        );
    }

    #[test]
    fn test_index_only_loop_becomes_range_call() {
        let (out, rewrites) = run("class A { void f(int n) { for (int i = n; i > 0; i--) { tick(); } } }");
        assert_eq!(rewrites, 1);
        assert_eq!(
            out,
            "class A { void f(int n) { IntStream.range().forEach(() -> { tick(); }); } }"
        );
    }

    #[test]
    fn test_unbraced_body_becomes_lambda_body() {
        let (out, _) = run("class A { void f(int n) { for (int i = n; i > 0; i--) tick(); } }");
        assert_eq!(out, "class A { void f(int n) { IntStream.range().forEach(() -> tick()); } }");

        let (out, _) = run("class A { void f(int n, boolean ok) { for (int i = n; i > 0; i--) if (ok) tick(); } }");
        assert_eq!(
            out,
            "class A { void f(int n, boolean ok) { IntStream.range().forEach(() -> {\n    if (ok) tick();\n}); } }"
        );
    }

    #[test]
    fn test_double_match_ends_in_range_call_around_splice() {
        let (out, rewrites) = run("class A { void f(int n) { for (int i = 0; i < n; i++) { tick(); } } }");
        assert_eq!(rewrites, 2);
        assert_eq!(
            out,
            "class A { void f(int n) { IntStream.range().forEach(() -> {\n    for (int i = 0 : n) { tick(); }\n}); } }"
        );
    }

    #[test]
    fn test_nested_index_loops_are_all_rewritten() {
        let (out, rewrites) = run("class A { void f(int n) { for (int i = n; i > 0; i--) { for (int j = n; j > 0; j--) { } } } }");
        assert_eq!(rewrites, 2);
        assert_eq!(out.matches("IntStream.range().forEach").count(), 2);
    }

    #[test]
    fn test_infinite_while_is_kept_equivalent() {
        let (out, rewrites) = run("class A { void f() { while (true) { while (true) { } } } }");
        assert_eq!(rewrites, 2);
        assert_eq!(out, "class A { void f() { while (true) { while (true) { } } } }");
    }

    #[test]
    fn test_other_loops_untouched() {
        let source = "class A { void f(java.util.List<String> xs) { for (String x : xs) { } for (;;) { } while (xs.isEmpty()) { } } }";
        let (out, rewrites) = run(source);
        assert_eq!(rewrites, 0);
        assert_eq!(out, "class A { void f(java.util.List<String> xs) { for (String x : xs) { } for (;;) { } while (xs.isEmpty()) { } } }");
    }
}
