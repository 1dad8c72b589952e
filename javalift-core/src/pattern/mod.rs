//! Modernization pattern detection
//!
//! Shape predicates shared by the metrics analyzer (which counts
//! opportunities) and the rewrite passes (which act on them). A loop can
//! match both for-loop shapes at once.

use crate::models::{BinaryOp, ForLoop, Node, Switch, WhileLoop};
use serde::{Deserialize, Serialize};

/// Kinds of rewritable shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// `for (T i = ..; i < bound; ..)`
    CollectionLoop,
    /// `for (T i = ..; a OP b; unary)`
    IndexLoop,
    /// `while (true)`
    InfiniteWhile,
    /// Switch with at least one entry owning statements
    StatementSwitch,
}

/// Leading init, condition and first update when all three exist
fn loop_header(for_loop: &ForLoop) -> Option<(&Node, &Node, &Node)> {
    Some((
        for_loop.init.first()?,
        for_loop.condition.as_deref()?,
        for_loop.update.first()?,
    ))
}

/// Declared index compared with `<`: the collection/array shape.
pub fn is_collection_loop(for_loop: &ForLoop) -> bool {
    loop_header(for_loop).is_some_and(|(init, condition, _)| {
        matches!(init, Node::VarDecl(_))
            && matches!(condition, Node::Binary(binary) if binary.op == BinaryOp::Less)
    })
}

/// Declared index, any binary condition, unary update: the index shape.
pub fn is_index_loop(for_loop: &ForLoop) -> bool {
    loop_header(for_loop).is_some_and(|(init, condition, update)| {
        matches!(init, Node::VarDecl(_))
            && matches!(condition, Node::Binary(_))
            && matches!(update, Node::Unary(_))
    })
}

pub fn is_infinite_while(while_loop: &WhileLoop) -> bool {
    matches!(*while_loop.condition, Node::Bool(true))
}

pub fn is_statement_switch(switch: &Switch) -> bool {
    switch.entries.iter().any(|entry| !entry.statements.is_empty())
}

/// Patterns `node` itself matches, in declaration order
pub fn detect(node: &Node) -> Vec<PatternType> {
    let mut found = Vec::new();
    match node {
        Node::For(for_loop) => {
            if is_collection_loop(for_loop) {
                found.push(PatternType::CollectionLoop);
            }
            if is_index_loop(for_loop) {
                found.push(PatternType::IndexLoop);
            }
        }
        Node::While(while_loop) if is_infinite_while(while_loop) => {
            found.push(PatternType::InfiniteWhile);
        }
        Node::Switch(switch) if is_statement_switch(switch) => {
            found.push(PatternType::StatementSwitch);
        }
        _ => {}
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn patterns(body: &str) -> Vec<Vec<PatternType>> {
        let unit = parse(&format!("class A {{ void f(int[] a, int n) {{ {body} }} }}")).unwrap();
        let mut found = Vec::new();
        unit.root().walk(&mut |node| {
            if matches!(node, Node::For(_) | Node::While(_) | Node::Switch(_)) {
                found.push(detect(node));
            }
        });
        found
    }

    #[test]
    fn test_loop_shapes() {
        use PatternType::{CollectionLoop, IndexLoop};
        assert_eq!(patterns("for (int i = 0; i < n; i++) {}"), vec![vec![CollectionLoop, IndexLoop]]);
        assert_eq!(patterns("for (int i = n; i > 0; i--) {}"), vec![vec![IndexLoop]]);
        assert_eq!(patterns("for (int i = 0; i < n; i += 2) {}"), vec![vec![CollectionLoop]]);
        assert_eq!(patterns("for (int i = 0; i + 1; i++) {}"), vec![vec![IndexLoop]]);
        assert_eq!(patterns("int i; for (i = 0; i < n; i++) {}"), vec![Vec::<PatternType>::new()]);
        assert_eq!(patterns("for (int i = 0; i < n;) {}"), vec![Vec::<PatternType>::new()]);
        assert_eq!(patterns("for (int i = 0; done(i); i++) {}"), vec![Vec::<PatternType>::new()]);
    }

    #[test]
    fn test_while_and_switch_shapes() {
        assert_eq!(patterns("while (true) { }"), vec![vec![PatternType::InfiniteWhile]]);
        assert_eq!(patterns("while (false) { }"), vec![Vec::<PatternType>::new()]);
        assert_eq!(patterns("while (n > 0) { n--; }"), vec![Vec::<PatternType>::new()]);
        assert_eq!(
            patterns("switch (n) { case 1: break; }"),
            vec![vec![PatternType::StatementSwitch]]
        );
        assert_eq!(patterns("switch (n) { }"), vec![Vec::<PatternType>::new()]);
    }
}
