//! Ingestion: Java source text to [`CompilationUnit`]
//!
//! tree-sitter produces the concrete syntax tree; [`lower`] turns it into the
//! crate's AST and the symbol table is collected from the same tree. A tree
//! that contains any `ERROR` or `MISSING` node is rejected with a
//! [`SyntaxError`].

mod lower;

use crate::constants::{DEFAULT_MAX_DEPTH, DIAGNOSTIC_DUMP_MARKER};
use crate::models::CompilationUnit;
use crate::symbols::SymbolTable;
use tree_sitter::{Node as TsNode, Parser};

/// Source text that does not parse as a compilation unit.
///
/// `Display` renders the short diagnostic, the dump marker and then the
/// s-expression of the offending subtree, so callers that surface the
/// message cut it at [`DIAGNOSTIC_DUMP_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}\n{marker} \n{dump}", marker = DIAGNOSTIC_DUMP_MARKER)]
pub struct SyntaxError {
    /// 1-based line of the offending node
    pub line: usize,
    /// 1-based column of the offending node
    pub column: usize,
    /// `(line L,col C) Parse error. ...`
    pub message: String,
    pub dump: String,
}

impl SyntaxError {
    fn at(node: TsNode<'_>, source: &str) -> Self {
        let position = node.start_position();
        let line = position.row + 1;
        let column = position.column + 1;
        let detail = if node.is_missing() {
            format!("Missing \"{}\"", node.kind())
        } else {
            let found = source.get(node.byte_range()).unwrap_or_default();
            format!("Found \"{}\"", found.trim())
        };
        let dump = node
            .parent()
            .map_or_else(|| node.to_sexp(), |parent| parent.to_sexp());

        Self {
            line,
            column,
            message: format!("(line {line},col {column}) Parse error. {detail}"),
            dump,
        }
    }
}

/// Parse `source` into a compilation unit.
pub fn parse(source: &str) -> crate::Result<CompilationUnit> {
    parse_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parse `source`, rejecting trees nested deeper than `max_depth`.
///
/// The depth check runs before anything walks the tree recursively.
pub fn parse_with_limit(source: &str, max_depth: usize) -> crate::Result<CompilationUnit> {
    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_java::language())
        .map_err(|e| crate::Error::Language(format!("Failed to set language: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| crate::Error::Analysis("Parser produced no tree".to_string()))?;
    let root = tree.root_node();

    let depth = tree_depth(root);
    if depth > max_depth {
        return Err(crate::Error::TooDeep {
            depth,
            limit: max_depth,
        });
    }

    if let Some(bad) = first_error(root) {
        let error = SyntaxError::at(bad, source);
        tracing::debug!("Rejected source: {}", error.message);
        return Err(error.into());
    }

    let symbols = SymbolTable::collect(root, source);
    let lowered = lower::Lowerer::new(source).lower_root(root);
    tracing::debug!(
        "Parsed compilation unit: {} bytes, {} declared variables",
        source.len(),
        symbols.len()
    );

    Ok(CompilationUnit::new(source, lowered, symbols))
}

/// Number of nodes on the longest root-to-leaf path, counted with a cursor
fn tree_depth(root: TsNode<'_>) -> usize {
    let mut cursor = root.walk();
    let mut depth = 1;
    let mut deepest = 1;
    loop {
        if cursor.goto_first_child() {
            depth += 1;
            deepest = deepest.max(depth);
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return deepest;
            }
            depth -= 1;
        }
    }
}

/// First `ERROR` or `MISSING` node in pre-order
fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
