//! javalift core - AST model and read-only analysis
//!
//! This crate provides:
//! - The tagged-union AST for one Java compilation unit
//! - Ingestion: tree-sitter parsing lowered into that AST
//! - A symbol table of declared variable types for receiver resolution
//! - The printer that turns a tree back into source text
//! - Metrics and warning extractors over the original tree

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
)]
#![allow(
    clippy::module_name_repetitions,  // Often necessary for clarity
)]

pub mod constants;
pub mod extractors;
pub mod models;
pub mod parser;
pub mod pattern;
pub mod printer;
pub mod symbols;

pub use extractors::{MetricsAnalyzer, UnitExtractor, WarningDetector};
pub use models::{CodeMetrics, CompilationUnit, Node};
pub use parser::{parse, parse_with_limit, SyntaxError};
pub use symbols::SymbolTable;

/// Result type used throughout javalift core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for javalift core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source text is not a well-formed compilation unit
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The Java grammar could not be loaded
    #[error("Language error: {0}")]
    Language(String),

    /// The syntax tree nests deeper than the configured limit
    #[error("Nesting depth {depth} exceeds the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },
}
