//! Data models for javalift core
//!
//! The AST of a compilation unit and the metrics record computed over it.

pub mod ast;
pub mod metrics;

pub use ast::{
    Binary, BinaryOp, CompilationUnit, Declarator, EntryForm, ForLoop, Fragment, Lambda,
    MethodCall, MethodDecl, Node, ObjectCreation, Switch, SwitchEntry, Unary, UnaryOp, VarDecl,
    Verbatim, WhileLoop,
};
pub use metrics::CodeMetrics;
