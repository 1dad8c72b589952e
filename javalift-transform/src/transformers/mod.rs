//! Transformer implementations
//!
//! Each transformer is a pure `Node -> Node` rewrite. It consumes the
//! working tree and returns the rewritten one along with how many rewrites
//! it applied.

use crate::types::TransformationType;
use crate::Result;
use javalift_core::{Node, SymbolTable};

pub mod deprecated_api;
pub mod loops;
pub mod switches;

pub use deprecated_api::DeprecatedApiTransformer;
pub use loops::LoopTransformer;
pub use switches::SwitchTransformer;

/// Read-only facts about the unit being rewritten
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    pub symbols: &'a SymbolTable,
}

/// Base transformer trait
pub trait Transformer {
    /// Which pass this transformer implements
    fn transformation_type(&self) -> TransformationType;

    /// Rewrite `root`, returning the new tree and the number of rewrites.
    fn apply(&self, root: Node, context: &TransformContext<'_>) -> Result<(Node, usize)>;
}
