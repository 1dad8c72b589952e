//! javalift transform - rule-based modernization of a Java compilation unit
//!
//! Three transformers run in a fixed order on a working copy of the tree:
//! loop modernization, switch-to-arrow modernization and deprecated API
//! substitution. If any of them fails the engine discards all of their
//! work and hands back the original text instead.

#![warn(clippy::all, clippy::pedantic)]

pub mod engine;
pub mod transformers;
pub mod types;

// Re-export main types for convenience
pub use engine::{EngineConfig, TransformationEngine};
pub use transformers::{TransformContext, Transformer};
pub use types::{PassReport, TransformOutcome, TransformationType};

/// Result type for transformation operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Error types for transformation operations
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A rewrite needs the static type of a call receiver that cannot be determined
    #[error("Cannot resolve receiver type of `{receiver}` for call `{method}`")]
    UnresolvedReceiver { method: String, receiver: String },

    /// The tree is larger than the engine is configured to rewrite
    #[error("Tree has {nodes} nodes, exceeding the limit of {limit}")]
    Budget { nodes: usize, limit: usize },

    /// A transformer met a tree it cannot rewrite
    #[error("{pass} failed: {message}")]
    Pass { pass: TransformationType, message: String },
}
