//! javalift analysis - the validate/enhance pipeline
//!
//! This crate sequences ingestion, metrics, transformation and warning
//! detection for one compilation unit and assembles the result records
//! handed to callers. It owns the outer failure boundary: a failure to
//! parse or measure the input aborts the whole request, while a failure
//! inside the rewrite passes only costs the rewrites.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod pipeline;
pub mod results;

// Re-export main types for convenience
pub use config::EnhancerConfig;
pub use pipeline::Enhancer;
pub use results::{EnhancementResult, ValidationResult};

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parsing or analysis of the unit failed
    #[error("{0}")]
    Core(#[from] javalift_core::Error),

    /// Input exceeds the configured size bound
    #[error("Input is {size} bytes, exceeding the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// Uploaded bytes are not valid UTF-8
    #[error("{0}")]
    Decode(#[from] std::string::FromUtf8Error),
}
