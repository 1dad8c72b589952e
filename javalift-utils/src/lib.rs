//! javalift utilities
//!
//! Small helpers shared by every javalift crate: logging bootstrap,
//! configuration loading, diagnostic/string helpers and file-name checks.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod file;
pub mod logging;
pub mod string;

pub use config::{load_config, merge_configs, ConfigBuilder};
pub use file::{has_extension, read_source_bytes};
pub use string::{count_line_segments, truncate_at_marker};

/// Result type used throughout javalift utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}
