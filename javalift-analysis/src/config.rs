//! Pipeline configuration

use javalift_core::constants::{DEFAULT_MAX_DEPTH, DIAGNOSTIC_DUMP_MARKER, JAVA_EXTENSION};
use javalift_transform::EngineConfig;
use javalift_utils::logging::LogLevel;
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::Enhancer`]
///
/// Every field has a default, so a configuration file only needs to name
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Extension an uploaded file name must end with (case-insensitive)
    pub source_extension: String,
    /// Surfaced messages are cut at this marker
    pub diagnostic_marker: String,
    /// Largest input, in bytes, the pipeline accepts
    pub max_input_bytes: usize,
    /// Deepest syntax tree the pipeline accepts
    pub max_depth: usize,
    /// Transformation engine settings
    pub engine: EngineConfig,
    /// Log level used by binaries that install a subscriber
    pub log_level: LogLevel,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            source_extension: JAVA_EXTENSION.to_string(),
            diagnostic_marker: DIAGNOSTIC_DUMP_MARKER.to_string(),
            max_input_bytes: 1024 * 1024,
            max_depth: DEFAULT_MAX_DEPTH,
            engine: EngineConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = EnhancerConfig::default();
        assert_eq!(config.source_extension, ".java");
        assert_eq!(config.diagnostic_marker, "Problem stacktrace :");
        assert_eq!(config.max_input_bytes, 1_048_576);
        assert_eq!(config.max_depth, 200);
        assert_eq!(config.engine.max_nodes, 200_000);
    }

    #[test]
    fn test_partial_toml_file() -> javalift_utils::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("javalift.toml");
        fs::write(
            &path,
            "max_input_bytes = 2048\nlog_level = \"debug\"\n\n[engine]\nswitches = false\n",
        )?;

        let config: EnhancerConfig = javalift_utils::load_config(&path)?;
        assert_eq!(config.max_input_bytes, 2048);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.engine.switches);
        assert!(config.engine.loops);
        assert_eq!(config.source_extension, ".java");
        Ok(())
    }
}
