//! Enhancement pipeline - orchestrates validation, analysis and rewriting
//!
//! Every entry point builds its own tree and working copy, so an
//! [`Enhancer`] can be shared freely between callers.

use crate::config::EnhancerConfig;
use crate::results::{EnhancementResult, ValidationResult};
use crate::{Error, Result};
use javalift_core::{
    parse_with_limit, CodeMetrics, CompilationUnit, MetricsAnalyzer, UnitExtractor,
    WarningDetector,
};
use javalift_transform::TransformationEngine;
use javalift_utils::{has_extension, truncate_at_marker};

pub const VALID_CODE_MESSAGE: &str = "Valid code";
pub const EMPTY_FILE_MESSAGE: &str = "File is empty";
pub const INVALID_SYNTAX_PREFIX: &str = "Invalid Java syntax: ";
pub const READ_ERROR_PREFIX: &str = "Error reading file: ";
pub const ENHANCEMENT_ERROR_PREFIX: &str = "Error during enhancement: ";

/// Validate/enhance orchestrator
pub struct Enhancer {
    config: EnhancerConfig,
    engine: TransformationEngine,
    metrics: MetricsAnalyzer,
    warnings: WarningDetector,
}

impl Enhancer {
    pub fn new(config: EnhancerConfig) -> Self {
        let engine = TransformationEngine::new(config.engine.clone());
        Self {
            config,
            engine,
            metrics: MetricsAnalyzer::new(),
            warnings: WarningDetector::new(),
        }
    }

    pub const fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Check that `code` parses.
    pub fn validate_text(&self, code: &str) -> ValidationResult {
        match self.parse(code) {
            Ok(_) => ValidationResult::valid(VALID_CODE_MESSAGE),
            Err(Error::Core(javalift_core::Error::Syntax(e))) => {
                tracing::info!("Validation rejected input");
                ValidationResult::invalid(self.surface(INVALID_SYNTAX_PREFIX, &e))
            }
            Err(e) => ValidationResult::invalid(self.surface("", &e)),
        }
    }

    /// Check an uploaded file: it must be non-empty, carry the source
    /// extension and decode to text that parses. `file_name` is echoed
    /// back on every result past the emptiness check.
    pub fn validate_file(&self, file_name: Option<&str>, bytes: &[u8]) -> ValidationResult {
        if bytes.is_empty() {
            return ValidationResult::invalid(EMPTY_FILE_MESSAGE);
        }

        let extension_ok =
            file_name.is_some_and(|name| has_extension(name, &self.config.source_extension));
        if !extension_ok {
            return ValidationResult::invalid(self.invalid_type_message()).with_file_name(file_name);
        }

        let result = match self.decode(bytes) {
            Ok(code) => self.validate_text(&code),
            Err(e) => ValidationResult::invalid(self.surface(READ_ERROR_PREFIX, &e)),
        };
        result.with_file_name(file_name)
    }

    /// Analyze and rewrite `code`.
    ///
    /// A failure to parse or measure the input aborts the request with a
    /// single warning. A failure inside the rewrite passes leaves
    /// `enhanced_code` equal to `code` but still reports metrics and
    /// warnings.
    pub fn enhance_text(&self, code: &str) -> EnhancementResult {
        match self.analyze(code) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Enhancement aborted: {}", e);
                EnhancementResult::aborted(
                    Some(code.to_string()),
                    self.surface(ENHANCEMENT_ERROR_PREFIX, &e),
                )
            }
        }
    }

    /// Decode an uploaded file and enhance it.
    pub fn enhance_file(&self, bytes: &[u8]) -> EnhancementResult {
        match self.decode(bytes) {
            Ok(code) => self.enhance_text(&code),
            Err(e) => {
                tracing::warn!("Could not read uploaded file: {}", e);
                EnhancementResult::aborted(None, self.surface(READ_ERROR_PREFIX, &e))
            }
        }
    }

    /// Metrics of the original text only, without transformation.
    pub fn metrics(&self, code: &str) -> Result<CodeMetrics> {
        let unit = self.parse(code)?;
        Ok(self.metrics.extract_logged(&unit)?)
    }

    /// Size and depth bounds, then ingestion
    fn parse(&self, code: &str) -> Result<CompilationUnit> {
        self.check_size(code.len())?;
        Ok(parse_with_limit(code, self.config.max_depth)?)
    }

    fn analyze(&self, code: &str) -> Result<EnhancementResult> {
        let unit = self.parse(code)?;
        let metrics = self.metrics.extract_logged(&unit)?;

        let outcome = self.engine.transform(&unit);
        if outcome.fell_back() {
            tracing::info!("Returning original code unchanged");
        } else {
            tracing::info!("Applied {} rewrites", outcome.total_rewrites());
        }

        let warnings = self.warnings.extract_logged(&unit)?;
        Ok(EnhancementResult {
            original_code: Some(code.to_string()),
            enhanced_code: Some(outcome.enhanced_code()),
            metrics: Some(metrics),
            warnings,
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.check_size(bytes.len())?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn check_size(&self, size: usize) -> Result<()> {
        let limit = self.config.max_input_bytes;
        if size > limit {
            return Err(Error::InputTooLarge { size, limit });
        }
        Ok(())
    }

    fn invalid_type_message(&self) -> String {
        let extension = self.config.source_extension.trim_start_matches('.');
        format!("Invalid file type. Only .{extension} files are allowed")
    }

    /// `prefix` followed by the error text, cut at the diagnostic marker.
    fn surface(&self, prefix: &str, error: &impl std::fmt::Display) -> String {
        truncate_at_marker(&format!("{prefix}{error}"), &self.config.diagnostic_marker)
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new(EnhancerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_text() {
        let enhancer = Enhancer::default();
        assert_eq!(
            enhancer.validate_text("class A { }"),
            ValidationResult::valid("Valid code")
        );

        let result = enhancer.validate_text("class A { void f( }");
        assert!(!result.valid);
        assert!(result.message.starts_with("Invalid Java syntax: "));
        assert!(!result.message.contains("Problem stacktrace"));
        assert_eq!(result.file_name, None);
    }

    #[test]
    fn test_invalid_type_message_follows_extension() {
        let enhancer = Enhancer::new(EnhancerConfig {
            source_extension: ".jav".to_string(),
            ..EnhancerConfig::default()
        });
        let result = enhancer.validate_file(Some("A.java"), b"class A {}");
        assert_eq!(result.message, "Invalid file type. Only .jav files are allowed");
    }

    #[test]
    fn test_size_limit() {
        let enhancer = Enhancer::new(EnhancerConfig {
            max_input_bytes: 8,
            ..EnhancerConfig::default()
        });

        let result = enhancer.validate_text("class A { }");
        assert!(!result.valid);
        assert_eq!(result.message, "Input is 11 bytes, exceeding the limit of 8 bytes");

        let result = enhancer.enhance_text("class A { }");
        assert_eq!(result.enhanced_code, None);
        assert_eq!(
            result.warnings,
            vec!["Error during enhancement: Input is 11 bytes, exceeding the limit of 8 bytes"]
        );

        assert!(matches!(
            enhancer.metrics("class A { }"),
            Err(Error::InputTooLarge { size: 11, limit: 8 })
        ));
    }

    #[test]
    fn test_depth_limit_is_an_outer_failure() {
        let enhancer = Enhancer::new(EnhancerConfig {
            max_depth: 8,
            ..EnhancerConfig::default()
        });
        let code = "class A { void f() { g(h(i(j(1)))); } }";

        let result = enhancer.validate_text(code);
        assert!(!result.valid);
        assert!(result.message.starts_with("Nesting depth "));

        let result = enhancer.enhance_text(code);
        assert_eq!(result.enhanced_code, None);
        assert_eq!(result.metrics, None);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Error during enhancement: Nesting depth "));

        assert!(Enhancer::default().enhance_text(code).metrics.is_some());
    }

    #[test]
    fn test_decode_failure_in_validate_file() {
        let result = Enhancer::default().validate_file(Some("A.java"), &[0xff, 0xfe]);
        assert!(!result.valid);
        assert!(result.message.starts_with("Error reading file: "));
        assert_eq!(result.file_name.as_deref(), Some("A.java"));
    }
}
