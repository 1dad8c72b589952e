//! Warning Detector

use super::UnitExtractor;
use crate::constants::{DEPRECATED_ANNOTATION, PERFORMANCE_SENSITIVE_METHODS};
use crate::models::{CompilationUnit, Node};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct WarningDetector;

impl WarningDetector {
    pub const fn new() -> Self {
        Self
    }

    /// Deprecated declarations first, then performance-sensitive calls.
    /// Each group is in source order; the two are never interleaved.
    pub fn detect(&self, unit: &CompilationUnit) -> Vec<String> {
        let mut warnings = Vec::new();

        unit.root().walk(&mut |node| {
            if let Node::Method(method) = node {
                if method.has_annotation(DEPRECATED_ANNOTATION) {
                    warnings.push(format!("Deprecated method found: {}", method.name));
                }
            }
        });

        unit.root().walk(&mut |node| {
            if let Node::MethodCall(call) = node {
                if PERFORMANCE_SENSITIVE_METHODS.contains(&call.name.as_str()) {
                    warnings.push(format!("Potential performance-sensitive method: {}", call.name));
                }
            }
        });

        warnings
    }
}

impl UnitExtractor for WarningDetector {
    type Output = Vec<String>;

    fn extract(&self, unit: &CompilationUnit) -> Result<Vec<String>> {
        Ok(self.detect(unit))
    }

    fn extractor_type(&self) -> &'static str {
        "warnings"
    }
}
