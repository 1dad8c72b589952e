//! Read-only extractors over a parsed compilation unit
//!
//! Each extractor derives one kind of report from the *original* tree. They
//! share the [`UnitExtractor`] trait so callers can run them uniformly and
//! get failures logged the same way.

pub mod metrics;
pub mod warnings;

pub use metrics::MetricsAnalyzer;
pub use warnings::WarningDetector;

use crate::models::CompilationUnit;
use crate::Result;

/// Base trait for all javalift extractors
pub trait UnitExtractor {
    /// What this extractor produces
    type Output;

    /// Extract the report for `unit`
    fn extract(&self, unit: &CompilationUnit) -> Result<Self::Output>;

    /// Get extractor type name
    fn extractor_type(&self) -> &'static str;

    /// Extract, logging the outcome under this extractor's name
    fn extract_logged(&self, unit: &CompilationUnit) -> Result<Self::Output> {
        match self.extract(unit) {
            Ok(output) => {
                tracing::debug!("{} extraction succeeded", self.extractor_type());
                Ok(output)
            }
            Err(e) => {
                tracing::error!("Data extraction failed for {}: {}", self.extractor_type(), e);
                Err(e)
            }
        }
    }
}
