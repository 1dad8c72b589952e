//! Metrics Analyzer - size, switch complexity, deprecated API usage and
//! modernization opportunities

use super::UnitExtractor;
use crate::constants::{is_deprecated_method, is_deprecated_type};
use crate::models::{CodeMetrics, CompilationUnit, Node};
use crate::pattern::{self, PatternType};
use crate::Result;
use javalift_utils::count_line_segments;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAnalyzer;

impl MetricsAnalyzer {
    pub const fn new() -> Self {
        Self
    }

    /// Compute metrics for `text` and the unit parsed from it.
    ///
    /// Only switch entries contribute to complexity; loops, conditionals and
    /// logical operators do not. Deprecated calls are counted by name alone.
    pub fn analyze(&self, text: &str, unit: &CompilationUnit) -> Result<CodeMetrics> {
        if text != unit.source() {
            return Err(crate::Error::Analysis(
                "Metrics requested for text that differs from the parsed unit".to_string(),
            ));
        }

        let mut cyclomatic_complexity = 1;
        let mut deprecated_api_count = 0;
        let mut modernization_opportunities = 0;

        unit.root().walk(&mut |node| {
            match node {
                Node::Switch(switch) => cyclomatic_complexity += switch.entries.len(),
                Node::MethodCall(call) if is_deprecated_method(&call.name) => {
                    deprecated_api_count += 1;
                }
                Node::ObjectCreation(creation) if is_deprecated_type(&creation.type_name) => {
                    deprecated_api_count += 1;
                }
                _ => {}
            }
            if is_opportunity(node) {
                modernization_opportunities += 1;
            }
        });

        let metrics = CodeMetrics {
            total_lines_of_code: count_line_segments(text),
            cyclomatic_complexity,
            deprecated_api_count,
            modernization_opportunities,
        };
        tracing::debug!("Computed metrics: {:?}", metrics);
        Ok(metrics)
    }
}

/// A loop matching either for-loop shape counts once.
fn is_opportunity(node: &Node) -> bool {
    let patterns = pattern::detect(node);
    patterns.contains(&PatternType::CollectionLoop)
        || patterns.contains(&PatternType::IndexLoop)
        || patterns.contains(&PatternType::InfiniteWhile)
        || patterns.contains(&PatternType::StatementSwitch)
}

impl UnitExtractor for MetricsAnalyzer {
    type Output = CodeMetrics;

    fn extract(&self, unit: &CompilationUnit) -> Result<CodeMetrics> {
        self.analyze(unit.source(), unit)
    }

    fn extractor_type(&self) -> &'static str {
        "metrics"
    }
}
