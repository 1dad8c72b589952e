//! Code metrics record

use serde::{Deserialize, Serialize};

/// Fixed four-field metrics for one compilation unit.
///
/// Always computed from the tree parsed out of the original text, never
/// from a rewritten one. Field names serialize in camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetrics {
    /// Newline-delimited segments of the source text
    pub total_lines_of_code: usize,
    /// 1 plus the entry count of every switch statement
    pub cyclomatic_complexity: usize,
    /// Deprecated call names plus deprecated constructed types
    pub deprecated_api_count: usize,
    /// Loop and switch shapes one of the rewrite passes targets
    pub modernization_opportunities: usize,
}
