//! Transformation types and outcome records

use javalift_core::CompilationUnit;
use serde::{Deserialize, Serialize};

/// The rewrite passes, in the order the engine runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationType {
    /// Collection/index `for` loops and `while (true)`
    LoopModernization,
    /// Statement switches rewritten entry by entry into arrow form
    SwitchModernization,
    /// Deprecated calls and constructions replaced by their successors
    DeprecatedApi,
}

impl TransformationType {
    /// Get all transformation types in execution order
    pub const fn all() -> [Self; 3] {
        [
            Self::LoopModernization,
            Self::SwitchModernization,
            Self::DeprecatedApi,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoopModernization => "loop_modernization",
            Self::SwitchModernization => "switch_modernization",
            Self::DeprecatedApi => "deprecated_api",
        }
    }

    /// Get display name for logs and reports
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LoopModernization => "Loop modernization",
            Self::SwitchModernization => "Switch modernization",
            Self::DeprecatedApi => "Deprecated API rewrite",
        }
    }
}

impl std::fmt::Display for TransformationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How many rewrites one pass applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub transformation_type: TransformationType,
    pub rewrites: usize,
}

/// Result of running the engine over a unit.
///
/// Either every enabled pass succeeded, or none of their work survives.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    Transformed {
        unit: CompilationUnit,
        reports: Vec<PassReport>,
    },
    FellBack {
        /// Source text of the input unit, unchanged
        original_text: String,
        reason: String,
    },
}

impl TransformOutcome {
    /// Text to hand back to the caller
    pub fn enhanced_code(&self) -> String {
        match self {
            Self::Transformed { unit, .. } => unit.render(),
            Self::FellBack { original_text, .. } => original_text.clone(),
        }
    }

    pub const fn fell_back(&self) -> bool {
        matches!(self, Self::FellBack { .. })
    }

    /// Total rewrites across passes; zero after a fallback
    pub fn total_rewrites(&self) -> usize {
        match self {
            Self::Transformed { reports, .. } => reports.iter().map(|r| r.rewrites).sum(),
            Self::FellBack { .. } => 0,
        }
    }
}
