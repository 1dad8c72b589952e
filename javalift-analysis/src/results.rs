//! Result records returned to callers
//!
//! Field names are part of the external contract and serialize in
//! camelCase; absent optional fields are omitted.

use javalift_core::CodeMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ValidationResult {
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
            file_name: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            file_name: None,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: Option<&str>) -> Self {
        self.file_name = file_name.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CodeMetrics>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl EnhancementResult {
    /// A request that failed before analysis finished: one warning, no code
    /// beyond `original_code`, no metrics.
    pub fn aborted(original_code: Option<String>, warning: String) -> Self {
        Self {
            original_code,
            enhanced_code: None,
            metrics: None,
            warnings: vec![warning],
        }
    }
}
