//! Central Transformation Engine
//!
//! Runs the enabled transformers in their fixed order over a working copy
//! of the unit's tree. The outcome is all-or-nothing: a failure in any pass
//! discards every rewrite and the caller gets the original text back.

use crate::{
    transformers::{
        DeprecatedApiTransformer, LoopTransformer, SwitchTransformer, TransformContext, Transformer,
    },
    types::{PassReport, TransformOutcome, TransformationType},
    Result, TransformError,
};
use javalift_core::CompilationUnit;
use serde::{Deserialize, Serialize};

/// Configuration for the transformation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest tree (in nodes) the engine will rewrite
    pub max_nodes: usize,
    /// Run loop modernization
    pub loops: bool,
    /// Run switch-to-arrow modernization
    pub switches: bool,
    /// Run deprecated API rewrites
    pub deprecated_apis: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nodes: 200_000,
            loops: true,
            switches: true,
            deprecated_apis: true,
        }
    }
}

impl EngineConfig {
    fn is_enabled(&self, transformation_type: TransformationType) -> bool {
        match transformation_type {
            TransformationType::LoopModernization => self.loops,
            TransformationType::SwitchModernization => self.switches,
            TransformationType::DeprecatedApi => self.deprecated_apis,
        }
    }
}

/// Central transformation orchestrator
pub struct TransformationEngine {
    /// Enabled transformers, in execution order
    transformers: Vec<Box<dyn Transformer>>,
    /// Engine configuration
    config: EngineConfig,
}

impl TransformationEngine {
    /// Create a new transformation engine
    pub fn new(config: EngineConfig) -> Self {
        let transformers = TransformationType::all()
            .into_iter()
            .filter(|t| config.is_enabled(*t))
            .map(default_transformer)
            .collect();
        Self {
            transformers,
            config,
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pass types that will run, in order
    pub fn enabled_passes(&self) -> Vec<TransformationType> {
        self.transformers
            .iter()
            .map(|t| t.transformation_type())
            .collect()
    }

    /// Rewrite `unit`, falling back to its original text on any failure.
    pub fn transform(&self, unit: &CompilationUnit) -> TransformOutcome {
        match self.try_transform(unit) {
            Ok((transformed, reports)) => {
                for report in &reports {
                    tracing::debug!(
                        "{}: {} rewrites",
                        report.transformation_type,
                        report.rewrites
                    );
                }
                TransformOutcome::Transformed {
                    unit: transformed,
                    reports,
                }
            }
            Err(e) => {
                tracing::warn!("Transformation fell back to original source: {}", e);
                TransformOutcome::FellBack {
                    original_text: unit.source().to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Run every enabled pass, stopping at the first failure.
    pub fn try_transform(
        &self,
        unit: &CompilationUnit,
    ) -> Result<(CompilationUnit, Vec<PassReport>)> {
        let nodes = unit.node_count();
        if nodes > self.config.max_nodes {
            return Err(TransformError::Budget {
                nodes,
                limit: self.config.max_nodes,
            });
        }

        let context = TransformContext {
            symbols: unit.symbols(),
        };
        let mut root = unit.root().clone();
        let mut reports = Vec::with_capacity(self.transformers.len());

        for transformer in &self.transformers {
            let (next, rewrites) = transformer.apply(root, &context)?;
            root = next;
            reports.push(PassReport {
                transformation_type: transformer.transformation_type(),
                rewrites,
            });
        }

        Ok((unit.with_root(root), reports))
    }
}

impl Default for TransformationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn default_transformer(transformation_type: TransformationType) -> Box<dyn Transformer> {
    match transformation_type {
        TransformationType::LoopModernization => Box::new(LoopTransformer::new()),
        TransformationType::SwitchModernization => Box::new(SwitchTransformer::new()),
        TransformationType::DeprecatedApi => Box::new(DeprecatedApiTransformer::new()),
    }
}
