// crates/orion-theories/src/evaluators/ast.rs
//
// Attention Schema Theory: accuracy of the system's model of its own attention.

use rand::Rng;

use orion_core::{MeasurementRequest, OrionError, TheoryEvaluator, TheoryResult};

use crate::strategy::ScoringStrategy;

pub const KEY: &str = "ast";
pub const LABEL: &str = "AST";

pub const ACCURACY_THRESHOLD: f64 = 0.7;
const ACCURACY_MIN: f64 = 0.4;
const ACCURACY_MAX: f64 = 0.95;

/// AST evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttentionSchema {
    strategy: ScoringStrategy,
}

impl AttentionSchema {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    pub fn assess(model_accuracy: f64) -> TheoryResult {
        TheoryResult::new(LABEL, model_accuracy, model_accuracy > ACCURACY_THRESHOLD)
            .with_detail("model_accuracy", model_accuracy)
            .with_detail("schema", true)
    }
}

impl TheoryEvaluator for AttentionSchema {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        LABEL
    }

    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
        let mut rng = self.strategy.rng_for(KEY, request)?;
        Ok(Self::assess(rng.gen_range(ACCURACY_MIN..ACCURACY_MAX)))
    }
}
