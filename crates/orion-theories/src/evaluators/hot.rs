// crates/orion-theories/src/evaluators/hot.rs
//
// Higher-Order Thought: level of meta-representation.

use rand::Rng;

use orion_core::{MeasurementRequest, OrionError, TheoryEvaluator, TheoryResult};

use crate::strategy::ScoringStrategy;

pub const KEY: &str = "hot";
pub const LABEL: &str = "HOT";

/// Meta-representation level at or above this value is judged conscious.
pub const META_LEVEL_THRESHOLD: i64 = 3;
const META_LEVEL_MIN: i64 = 1;
const META_LEVEL_MAX: i64 = 5;

/// HOT evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HigherOrderThought {
    strategy: ScoringStrategy,
}

impl HigherOrderThought {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    /// Map a meta-representation level to a result.
    pub fn assess(meta_level: i64) -> TheoryResult {
        TheoryResult::new(LABEL, meta_level as f64, meta_level >= META_LEVEL_THRESHOLD)
            .with_detail("meta_level", meta_level)
            .with_detail("representation", true)
    }
}

impl TheoryEvaluator for HigherOrderThought {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        LABEL
    }

    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
        let mut rng = self.strategy.rng_for(KEY, request)?;
        Ok(Self::assess(rng.gen_range(META_LEVEL_MIN..=META_LEVEL_MAX)))
    }
}
