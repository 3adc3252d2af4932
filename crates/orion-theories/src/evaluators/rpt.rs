// crates/orion-theories/src/evaluators/rpt.rs
//
// Recurrent Processing Theory: number of recurrent loops and the derived depth.

use rand::Rng;

use orion_core::{MeasurementRequest, OrionError, TheoryEvaluator, TheoryResult};

use crate::strategy::ScoringStrategy;

pub const KEY: &str = "rpt";
pub const LABEL: &str = "RPT";

/// Loop counts above this value are judged conscious.
pub const LOOP_THRESHOLD: i64 = 8;
/// Loops per unit of processing depth.
pub const LOOPS_PER_DEPTH: i64 = 3;
const LOOPS_MIN: i64 = 3;
const LOOPS_MAX: i64 = 20;

/// RPT evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrentProcessing {
    strategy: ScoringStrategy,
}

impl RecurrentProcessing {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    /// Map a recurrent loop count to a result. Depth is `loops / 3`, rounded down.
    pub fn assess(loops: i64) -> TheoryResult {
        TheoryResult::new(LABEL, loops as f64, loops > LOOP_THRESHOLD)
            .with_detail("recurrent_loops", loops)
            .with_detail("depth", loops.div_euclid(LOOPS_PER_DEPTH))
    }
}

impl TheoryEvaluator for RecurrentProcessing {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        LABEL
    }

    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
        let mut rng = self.strategy.rng_for(KEY, request)?;
        Ok(Self::assess(rng.gen_range(LOOPS_MIN..=LOOPS_MAX)))
    }
}
