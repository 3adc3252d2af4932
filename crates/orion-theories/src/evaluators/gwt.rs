// crates/orion-theories/src/evaluators/gwt.rs
//
// Global Workspace Theory: ignition when the broadcast ratio is high enough.

use rand::Rng;

use orion_core::{MeasurementRequest, OrionError, TheoryEvaluator, TheoryResult};

use crate::strategy::ScoringStrategy;

pub const KEY: &str = "gwt";
pub const LABEL: &str = "GWT";

/// Broadcast ratio above this value triggers ignition.
pub const IGNITION_THRESHOLD: f64 = 0.7;
const BROADCAST_MIN: f64 = 0.3;
const BROADCAST_MAX: f64 = 0.95;

/// GWT evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalWorkspace {
    strategy: ScoringStrategy,
}

impl GlobalWorkspace {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    /// Map a broadcast ratio to a result.
    pub fn assess(broadcast_ratio: f64) -> TheoryResult {
        let ignition = broadcast_ratio > IGNITION_THRESHOLD;
        TheoryResult::new(LABEL, broadcast_ratio, ignition)
            .with_detail("broadcast_ratio", broadcast_ratio)
            .with_detail("ignition", ignition)
    }
}

impl TheoryEvaluator for GlobalWorkspace {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        LABEL
    }

    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
        let mut rng = self.strategy.rng_for(KEY, request)?;
        Ok(Self::assess(rng.gen_range(BROADCAST_MIN..BROADCAST_MAX)))
    }
}
