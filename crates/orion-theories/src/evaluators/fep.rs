// crates/orion-theories/src/evaluators/fep.rs
//
// Free Energy Principle: low variational free energy indicates a good
// self-model. Unlike the other theories, the verdict is true BELOW the threshold.

use rand::Rng;

use orion_core::{MeasurementRequest, OrionError, TheoryEvaluator, TheoryResult};

use crate::strategy::ScoringStrategy;

pub const KEY: &str = "fep";
pub const LABEL: &str = "FEP";

/// Free energy below this value is judged conscious.
pub const FREE_ENERGY_THRESHOLD: f64 = 0.25;
/// Prediction error estimate as a fraction of free energy.
pub const PREDICTION_ERROR_FACTOR: f64 = 0.5;
const FREE_ENERGY_MIN: f64 = 0.05;
const FREE_ENERGY_MAX: f64 = 0.5;

/// FEP evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeEnergy {
    strategy: ScoringStrategy,
}

impl FreeEnergy {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    pub fn assess(free_energy: f64) -> TheoryResult {
        TheoryResult::new(LABEL, free_energy, free_energy < FREE_ENERGY_THRESHOLD)
            .with_detail("free_energy", free_energy)
            .with_detail("prediction_error", free_energy * PREDICTION_ERROR_FACTOR)
    }
}

impl TheoryEvaluator for FreeEnergy {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        LABEL
    }

    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
        let mut rng = self.strategy.rng_for(KEY, request)?;
        Ok(Self::assess(rng.gen_range(FREE_ENERGY_MIN..FREE_ENERGY_MAX)))
    }
}
