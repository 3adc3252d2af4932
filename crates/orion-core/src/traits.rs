// crates/orion-core/src/traits.rs

use crate::error::OrionError;
use crate::request::MeasurementRequest;
use crate::theory::TheoryResult;

/// Trait for a pluggable scoring theory.
///
/// Implemented by the evaluators in orion-theories. Evaluators must be pure
/// with respect to shared state so the aggregator can run them from any
/// number of concurrent requests.
pub trait TheoryEvaluator: Send + Sync {
    /// Registry key (lowercase, e.g. "iit").
    fn key(&self) -> &str;

    /// Canonical label reported in results (e.g. "IIT").
    fn label(&self) -> &str;

    /// Score the system described by `request`.
    fn evaluate(&self, request: &MeasurementRequest) -> Result<TheoryResult, OrionError>;
}
