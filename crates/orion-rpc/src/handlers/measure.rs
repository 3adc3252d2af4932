// crates/orion-rpc/src/handlers/measure.rs
//
// Measure handler: run one assessment through the shared aggregator.

use orion_consensus::Aggregator;
use orion_core::{MeasurementRequest, MeasurementResponse};

/// Handle a Measure request.
///
/// The request body is the MeasurementRequest itself (`nodes`, `state`,
/// `theories`). Any aggregator error is returned as its display string and
/// leaves the proof chain untouched.
pub async fn handle_measure(
    request: MeasurementRequest,
    aggregator: &Aggregator,
) -> Result<MeasurementResponse, String> {
    aggregator.measure(&request).map_err(|e| {
        tracing::warn!("Measurement failed: {}", e);
        e.to_string()
    })
}
