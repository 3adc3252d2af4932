// crates/orion-theories/src/strategy.rs
//
// How an evaluator draws the raw quantity it scores.
//
// Sampling draws from a fresh entropy-seeded RNG on every call, so two calls
// with identical input may disagree. Deterministic seeds the RNG from a
// SHA-256 digest of the theory key, node count and state, so identical input
// always yields identical results.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use orion_core::crypto;
use orion_core::{MeasurementRequest, OrionError};

/// Evaluator scoring strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// Pseudo-random sampling per call.
    #[default]
    Sampling,
    /// Seeded from the request content.
    Deterministic,
}

impl ScoringStrategy {
    /// Build the RNG an evaluator should draw from for this request.
    pub fn rng_for(self, theory: &str, request: &MeasurementRequest) -> Result<StdRng, OrionError> {
        match self {
            ScoringStrategy::Sampling => Ok(StdRng::from_entropy()),
            ScoringStrategy::Deterministic => Ok(StdRng::from_seed(input_seed(theory, request)?)),
        }
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringStrategy::Sampling => write!(f, "sampling"),
            ScoringStrategy::Deterministic => write!(f, "deterministic"),
        }
    }
}

impl FromStr for ScoringStrategy {
    type Err = OrionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sampling" => Ok(ScoringStrategy::Sampling),
            "deterministic" => Ok(ScoringStrategy::Deterministic),
            other => Err(OrionError::Config(format!(
                "unknown scoring strategy '{}': use 'sampling' or 'deterministic'",
                other
            ))),
        }
    }
}

/// SHA-256 over the canonical JSON `{nodes, state, theory}`.
///
/// Including the theory key keeps the six evaluators from drawing the same
/// stream for the same input.
pub fn input_seed(theory: &str, request: &MeasurementRequest) -> Result<[u8; 32], OrionError> {
    let material = serde_json::json!({
        "theory": theory,
        "nodes": request.node_count,
        "state": request.state,
    });
    let bytes = serde_json::to_vec(&sorted_keys(material))?;
    Ok(crypto::hash_bytes(&bytes))
}

/// Rebuild every object with its keys in lexicographic order, whatever the
/// map representation serde_json was built with.
fn sorted_keys(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sorted_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted_keys).collect()),
        other => other,
    }
}
