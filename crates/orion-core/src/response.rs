// crates/orion-core/src/response.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bundle::AssessmentBundle;
use crate::classification::Classification;
use crate::crypto;

/// Result of one assessment, handed to the transport layer for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResponse {
    /// Classification code, e.g. "C-2".
    pub classification: String,
    /// Classification label, e.g. "Emergent".
    pub label: String,
    /// Per-theory results keyed by theory key, in registry order.
    pub theories: AssessmentBundle,
    /// Number of theories whose verdict is "conscious".
    pub consensus: usize,
    /// Proof reference: `"sha256:<first 16 hex chars of the digest>"`.
    pub proof: String,
    /// Position of this assessment's entry in the proof chain.
    pub sequence: u64,
    /// When the response was assembled (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MeasurementResponse {
    /// Assemble a response from a finished bundle and its recorded proof.
    pub fn assemble(theories: AssessmentBundle, digest_hex: &str, sequence: u64) -> Self {
        let consensus = theories.consensus_count();
        let classification = Classification::from_consensus(consensus);
        Self {
            classification: classification.code().to_string(),
            label: classification.label().to_string(),
            theories,
            consensus,
            proof: crypto::proof_reference(digest_hex),
            sequence,
            timestamp: Utc::now(),
        }
    }
}
