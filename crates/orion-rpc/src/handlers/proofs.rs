// crates/orion-rpc/src/handlers/proofs.rs
//
// Proof chain handlers: ListProofs, VerifyChain.

use serde::{Deserialize, Serialize};

use orion_consensus::{Aggregator, ChainMode, ProofEntry};

/// Upper bound on entries returned by one ListProofs call.
pub const MAX_PAGE_SIZE: usize = 1000;

fn default_limit() -> usize {
    MAX_PAGE_SIZE
}

// ---------------------------------------------------------------------------
// ListProofs
// ---------------------------------------------------------------------------

/// Request for a page of proof entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProofsRequest {
    /// First sequence position to return.
    #[serde(default)]
    pub offset: usize,
    /// Maximum entries to return (capped at MAX_PAGE_SIZE).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// A page of proof entries with full digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProofsResponse {
    /// Total number of entries in the chain.
    pub total: usize,
    pub proofs: Vec<ProofEntry>,
}

pub async fn handle_list_proofs(
    request: ListProofsRequest,
    aggregator: &Aggregator,
) -> Result<ListProofsResponse, String> {
    let chain = aggregator.proof_chain();
    let limit = request.limit.min(MAX_PAGE_SIZE);
    Ok(ListProofsResponse {
        total: chain.len(),
        proofs: chain.range(request.offset, limit),
    })
}

// ---------------------------------------------------------------------------
// VerifyChain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyChainRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyChainResponse {
    pub valid: bool,
    pub length: usize,
    pub mode: ChainMode,
}

/// Handle a VerifyChain request by re-checking the entire history.
pub async fn handle_verify_chain(
    _request: VerifyChainRequest,
    aggregator: &Aggregator,
) -> Result<VerifyChainResponse, String> {
    let chain = aggregator.proof_chain();
    let valid = chain.verify();
    if !valid {
        tracing::error!("Proof chain verification failed");
    }
    Ok(VerifyChainResponse {
        valid,
        length: chain.len(),
        mode: chain.mode(),
    })
}
