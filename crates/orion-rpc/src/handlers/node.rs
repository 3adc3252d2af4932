// crates/orion-rpc/src/handlers/node.rs
//
// Node info and health handlers: GetNodeInfo, GetHealth.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use orion_consensus::{Aggregator, ChainMode, UnknownTheoryPolicy};
use orion_theories::ScoringStrategy;

// ---------------------------------------------------------------------------
// GetNodeInfo
// ---------------------------------------------------------------------------

/// Request for node information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNodeInfoRequest {}

/// Response containing node information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNodeInfoResponse {
    /// Software version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Scoring strategy the evaluators were built with.
    pub scoring_strategy: ScoringStrategy,
    /// Proof chain mode.
    pub chain_mode: ChainMode,
    /// Handling of unregistered theory names.
    pub unknown_theories: UnknownTheoryPolicy,
}

/// Handle a GetNodeInfo request.
pub async fn handle_get_node_info(
    _request: GetNodeInfoRequest,
    aggregator: &Aggregator,
    scoring_strategy: ScoringStrategy,
    start_time: Option<Instant>,
) -> Result<GetNodeInfoResponse, String> {
    Ok(GetNodeInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: start_time.map(|t| t.elapsed().as_secs()).unwrap_or(0),
        scoring_strategy,
        chain_mode: aggregator.proof_chain().mode(),
        unknown_theories: aggregator.config().unknown_theories,
    })
}

// ---------------------------------------------------------------------------
// GetHealth
// ---------------------------------------------------------------------------

/// Request for node health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthRequest {}

/// Response containing node health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthResponse {
    /// "healthy" or "degraded".
    pub status: String,
    /// Number of registered theories.
    pub theories: usize,
    /// Number of recorded proofs.
    pub proofs: usize,
}

/// Handle a GetHealth request.
///
/// Degraded when no theories are registered, since every assessment would
/// then classify as C-0.
pub async fn handle_get_health(
    _request: GetHealthRequest,
    aggregator: &Aggregator,
) -> Result<GetHealthResponse, String> {
    let theories = aggregator.registry().len();
    let status = if theories > 0 { "healthy" } else { "degraded" };
    Ok(GetHealthResponse {
        status: status.to_string(),
        theories,
        proofs: aggregator.proof_chain().len(),
    })
}
