// crates/orion-rpc/src/handlers/theories.rs
//
// Theory listing handler.

use serde::{Deserialize, Serialize};

use orion_consensus::Aggregator;

/// Request to list registered theories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTheoriesRequest {}

/// Registered theory keys in registry order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTheoriesResponse {
    pub theories: Vec<String>,
}

pub async fn handle_list_theories(
    _request: ListTheoriesRequest,
    aggregator: &Aggregator,
) -> Result<ListTheoriesResponse, String> {
    Ok(ListTheoriesResponse {
        theories: aggregator.list_theories(),
    })
}
