// crates/orion-cli/src/commands/status.rs
//
// `orion status`: display daemon health and version info.

use serde::Serialize;

use orion_rpc::handlers::node::{GetHealthResponse, GetNodeInfoResponse};

use super::Context;
use crate::output::{self, OutputFormat};
use crate::rpc_client;

#[derive(Serialize)]
struct Status {
    health: GetHealthResponse,
    info: GetNodeInfoResponse,
}

/// Run the status command.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let health: GetHealthResponse =
        rpc_client::call(&ctx.rpc, "node/health", serde_json::json!({})).await?;
    let info: GetNodeInfoResponse =
        rpc_client::call(&ctx.rpc, "node/info", serde_json::json!({})).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::format_json(&Status { health, info })),
        OutputFormat::Table => {
            println!("ORION daemon v{}", info.version);
            println!();
            println!("Node Status");
            println!("-----------");
            println!("  RPC endpoint:     {}", ctx.rpc);
            println!("  Status:           {}", health.status);
            println!("  Uptime:           {}s", info.uptime_seconds);
            println!("  Theories:         {}", health.theories);
            println!("  Proofs:           {}", health.proofs);
            println!("  Scoring:          {}", info.scoring_strategy);
            println!("  Unknown theories: {}", info.unknown_theories);
            println!("  Proof chain:      {}", info.chain_mode);
        }
    }
    Ok(())
}
