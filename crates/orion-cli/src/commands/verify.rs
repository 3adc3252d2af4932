// crates/orion-cli/src/commands/verify.rs
//
// `orion verify`: ask the daemon to re-check its proof chain.

use orion_rpc::handlers::proofs::VerifyChainResponse;

use super::Context;
use crate::output::{self, OutputFormat};
use crate::rpc_client;

/// Run the verify command. Fails when the chain does not verify.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let response: VerifyChainResponse =
        rpc_client::call(&ctx.rpc, "proofs/verify", serde_json::json!({})).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::format_json(&response)),
        OutputFormat::Table => {
            let verdict = if response.valid { "VALID" } else { "INVALID" };
            println!(
                "Proof chain {} ({} entries, {} mode)",
                verdict, response.length, response.mode
            );
        }
    }

    if !response.valid {
        return Err("proof chain verification failed".into());
    }
    Ok(())
}
