// crates/orion-cli/src/commands/proofs.rs
//
// `orion proofs`: page through the daemon's proof chain.

use clap::Args;
use tabled::Tabled;

use orion_rpc::handlers::proofs::ListProofsResponse;

use super::Context;
use crate::output::{self, OutputFormat};
use crate::rpc_client;

/// List recorded proof entries.
#[derive(Debug, Args)]
pub struct ProofsCmd {
    /// Sequence number of the first entry to show.
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Maximum number of entries to show.
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

#[derive(Tabled)]
struct ProofRow {
    #[tabled(rename = "Seq")]
    sequence: u64,
    #[tabled(rename = "Digest")]
    digest: String,
    #[tabled(rename = "Recorded")]
    recorded_at: String,
    #[tabled(rename = "Link")]
    link: String,
}

/// Run the proofs command.
pub async fn run(cmd: &ProofsCmd, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let params = serde_json::json!({ "offset": cmd.offset, "limit": cmd.limit });
    let response: ListProofsResponse = rpc_client::call(&ctx.rpc, "proofs/list", params).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::format_json(&response)),
        OutputFormat::Table => {
            if response.proofs.is_empty() {
                println!("No proofs in range ({} recorded).", response.total);
                return Ok(());
            }
            let shown = response.proofs.len();
            let rows: Vec<ProofRow> = response
                .proofs
                .into_iter()
                .map(|entry| ProofRow {
                    sequence: entry.sequence,
                    digest: output::short_digest(&entry.digest),
                    recorded_at: entry.recorded_at.to_rfc3339(),
                    link: entry
                        .link
                        .as_deref()
                        .map(output::short_digest)
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            println!("{}", output::format_table(&rows));
            println!("Showing {} of {} proofs.", shown, response.total);
        }
    }
    Ok(())
}
