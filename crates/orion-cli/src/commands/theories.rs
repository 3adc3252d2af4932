// crates/orion-cli/src/commands/theories.rs
//
// `orion theories`: list the theories registered on the daemon.

use tabled::Tabled;

use orion_rpc::handlers::theories::ListTheoriesResponse;

use super::Context;
use crate::output::{self, OutputFormat};
use crate::rpc_client;

#[derive(Tabled)]
struct TheoryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Theory")]
    key: String,
}

/// Run the theories command.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let response: ListTheoriesResponse =
        rpc_client::call(&ctx.rpc, "theories/list", serde_json::json!({})).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::format_json(&response)),
        OutputFormat::Table => {
            let rows: Vec<TheoryRow> = response
                .theories
                .into_iter()
                .enumerate()
                .map(|(position, key)| TheoryRow { position, key })
                .collect();
            println!("{}", output::format_table(&rows));
        }
    }
    Ok(())
}
