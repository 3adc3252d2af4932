// crates/orion-cli/src/main.rs
//
// CLI entrypoint for the ORION developer tools.
//
// Talks to a running orion-daemon over JSON-RPC: run assessments, list
// theories, page through and verify the proof chain, check node status.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::measure::MeasureCmd;
use commands::proofs::ProofsCmd;
use commands::Context;
use output::OutputFormat;

/// ORION CLI: developer tools for the consciousness assessment service.
#[derive(Parser, Debug)]
#[command(name = "orion", version, about = "ORION consciousness assessment CLI")]
struct Cli {
    /// RPC endpoint for the orion-daemon.
    #[arg(long, global = true, default_value = "http://localhost:50061")]
    rpc: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an assessment and print the per-theory results.
    Measure(MeasureCmd),

    /// List registered theories.
    Theories,

    /// List recorded proof entries.
    Proofs(ProofsCmd),

    /// Verify the integrity of the proof chain.
    Verify,

    /// Display daemon health and version info.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let ctx = Context {
        rpc: cli.rpc.clone(),
        format: OutputFormat::from_flag(cli.json),
    };

    match &cli.command {
        Commands::Measure(cmd) => commands::measure::run(cmd, &ctx).await?,
        Commands::Theories => commands::theories::run(&ctx).await?,
        Commands::Proofs(cmd) => commands::proofs::run(cmd, &ctx).await?,
        Commands::Verify => commands::verify::run(&ctx).await?,
        Commands::Status => commands::status::run(&ctx).await?,
    }

    Ok(())
}
