// crates/orion-cli/src/commands/mod.rs
//
// Command module declarations for the ORION CLI.

pub mod measure;
pub mod proofs;
pub mod status;
pub mod theories;
pub mod verify;

use crate::output::OutputFormat;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    /// Daemon RPC endpoint.
    pub rpc: String,
    pub format: OutputFormat,
}
