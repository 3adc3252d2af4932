// crates/orion-rpc/src/handlers/mod.rs
//
// Handler modules for all RPC endpoints.
// Each module defines request/response types and handler functions
// for a specific API group.

pub mod measure;
pub mod node;
pub mod proofs;
pub mod theories;
