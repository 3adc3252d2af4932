// crates/orion-rpc/src/lib.rs
//
// orion-rpc: JSON-RPC server and handlers for the ORION assessment service.
//
// A single tonic service accepts JSON-encoded `{ method, params }` envelopes
// over HTTP/1 or HTTP/2, dispatches to the handler for the method, and
// returns a JSON `{ success, result, error }` envelope.

pub mod handlers;
pub mod middleware;
pub mod server;

// Re-export the main server type for ergonomic access.
pub use server::{JsonRpcRequest, JsonRpcResponse, OrionRpcServer, RpcConfig};
