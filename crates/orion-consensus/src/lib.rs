// crates/orion-consensus/src/lib.rs
//
// orion-consensus: the aggregation engine and the append-only proof chain.
//
// The Aggregator runs the theories selected for a request, derives the
// consensus count and classification, and records a SHA-256 digest of every
// completed assessment in the ProofChain.

pub mod aggregator;
pub mod proof_chain;

pub use aggregator::{Aggregator, AggregatorConfig, UnknownTheoryPolicy};
pub use proof_chain::{ChainMode, ProofChain, ProofEntry};
