// crates/orion-theories/src/lib.rs
//
// orion-theories: the six built-in theory evaluators, their scoring
// strategies, and the ordered registry the aggregator resolves them from.

pub mod evaluators;
pub mod registry;
pub mod strategy;

pub use evaluators::{
    AttentionSchema, FreeEnergy, GlobalWorkspace, HigherOrderThought, IntegratedInformation,
    RecurrentProcessing, BUILTIN_KEYS,
};
pub use registry::{TheoryRegistry, WorkingSet};
pub use strategy::ScoringStrategy;
