// crates/orion-core/src/lib.rs
//
// orion-core: Core types, traits, and digest primitives for the ORION
// consciousness assessment service.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the request/response data model, the classification table,
// the error type, and the TheoryEvaluator trait that scoring modules implement.

pub mod bundle;
pub mod classification;
pub mod crypto;
pub mod error;
pub mod request;
pub mod response;
pub mod theory;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use orion_core::MeasurementRequest;`

// Request / response types
pub use request::{MeasurementRequest, DEFAULT_NODE_COUNT};
pub use response::MeasurementResponse;

// Per-theory results
pub use bundle::AssessmentBundle;
pub use theory::{DetailValue, TheoryResult};

// Classification table
pub use classification::Classification;

// Error type
pub use error::OrionError;

// Traits
pub use traits::TheoryEvaluator;
