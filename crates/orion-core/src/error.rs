use thiserror::Error;

/// Service-wide error types for ORION assessments.
#[derive(Debug, Error)]
pub enum OrionError {
    /// Request failed shape validation (node count, theory names).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A registered evaluator failed while scoring. The whole assessment is aborted.
    #[error("Evaluator failure in theory '{theory}': {reason}")]
    EvaluatorFailure { theory: String, reason: String },

    /// A requested theory is not registered (strict mode only).
    #[error("Unknown theory requested: {0}")]
    UnknownTheoryRequested(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The proof chain refused an entry or a restored history.
    #[error("Proof chain error: {0}")]
    ProofChain(String),

    /// Invalid configuration or registration.
    #[error("Config error: {0}")]
    Config(String),
}

impl OrionError {
    /// Build an `EvaluatorFailure` for the given theory key.
    pub fn evaluator(theory: impl Into<String>, reason: impl Into<String>) -> Self {
        OrionError::EvaluatorFailure {
            theory: theory.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for OrionError {
    fn from(e: serde_json::Error) -> Self {
        OrionError::Serialization(e.to_string())
    }
}
