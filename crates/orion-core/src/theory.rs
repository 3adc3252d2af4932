// crates/orion-core/src/theory.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar diagnostic value exposed by an evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for DetailValue {
    fn from(v: bool) -> Self {
        DetailValue::Bool(v)
    }
}

impl From<i64> for DetailValue {
    fn from(v: i64) -> Self {
        DetailValue::Int(v)
    }
}

impl From<f64> for DetailValue {
    fn from(v: f64) -> Self {
        DetailValue::Float(v)
    }
}

impl From<&str> for DetailValue {
    fn from(v: &str) -> Self {
        DetailValue::Text(v.to_string())
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Bool(v) => write!(f, "{}", v),
            DetailValue::Int(v) => write!(f, "{}", v),
            DetailValue::Float(v) => write!(f, "{:.4}", v),
            DetailValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// One theory's verdict on a system.
///
/// Field order is part of the canonical serialization used for proof digests:
/// name, score, conscious, details. Details are keyed in a `BTreeMap` so their
/// order is lexicographic regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryResult {
    /// Canonical label of the theory (e.g., "IIT").
    pub name: String,
    /// Raw score on the theory's own scale.
    pub score: f64,
    /// Whether this theory judges the system conscious.
    pub conscious: bool,
    /// Intermediate quantities used to reach the verdict.
    pub details: BTreeMap<String, DetailValue>,
}

impl TheoryResult {
    /// Create a result with no details.
    pub fn new(name: impl Into<String>, score: f64, conscious: bool) -> Self {
        Self {
            name: name.into(),
            score,
            conscious,
            details: BTreeMap::new(),
        }
    }

    /// Attach a diagnostic detail.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Name of the first float field holding NaN or an infinity: `"score"`
    /// or a details key. JSON has no encoding for these values.
    pub fn non_finite_field(&self) -> Option<&str> {
        if !self.score.is_finite() {
            return Some("score");
        }
        self.details
            .iter()
            .find(|(_, v)| matches!(v, DetailValue::Float(f) if !f.is_finite()))
            .map(|(k, _)| k.as_str())
    }

    /// True when every float field is finite.
    pub fn is_finite(&self) -> bool {
        self.non_finite_field().is_none()
    }
}
