// crates/orion-core/src/request.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::OrionError;

/// Node count used when a request does not specify one.
pub const DEFAULT_NODE_COUNT: u32 = 8;

/// Longest theory name accepted in a filter.
const MAX_THEORY_NAME_LEN: usize = 64;

fn default_node_count() -> u32 {
    DEFAULT_NODE_COUNT
}

/// Input to a single assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRequest {
    /// Number of nodes in the assessed system. Must be positive.
    #[serde(rename = "nodes", default = "default_node_count")]
    pub node_count: u32,
    /// Opaque system state. Evaluator-specific; may be absent.
    #[serde(default)]
    pub state: Option<Vec<serde_json::Value>>,
    /// Restricts which theories run. `None` runs every registered theory;
    /// an empty set selects nothing and yields an empty, C-0 assessment.
    #[serde(rename = "theories", default)]
    pub theory_filter: Option<BTreeSet<String>>,
}

impl Default for MeasurementRequest {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            state: None,
            theory_filter: None,
        }
    }
}

impl MeasurementRequest {
    /// Restrict the request to the given theory names.
    pub fn with_theories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.theory_filter = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an opaque state vector.
    pub fn with_state(mut self, state: Vec<serde_json::Value>) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the node count.
    pub fn with_node_count(mut self, node_count: u32) -> Self {
        self.node_count = node_count;
        self
    }

    /// Check the request shape before any evaluator runs.
    ///
    /// Rejects a zero node count and filter names that are empty, overlong,
    /// or contain characters other than ASCII alphanumerics, `-` and `_`.
    pub fn validate(&self) -> Result<(), OrionError> {
        if self.node_count == 0 {
            return Err(OrionError::InvalidRequest(
                "node count must be positive".to_string(),
            ));
        }

        if let Some(filter) = &self.theory_filter {
            for name in filter {
                validate_theory_name(name)?;
            }
        }

        Ok(())
    }

    /// Whether the named theory should run for this request.
    pub fn selects(&self, theory: &str) -> bool {
        match &self.theory_filter {
            Some(filter) => filter.contains(theory),
            None => true,
        }
    }
}

fn validate_theory_name(name: &str) -> Result<(), OrionError> {
    if name.is_empty() {
        return Err(OrionError::InvalidRequest(
            "theory name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_THEORY_NAME_LEN {
        return Err(OrionError::InvalidRequest(format!(
            "theory name exceeds {} bytes",
            MAX_THEORY_NAME_LEN
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(OrionError::InvalidRequest(format!(
            "theory name '{}' contains invalid character {:?}",
            name, bad
        )));
    }
    Ok(())
}
