// crates/orion-theories/src/registry.rs
//
// Ordered registry of theory evaluators.
//
// Evaluators are registered once at startup; afterwards the registry is
// read-only and can be shared across threads without locking.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use orion_core::{OrionError, TheoryEvaluator};

use crate::evaluators::{self, BUILTIN_KEYS};
use crate::strategy::ScoringStrategy;

/// The evaluators selected for one request.
pub struct WorkingSet {
    /// Evaluators to run, in registry order.
    pub evaluators: Vec<Arc<dyn TheoryEvaluator>>,
    /// Filter names that matched no registered theory, sorted.
    pub unresolved: Vec<String>,
}

/// Canonical ordered list of available theories.
#[derive(Clone, Default)]
pub struct TheoryRegistry {
    evaluators: Vec<Arc<dyn TheoryEvaluator>>,
}

impl fmt::Debug for TheoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TheoryRegistry")
            .field("theories", &self.list())
            .finish()
    }
}

impl TheoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding all six built-in theories in canonical order.
    pub fn with_defaults(strategy: ScoringStrategy) -> Self {
        let mut registry = Self::new();
        for key in BUILTIN_KEYS {
            if let Some(evaluator) = evaluators::builtin(key, strategy) {
                registry.evaluators.push(evaluator);
            }
        }
        registry
    }

    /// Registry holding the named built-in theories, in the order given.
    ///
    /// Returns a `Config` error for an unknown or repeated key.
    pub fn with_builtins<S: AsRef<str>>(
        keys: &[S],
        strategy: ScoringStrategy,
    ) -> Result<Self, OrionError> {
        let mut registry = Self::new();
        for key in keys {
            let key = key.as_ref();
            let evaluator = evaluators::builtin(key, strategy).ok_or_else(|| {
                OrionError::Config(format!(
                    "unknown built-in theory '{}' (available: {})",
                    key,
                    BUILTIN_KEYS.join(", ")
                ))
            })?;
            registry.register(evaluator)?;
        }
        Ok(registry)
    }

    /// Append an evaluator. Keys must be unique.
    pub fn register(&mut self, evaluator: Arc<dyn TheoryEvaluator>) -> Result<(), OrionError> {
        if self.resolve(evaluator.key()).is_some() {
            return Err(OrionError::Config(format!(
                "theory '{}' is already registered",
                evaluator.key()
            )));
        }
        tracing::debug!("Registered theory {} ({})", evaluator.key(), evaluator.label());
        self.evaluators.push(evaluator);
        Ok(())
    }

    /// Registered theory keys, in registration order.
    pub fn list(&self) -> Vec<String> {
        self.evaluators.iter().map(|e| e.key().to_string()).collect()
    }

    /// Look up an evaluator by key.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn TheoryEvaluator>> {
        self.evaluators.iter().find(|e| e.key() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Registry order intersected with `filter`. `None` selects everything.
    pub fn working_set(&self, filter: Option<&BTreeSet<String>>) -> WorkingSet {
        match filter {
            None => WorkingSet {
                evaluators: self.evaluators.clone(),
                unresolved: Vec::new(),
            },
            Some(filter) => {
                let evaluators = self
                    .evaluators
                    .iter()
                    .filter(|e| filter.contains(e.key()))
                    .cloned()
                    .collect();
                let unresolved = filter
                    .iter()
                    .filter(|name| self.resolve(name).is_none())
                    .cloned()
                    .collect();
                WorkingSet {
                    evaluators,
                    unresolved,
                }
            }
        }
    }
}
