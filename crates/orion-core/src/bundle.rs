// crates/orion-core/src/bundle.rs
//
// AssessmentBundle: the per-theory results produced by one assessment.
//
// Entries keep registry order for presentation. The canonical byte form used
// for proof digests is independent of that order: keys are sorted
// lexicographically before serialization.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto;
use crate::error::OrionError;
use crate::theory::TheoryResult;

/// Mapping from theory key to result, in insertion (registry) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentBundle {
    entries: Vec<(String, TheoryResult)>,
}

impl AssessmentBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result under the given key. A repeated key replaces the earlier
    /// result in place.
    pub fn insert(&mut self, key: impl Into<String>, result: TheoryResult) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = result,
            None => self.entries.push((key, result)),
        }
    }

    /// Look up a result by theory key.
    pub fn get(&self, key: &str) -> Option<&TheoryResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, result)| result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Theory keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate `(key, result)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TheoryResult)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Number of results whose verdict is "conscious".
    pub fn consensus_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.conscious).count()
    }

    /// Canonical JSON bytes: bundle keys and details keys sorted
    /// lexicographically; each result's fields in declaration order
    /// (name, score, conscious, details).
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, OrionError> {
        let sorted: BTreeMap<&str, &TheoryResult> =
            self.entries.iter().map(|(k, r)| (k.as_str(), r)).collect();
        Ok(serde_json::to_vec(&sorted)?)
    }

    /// Hex-encoded SHA-256 digest of the canonical bytes.
    pub fn content_digest(&self) -> Result<String, OrionError> {
        let bytes = self.canonical_bytes()?;
        Ok(crypto::sha256_hex(&bytes))
    }
}

impl FromIterator<(String, TheoryResult)> for AssessmentBundle {
    fn from_iter<I: IntoIterator<Item = (String, TheoryResult)>>(iter: I) -> Self {
        let mut bundle = AssessmentBundle::new();
        for (key, result) in iter {
            bundle.insert(key, result);
        }
        bundle
    }
}

impl Serialize for AssessmentBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, result) in &self.entries {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}

struct BundleVisitor;

impl<'de> Visitor<'de> for BundleVisitor {
    type Value = AssessmentBundle;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of theory key to theory result")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut bundle = AssessmentBundle::new();
        while let Some((key, result)) = access.next_entry::<String, TheoryResult>()? {
            bundle.insert(key, result);
        }
        Ok(bundle)
    }
}

impl<'de> Deserialize<'de> for AssessmentBundle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BundleVisitor)
    }
}
