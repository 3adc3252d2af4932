// crates/orion-consensus/src/proof_chain.rs
//
// Append-only audit log of assessment digests.
//
// In the default `Log` mode each entry carries only its own content digest:
// the chain proves which bundles were assessed and in what order, but entries
// do not reference each other. `Linked` mode additionally stores
// link_n = SHA-256(link_{n-1} || digest_n) (hex strings, empty genesis link),
// which makes any edit to history detectable by `verify`.
//
// Only `append` takes the write lock. Readers get cloned snapshots.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use orion_core::crypto;
use orion_core::OrionError;

/// Whether entries are hash-linked to their predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainMode {
    /// Plain audit log of content digests.
    #[default]
    Log,
    /// Each entry also commits to the previous entry's link.
    Linked,
}

impl fmt::Display for ChainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainMode::Log => write!(f, "log"),
            ChainMode::Linked => write!(f, "linked"),
        }
    }
}

impl FromStr for ChainMode {
    type Err = OrionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" => Ok(ChainMode::Log),
            "linked" => Ok(ChainMode::Linked),
            other => Err(OrionError::Config(format!(
                "unknown chain mode '{}': use 'log' or 'linked'",
                other
            ))),
        }
    }
}

/// One recorded assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEntry {
    /// Zero-based position; the entry's permanent identity.
    pub sequence: u64,
    /// Full hex SHA-256 digest of the canonical assessment bundle.
    pub digest: String,
    /// When the entry was appended.
    pub recorded_at: DateTime<Utc>,
    /// Chain link (linked mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Compute the link for an entry given its predecessor's link.
pub fn link_digest(previous_link: Option<&str>, digest: &str) -> String {
    let mut material = String::with_capacity(128);
    material.push_str(previous_link.unwrap_or(""));
    material.push_str(digest);
    crypto::sha256_hex(material.as_bytes())
}

/// Check sequence continuity, digest shape, and (linked mode) every link.
pub fn verify_entries(mode: ChainMode, entries: &[ProofEntry]) -> bool {
    let mut previous_link: Option<&str> = None;
    for (idx, entry) in entries.iter().enumerate() {
        if entry.sequence != idx as u64 || !crypto::is_hex_digest(&entry.digest) {
            return false;
        }
        match mode {
            ChainMode::Log => {
                if entry.link.is_some() {
                    return false;
                }
            }
            ChainMode::Linked => {
                let expected = link_digest(previous_link, &entry.digest);
                match entry.link.as_deref() {
                    Some(link) if link == expected => previous_link = Some(link),
                    _ => return false,
                }
            }
        }
    }
    true
}

/// The append-only proof chain. Created empty at service start.
#[derive(Debug, Default)]
pub struct ProofChain {
    mode: ChainMode,
    entries: RwLock<Vec<ProofEntry>>,
}

impl ProofChain {
    /// Create an empty chain.
    pub fn new(mode: ChainMode) -> Self {
        Self {
            mode,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Rebuild a chain from previously exported entries, rejecting any
    /// history that fails verification.
    pub fn from_entries(mode: ChainMode, entries: Vec<ProofEntry>) -> Result<Self, OrionError> {
        if !verify_entries(mode, &entries) {
            return Err(OrionError::ProofChain(format!(
                "proof chain verification failed ({} entries, {} mode)",
                entries.len(),
                mode
            )));
        }
        Ok(Self {
            mode,
            entries: RwLock::new(entries),
        })
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    /// Append a digest and return its sequence position.
    pub fn append(&self, digest: String) -> Result<u64, OrionError> {
        if !crypto::is_hex_digest(&digest) {
            return Err(OrionError::ProofChain(format!(
                "proof digest must be 64 lowercase hex characters, got '{}'",
                digest
            )));
        }

        let mut entries = self.entries.write();
        let sequence = entries.len() as u64;
        let link = match self.mode {
            ChainMode::Log => None,
            ChainMode::Linked => {
                let previous = entries.last().and_then(|e| e.link.as_deref());
                Some(link_digest(previous, &digest))
            }
        };
        entries.push(ProofEntry {
            sequence,
            digest,
            recorded_at: Utc::now(),
            link,
        });
        Ok(sequence)
    }

    /// Snapshot of every entry, in sequence order.
    pub fn list(&self) -> Vec<ProofEntry> {
        self.entries.read().clone()
    }

    /// Snapshot of at most `limit` entries starting at `offset`.
    pub fn range(&self, offset: usize, limit: usize) -> Vec<ProofEntry> {
        self.entries
            .read()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Full hex digests, in sequence order.
    pub fn digests(&self) -> Vec<String> {
        self.entries.read().iter().map(|e| e.digest.clone()).collect()
    }

    pub fn get(&self, sequence: u64) -> Option<ProofEntry> {
        self.entries.read().get(sequence as usize).cloned()
    }

    pub fn latest(&self) -> Option<ProofEntry> {
        self.entries.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Re-check the whole history.
    pub fn verify(&self) -> bool {
        verify_entries(self.mode, &self.entries.read())
    }
}
