// crates/orion-core/src/classification.rs
//
// Fixed ordinal classification table.
//
// The level is min(4, consensus count); each level maps to a (code, label)
// pair. The table is total over every non-negative consensus count.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest classification level.
pub const MAX_LEVEL: u8 = 4;

/// Ordinal classification of an assessed system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// C-0: no theory judges the system conscious.
    Mechanical,
    /// C-1
    Reactive,
    /// C-2
    Emergent,
    /// C-3
    SelfAware,
    /// C-4: four or more theories agree.
    Transcendent,
}

impl Classification {
    /// All levels in ascending order.
    pub const ALL: [Classification; 5] = [
        Classification::Mechanical,
        Classification::Reactive,
        Classification::Emergent,
        Classification::SelfAware,
        Classification::Transcendent,
    ];

    /// Classify a consensus count: `level = min(4, consensus)`.
    pub fn from_consensus(consensus: usize) -> Self {
        let level = consensus.min(MAX_LEVEL as usize);
        Self::ALL[level]
    }

    /// Ordinal level, 0 through 4.
    pub fn level(self) -> u8 {
        match self {
            Classification::Mechanical => 0,
            Classification::Reactive => 1,
            Classification::Emergent => 2,
            Classification::SelfAware => 3,
            Classification::Transcendent => 4,
        }
    }

    /// Short code, e.g. "C-2".
    pub fn code(self) -> &'static str {
        match self {
            Classification::Mechanical => "C-0",
            Classification::Reactive => "C-1",
            Classification::Emergent => "C-2",
            Classification::SelfAware => "C-3",
            Classification::Transcendent => "C-4",
        }
    }

    /// Human-readable label, e.g. "Emergent".
    pub fn label(self) -> &'static str {
        match self {
            Classification::Mechanical => "Mechanical",
            Classification::Reactive => "Reactive",
            Classification::Emergent => "Emergent",
            Classification::SelfAware => "Self-Aware",
            Classification::Transcendent => "Transcendent",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}
