//! CEFR proficiency bands.
//!
//! [`CefrLevel`] is a total order of increasing complexity: A1 < A2 < B1 <
//! B2 < C1. The validator keys its vocabulary and grammar expectations off
//! the band, so the ordering is load-bearing, not cosmetic.

use serde::{Deserialize, Serialize};

/// Common European Framework of Reference proficiency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    /// Beginner.
    A1,
    /// Elementary.
    A2,
    /// Intermediate.
    B1,
    /// Upper intermediate.
    B2,
    /// Advanced.
    C1,
}

impl CefrLevel {
    /// All bands in ascending complexity order.
    pub const ALL: [Self; 5] = [Self::A1, Self::A2, Self::B1, Self::B2, Self::C1];

    /// Band string as it appears on the wire ("A1" .. "C1").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
        }
    }

    /// Short learner-facing descriptor, used when building prompts.
    #[must_use]
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::A1 => "beginner",
            Self::A2 => "elementary",
            Self::B1 => "intermediate",
            Self::B2 => "upper intermediate",
            Self::C1 => "advanced",
        }
    }

    /// Whether this band expects simple vocabulary and grammar (A1/A2).
    #[must_use]
    pub fn is_beginner(self) -> bool {
        matches!(self, Self::A1 | Self::A2)
    }

    /// Whether this band expects complex structures to be present (B2/C1).
    #[must_use]
    pub fn is_advanced(self) -> bool {
        matches!(self, Self::B2 | Self::C1)
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
