//! Complexity validation findings.

use serde::{Deserialize, Serialize};

/// Aggregated findings from a complexity validation pass.
///
/// Produced fresh per validation call and consumed by logging/QA only —
/// never persisted as part of the lesson. `issues` are fatal (they explain
/// why `is_valid` is false); `warnings` are advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no fatal issues were found.
    pub is_valid: bool,
    /// Fatal findings.
    pub issues: Vec<String>,
    /// Advisory findings.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no findings.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Build a result from collected findings.
    #[must_use]
    pub fn from_findings(issues: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
            warnings,
        }
    }

    /// Fold another result's findings into this one, recomputing validity.
    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
        self.warnings.extend(other.warnings);
        self.is_valid = self.issues.is_empty();
    }

    /// Whether any finding (fatal or advisory) was recorded.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.issues.is_empty() || !self.warnings.is_empty()
    }
}
