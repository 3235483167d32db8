//! Dialogue line types and gap marking.

use serde::{Deserialize, Serialize};

/// In-text placeholder marking a gap in fill-gap dialogue lines.
pub const GAP_TOKEN: &str = "_____";

/// One line of generated dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Speaker role (e.g. "Student", "Teacher").
    pub character: String,
    /// Spoken text. Fill-gap lines mask part of it with [`GAP_TOKEN`].
    pub line: String,
    /// Explicit gap marker for the fill-gap exercise variant.
    #[serde(rename = "isGap", skip_serializing_if = "Option::is_none")]
    pub is_gap: Option<bool>,
}

impl DialogueLine {
    /// Create a plain line with no gap marking.
    #[must_use]
    pub fn new(character: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            line: line.into(),
            is_gap: None,
        }
    }

    /// Whether this line is intended as a fill-in-the-blank exercise.
    ///
    /// A line counts as gap-marked when the `isGap` flag is set, or when the
    /// text itself carries the [`GAP_TOKEN`] placeholder.
    #[must_use]
    pub fn is_gap_marked(&self) -> bool {
        self.is_gap == Some(true) || self.line.contains(GAP_TOKEN)
    }
}

/// Join dialogue lines into one text block for lexical analysis.
#[must_use]
pub fn dialogue_text(lines: &[DialogueLine]) -> String {
    lines
        .iter()
        .map(|l| l.line.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
