//! Lesson structure types.
//!
//! A lesson is an ordered sequence of sections, one per active [`Phase`].
//! Which phases are active, and how they are weighted for progress
//! reporting, depends on the [`LessonType`] — that mapping lives in
//! `glossa-engine`.

use serde::{Deserialize, Serialize};

use crate::dialogue::DialogueLine;
use crate::level::CefrLevel;

/// The kind of lesson being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    /// Dialogue-driven speaking practice.
    Conversation,
    /// Reading plus open discussion questions.
    Discussion,
    /// Reading passage with comprehension work.
    Reading,
    /// Grammar focus with a fill-gap dialogue.
    Grammar,
    /// Vocabulary building around the source content.
    Vocabulary,
}

impl LessonType {
    /// Wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Discussion => "discussion",
            Self::Reading => "reading",
            Self::Grammar => "grammar",
            Self::Vocabulary => "vocabulary",
        }
    }

    /// Human-readable label for lesson titles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Conversation => "Conversation",
            Self::Discussion => "Discussion",
            Self::Reading => "Reading",
            Self::Grammar => "Grammar",
            Self::Vocabulary => "Vocabulary",
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named section of a lesson, produced by one section generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opening questions to activate prior knowledge.
    Warmup,
    /// Key terms with definitions and examples.
    Vocabulary,
    /// Adapted reading passage.
    Reading,
    /// Questions about the reading passage.
    Comprehension,
    /// Open-ended discussion questions.
    Discussion,
    /// Practice or fill-gap dialogue.
    Dialogue,
    /// Grammar point with examples and exercises.
    Grammar,
    /// Pronunciation focus items.
    Pronunciation,
    /// Review and closing activity.
    Wrapup,
}

impl Phase {
    /// All phases in canonical lesson order.
    pub const ALL: [Self; 9] = [
        Self::Warmup,
        Self::Vocabulary,
        Self::Reading,
        Self::Comprehension,
        Self::Discussion,
        Self::Dialogue,
        Self::Grammar,
        Self::Pronunciation,
        Self::Wrapup,
    ];

    /// Wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Vocabulary => "vocabulary",
            Self::Reading => "reading",
            Self::Comprehension => "comprehension",
            Self::Discussion => "discussion",
            Self::Dialogue => "dialogue",
            Self::Grammar => "grammar",
            Self::Pronunciation => "pronunciation",
            Self::Wrapup => "wrapup",
        }
    }

    /// Section heading shown in the assembled lesson.
    #[must_use]
    pub fn section_title(self) -> &'static str {
        match self {
            Self::Warmup => "Warm-up",
            Self::Vocabulary => "Key Vocabulary",
            Self::Reading => "Reading",
            Self::Comprehension => "Comprehension Questions",
            Self::Discussion => "Discussion Questions",
            Self::Dialogue => "Dialogue Practice",
            Self::Grammar => "Grammar Focus",
            Self::Pronunciation => "Pronunciation",
            Self::Wrapup => "Wrap-up",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The body of a generated section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    /// Prose, question lists, exercises — anything non-dialogue.
    Text {
        /// Section text as returned by the generator.
        text: String,
    },
    /// An ordered dialogue.
    Dialogue {
        /// Dialogue lines in speaking order.
        lines: Vec<DialogueLine>,
    },
}

impl SectionBody {
    /// Borrow the dialogue lines, if this body is a dialogue.
    #[must_use]
    pub fn as_dialogue(&self) -> Option<&[DialogueLine]> {
        match self {
            Self::Dialogue { lines } => Some(lines),
            Self::Text { .. } => None,
        }
    }
}

/// One assembled lesson section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSection {
    /// Which phase produced this section.
    pub phase: Phase,
    /// Section heading.
    pub title: String,
    /// Section content.
    pub body: SectionBody,
}

/// Metadata recorded alongside the assembled lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonMetadata {
    /// Target proficiency band.
    pub cefr_level: CefrLevel,
    /// Lesson type that selected the active phases.
    pub lesson_type: LessonType,
    /// Language the lesson teaches.
    pub target_language: String,
    /// Model that produced the sections.
    pub model: String,
    /// ISO 8601 generation timestamp.
    pub generated_at: String,
}

/// The fully assembled lesson returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonContent {
    /// Derived lesson title.
    pub title: String,
    /// One section per active phase, in phase order.
    pub sections: Vec<LessonSection>,
    /// Generation metadata.
    pub metadata: LessonMetadata,
}

impl LessonContent {
    /// Find the section generated for `phase`, if the lesson includes it.
    #[must_use]
    pub fn section(&self, phase: Phase) -> Option<&LessonSection> {
        self.sections.iter().find(|s| s.phase == phase)
    }
}
