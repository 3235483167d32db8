//! Phase weights and the weighted progress tracker.
//!
//! Each lesson phase carries a relative weight; a request's completion
//! percentage is the consumed fraction of the active phases' total weight.
//! The default table is an explicit value — never a mutable global — and
//! per-lesson-type overrides are a pure function of the lesson type.

use std::collections::HashMap;

use glossa_core::lesson::{LessonType, Phase};
use glossa_core::progress::ProgressUpdate;
use tracing::warn;

use crate::errors::EngineError;

/// Relative weight per phase. Weights are positive; the active total for a
/// request is the sum over the phases its lesson type includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseWeights {
    weights: HashMap<Phase, u32>,
}

impl PhaseWeights {
    /// The process-wide default table.
    #[must_use]
    pub fn standard() -> Self {
        let mut weights = HashMap::new();
        weights.insert(Phase::Warmup, 10);
        weights.insert(Phase::Vocabulary, 15);
        weights.insert(Phase::Reading, 20);
        weights.insert(Phase::Comprehension, 15);
        weights.insert(Phase::Discussion, 15);
        weights.insert(Phase::Dialogue, 20);
        weights.insert(Phase::Grammar, 15);
        weights.insert(Phase::Pronunciation, 10);
        weights.insert(Phase::Wrapup, 5);
        Self { weights }
    }

    /// The table for a lesson type: the standard table with that type's
    /// emphasis applied. Pure — no shared default is ever mutated.
    #[must_use]
    pub fn for_lesson_type(lesson_type: LessonType) -> Self {
        let standard = Self::standard();
        match lesson_type {
            LessonType::Grammar => standard
                .with_weight(Phase::Grammar, 25)
                .with_weight(Phase::Reading, 10),
            LessonType::Vocabulary => standard.with_weight(Phase::Vocabulary, 25),
            LessonType::Conversation => standard.with_weight(Phase::Dialogue, 25),
            LessonType::Discussion | LessonType::Reading => standard,
        }
    }

    /// Replace one phase's weight.
    #[must_use]
    pub fn with_weight(mut self, phase: Phase, weight: u32) -> Self {
        self.weights.insert(phase, weight);
        self
    }

    /// Weight for a phase, if configured.
    #[must_use]
    pub fn get(&self, phase: Phase) -> Option<u32> {
        self.weights.get(&phase).copied()
    }
}

/// Ordered phase subset each lesson type includes.
#[must_use]
pub fn active_phases(lesson_type: LessonType) -> &'static [Phase] {
    match lesson_type {
        LessonType::Conversation => &[
            Phase::Warmup,
            Phase::Vocabulary,
            Phase::Dialogue,
            Phase::Pronunciation,
            Phase::Wrapup,
        ],
        LessonType::Discussion => &[
            Phase::Warmup,
            Phase::Vocabulary,
            Phase::Reading,
            Phase::Comprehension,
            Phase::Discussion,
            Phase::Wrapup,
        ],
        LessonType::Reading => &[
            Phase::Warmup,
            Phase::Vocabulary,
            Phase::Reading,
            Phase::Comprehension,
            Phase::Wrapup,
        ],
        LessonType::Grammar => &[
            Phase::Warmup,
            Phase::Vocabulary,
            Phase::Grammar,
            Phase::Dialogue,
            Phase::Wrapup,
        ],
        LessonType::Vocabulary => &[
            Phase::Warmup,
            Phase::Vocabulary,
            Phase::Reading,
            Phase::Dialogue,
            Phase::Wrapup,
        ],
    }
}

/// Per-request progress accounting over the active phases.
///
/// `on_phase_start` reports the weight consumed so far; `on_phase_complete`
/// consumes the phase's weight and reports the new percentage. Both floor
/// the percentage, and the final completion is clamped to exactly 100.
/// Progress is monotone non-decreasing by construction. State is owned by
/// the orchestrator's sequential control flow — nothing here is shared
/// across requests.
#[derive(Debug)]
pub struct ProgressTracker {
    weights: HashMap<Phase, u32>,
    total_weight: u32,
    consumed_weight: u32,
    phase_count: usize,
    completed_count: usize,
}

impl ProgressTracker {
    /// Build a tracker for the active phases of one request.
    ///
    /// Errors when `phases` is empty or any active phase has a missing or
    /// zero weight — both indicate a configuration defect, not a runtime
    /// condition.
    pub fn new(phases: &[Phase], table: &PhaseWeights) -> Result<Self, EngineError> {
        if phases.is_empty() {
            return Err(EngineError::Config(
                "lesson type has zero active phases".into(),
            ));
        }

        let mut weights = HashMap::with_capacity(phases.len());
        let mut total_weight = 0u32;
        for &phase in phases {
            let weight = table.get(phase).unwrap_or(0);
            if weight == 0 {
                return Err(EngineError::Config(format!(
                    "phase {phase} has no positive weight configured"
                )));
            }
            weights.insert(phase, weight);
            total_weight += weight;
        }

        Ok(Self {
            weights,
            total_weight,
            consumed_weight: 0,
            phase_count: phases.len(),
            completed_count: 0,
        })
    }

    /// Percentage of active weight consumed so far, floored.
    fn percentage(&self) -> u8 {
        (self.consumed_weight * 100 / self.total_weight) as u8
    }

    /// Record that a phase is starting; emits the pre-phase percentage.
    pub fn on_phase_start(&self, phase: Phase) -> ProgressUpdate {
        ProgressUpdate {
            step: format!("Generating {} section", phase.as_str()),
            progress: self.percentage(),
            phase,
            section: Some(phase.as_str().to_owned()),
        }
    }

    /// Record that a phase completed; consumes its weight and emits the
    /// updated percentage. The last phase always reports exactly 100.
    pub fn on_phase_complete(&mut self, phase: Phase) -> ProgressUpdate {
        match self.weights.get(&phase) {
            Some(weight) => self.consumed_weight += weight,
            None => warn!(%phase, "completion reported for inactive phase"),
        }
        self.completed_count += 1;

        let progress = if self.completed_count >= self.phase_count {
            100
        } else {
            self.percentage().min(100)
        };

        ProgressUpdate {
            step: format!("Completed {} section", phase.as_str()),
            progress,
            phase,
            section: Some(phase.as_str().to_owned()),
        }
    }
}
