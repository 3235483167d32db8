//! Post-generation complexity validation.
//!
//! Four independent checks run against the generated dialogue and the
//! target CEFR band, each an explicit named rule so the set is extensible
//! and independently testable. Findings are advisory quality signal: the
//! validator never mutates or rejects content — enforcement is caller
//! policy.

pub mod rules;

use glossa_core::dialogue::DialogueLine;
use glossa_core::level::CefrLevel;
use glossa_core::ValidationResult;
use tracing::debug;

use crate::errors::EngineError;
use self::rules::{
    GrammarComplexityRule, StructureRule, VocabularyComplexityRule, VocabularyIntegrationRule,
};

/// Everything a rule needs to evaluate one dialogue.
pub struct DialogueInput<'a> {
    pub lines: &'a [DialogueLine],
    pub level: CefrLevel,
    pub key_vocabulary: &'a [String],
    /// Whether the dialogue is the fill-gap exercise variant.
    pub fill_gap: bool,
}

/// Findings accumulated across rules.
#[derive(Debug, Default)]
pub struct Findings {
    issues: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    /// Record a fatal finding.
    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }

    /// Record an advisory finding.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// One named complexity check.
pub trait ComplexityRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, input: &DialogueInput<'_>, findings: &mut Findings);
}

/// Aggregates the rule set into one [`ValidationResult`].
pub struct ComplexityValidator {
    rules: Vec<Box<dyn ComplexityRule>>,
}

impl ComplexityValidator {
    /// Validator with the standard four rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(VocabularyIntegrationRule),
                Box::new(VocabularyComplexityRule),
                Box::new(GrammarComplexityRule),
                Box::new(StructureRule),
            ],
        }
    }

    /// Run every rule against the dialogue.
    ///
    /// An empty `key_vocabulary` is a configuration defect, not a dialogue
    /// finding, and fails fast.
    pub fn validate(&self, input: &DialogueInput<'_>) -> Result<ValidationResult, EngineError> {
        if input.key_vocabulary.is_empty() {
            return Err(EngineError::Config(
                "complexity validation requires a non-empty key vocabulary".into(),
            ));
        }

        let mut findings = Findings::default();
        for rule in &self.rules {
            rule.evaluate(input, &mut findings);
            debug!(rule = rule.name(), "rule evaluated");
        }

        Ok(ValidationResult::from_findings(
            findings.issues,
            findings.warnings,
        ))
    }
}

impl Default for ComplexityValidator {
    fn default() -> Self {
        Self::new()
    }
}
