//! Lesson orchestration.
//!
//! Sequences shared-context construction, the section generators in phase
//! order, and the complexity validator, emitting progress through the safe
//! observer between phases. Phases execute sequentially by design:
//! downstream phases may read an earlier phase's output, and progress must
//! stay strictly ordered. All state is request-scoped — concurrent requests
//! share nothing mutable.

use std::sync::Arc;

use chrono::Utc;
use glossa_core::lesson::{LessonContent, LessonMetadata, LessonSection, LessonType, Phase};
use glossa_core::level::CefrLevel;
use glossa_core::SharedContext;
use glossa_llm::CompletionProvider;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::context::build_shared_context;
use crate::errors::EngineError;
use crate::generate::generate_section;
use crate::observer::{ProgressObserver, SafeObserver};
use crate::progress::{active_phases, PhaseWeights, ProgressTracker};
use crate::validate::{ComplexityValidator, DialogueInput};

/// One lesson generation request.
#[derive(Debug, Clone)]
pub struct LessonRequest {
    /// Raw source content the lesson is built from.
    pub content: String,
    pub lesson_type: LessonType,
    pub student_level: CefrLevel,
    pub target_language: String,
}

/// Drives one generation request end to end.
pub struct LessonOrchestrator {
    provider: Arc<dyn CompletionProvider>,
    /// Explicit weight override; when absent, each request uses the pure
    /// per-lesson-type table.
    weights: Option<PhaseWeights>,
    validator: ComplexityValidator,
}

impl LessonOrchestrator {
    /// Orchestrator using the per-lesson-type weight tables.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            weights: None,
            validator: ComplexityValidator::new(),
        }
    }

    /// Orchestrator with an explicit weight table applied to every request.
    pub fn with_weights(provider: Arc<dyn CompletionProvider>, weights: PhaseWeights) -> Self {
        Self {
            provider,
            weights: Some(weights),
            validator: ComplexityValidator::new(),
        }
    }

    /// Generate a complete lesson from one piece of source content.
    ///
    /// `observer`, when supplied, receives an ordered stream of progress
    /// updates through the panic-isolating wrapper before this call
    /// resolves. Any phase failure aborts the request with a typed error —
    /// no partial lesson is returned. Validator findings are advisory and
    /// logged; they never block the assembled lesson.
    #[instrument(
        skip_all,
        fields(
            request_id = %Uuid::now_v7(),
            lesson_type = %request.lesson_type,
            level = %request.student_level,
        )
    )]
    pub async fn generate_lesson(
        &self,
        request: &LessonRequest,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<LessonContent, EngineError> {
        if request.content.trim().is_empty() {
            return Err(EngineError::EmptyContent);
        }

        let observer = SafeObserver::new(observer);

        // Built exactly once; every generator reads this value.
        let ctx = build_shared_context(
            &request.content,
            request.lesson_type,
            request.student_level,
            &request.target_language,
        );

        let phases = active_phases(request.lesson_type);
        let weights = match &self.weights {
            Some(weights) => weights.clone(),
            None => PhaseWeights::for_lesson_type(request.lesson_type),
        };
        let mut tracker = ProgressTracker::new(phases, &weights)?;

        let mut sections = Vec::with_capacity(phases.len());
        for &phase in phases {
            observer.notify(&tracker.on_phase_start(phase));

            let section =
                generate_section(self.provider.as_ref(), &ctx, phase, request.lesson_type, &sections)
                    .await?;
            info!(%phase, "section generated");
            sections.push(section);

            observer.notify(&tracker.on_phase_complete(phase));
        }

        self.validate_dialogue(request, &ctx, &sections)?;

        Ok(LessonContent {
            title: lesson_title(request.lesson_type, &ctx),
            sections,
            metadata: LessonMetadata {
                cefr_level: request.student_level,
                lesson_type: request.lesson_type,
                target_language: request.target_language.clone(),
                model: self.provider.model().to_owned(),
                generated_at: Utc::now().to_rfc3339(),
            },
        })
    }

    /// Run the advisory complexity validation over the dialogue section.
    ///
    /// Findings are logged, never enforced. Passing an empty key vocabulary
    /// into the validator is a config defect, so when extraction produced
    /// nothing the check is skipped outright rather than misreported.
    fn validate_dialogue(
        &self,
        request: &LessonRequest,
        ctx: &SharedContext,
        sections: &[LessonSection],
    ) -> Result<(), EngineError> {
        let Some(lines) = sections
            .iter()
            .find(|s| s.phase == Phase::Dialogue)
            .and_then(|s| s.body.as_dialogue())
        else {
            return Ok(());
        };

        if ctx.key_vocabulary.is_empty() {
            warn!("skipping complexity validation: no key vocabulary extracted");
            return Ok(());
        }

        let input = DialogueInput {
            lines,
            level: request.student_level,
            key_vocabulary: &ctx.key_vocabulary,
            fill_gap: request.lesson_type == LessonType::Grammar,
        };
        let result = self.validator.validate(&input)?;

        for issue in &result.issues {
            warn!(issue = issue.as_str(), "dialogue validation issue");
        }
        for warning in &result.warnings {
            info!(warning = warning.as_str(), "dialogue validation warning");
        }
        if !result.has_findings() {
            info!("dialogue passed complexity validation");
        }

        Ok(())
    }
}

fn lesson_title(lesson_type: LessonType, ctx: &SharedContext) -> String {
    match ctx.main_themes.first() {
        Some(theme) => format!("{} Lesson: {theme}", lesson_type.label()),
        None => format!("{} Lesson", lesson_type.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::progress::ProgressUpdate;
    use glossa_llm::{MockCompletion, MockProvider};
    use parking_lot::Mutex;

    const CONTENT: &str = "Global trade shapes every economy. Trade agreements \
        lower tariffs between countries. When a tariff rises, the economy often \
        slows and trade volumes fall.";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn request(lesson_type: LessonType, level: CefrLevel) -> LessonRequest {
        LessonRequest {
            content: CONTENT.into(),
            lesson_type,
            student_level: level,
            target_language: "English".into(),
        }
    }

    /// A valid alternating dialogue completion, optionally gap-marked.
    fn dialogue_json(line_count: usize, gap_count: usize) -> String {
        let lines: Vec<serde_json::Value> = (0..line_count)
            .map(|i| {
                let character = if i % 2 == 0 { "Student" } else { "Teacher" };
                if i < gap_count {
                    serde_json::json!({
                        "character": character,
                        "line": format!("Line {i} about the _____ of trade."),
                        "isGap": true,
                    })
                } else {
                    serde_json::json!({
                        "character": character,
                        "line": format!("Line {i} about the economy and trade."),
                    })
                }
            })
            .collect();
        serde_json::to_string(&lines).unwrap()
    }

    fn text_script(n: usize) -> Vec<MockCompletion> {
        (0..n)
            .map(|i| MockCompletion::text(format!("Section text {i} about trade.")))
            .collect()
    }

    struct Recording {
        updates: Mutex<Vec<ProgressUpdate>>,
    }

    impl Recording {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                updates: Mutex::new(Vec::new()),
            })
        }
    }

    impl ProgressObserver for Recording {
        fn on_progress(&self, update: &ProgressUpdate) {
            self.updates.lock().push(update.clone());
        }
    }

    #[tokio::test]
    async fn reading_lesson_assembles_all_sections() {
        init_tracing();
        // Reading lessons run 5 text phases.
        let mock = Arc::new(MockProvider::new(text_script(5)));
        let orchestrator = LessonOrchestrator::new(mock.clone());

        let lesson = orchestrator
            .generate_lesson(&request(LessonType::Reading, CefrLevel::B1), None)
            .await
            .unwrap();

        assert_eq!(lesson.sections.len(), 5);
        let phases: Vec<Phase> = lesson.sections.iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Warmup,
                Phase::Vocabulary,
                Phase::Reading,
                Phase::Comprehension,
                Phase::Wrapup
            ]
        );
        assert_eq!(mock.call_count(), 5);
    }

    #[tokio::test]
    async fn metadata_records_request_parameters() {
        let mock = Arc::new(MockProvider::new(text_script(5)));
        let orchestrator = LessonOrchestrator::new(mock);

        let lesson = orchestrator
            .generate_lesson(&request(LessonType::Reading, CefrLevel::A2), None)
            .await
            .unwrap();

        assert_eq!(lesson.metadata.cefr_level, CefrLevel::A2);
        assert_eq!(lesson.metadata.lesson_type, LessonType::Reading);
        assert_eq!(lesson.metadata.target_language, "English");
        assert_eq!(lesson.metadata.model, "mock-model");
        assert!(lesson.title.starts_with("Reading Lesson:"));
    }

    #[tokio::test]
    async fn conversation_lesson_includes_practice_dialogue() {
        // warmup, vocabulary, dialogue, pronunciation, wrapup
        let mock = Arc::new(MockProvider::new(vec![
            MockCompletion::text("warmup"),
            MockCompletion::text("vocabulary"),
            MockCompletion::text(dialogue_json(12, 0)),
            MockCompletion::text("pronunciation"),
            MockCompletion::text("wrapup"),
        ]));
        let orchestrator = LessonOrchestrator::new(mock);

        let lesson = orchestrator
            .generate_lesson(&request(LessonType::Conversation, CefrLevel::B1), None)
            .await
            .unwrap();

        let dialogue = lesson.section(Phase::Dialogue).unwrap();
        let lines = dialogue.body.as_dialogue().unwrap();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0].character, "Student");
    }

    #[tokio::test]
    async fn grammar_lesson_uses_fill_gap_dialogue() {
        // warmup, vocabulary, grammar, dialogue, wrapup
        let mock = Arc::new(MockProvider::new(vec![
            MockCompletion::text("warmup"),
            MockCompletion::text("vocabulary"),
            MockCompletion::text("grammar point"),
            MockCompletion::text(dialogue_json(12, 4)),
            MockCompletion::text("wrapup"),
        ]));
        let orchestrator = LessonOrchestrator::new(mock.clone());

        let lesson = orchestrator
            .generate_lesson(&request(LessonType::Grammar, CefrLevel::B1), None)
            .await
            .unwrap();

        let lines = lesson
            .section(Phase::Dialogue)
            .unwrap()
            .body
            .as_dialogue()
            .unwrap();
        let gaps = lines.iter().filter(|l| l.is_gap_marked()).count();
        assert!(gaps >= 3);

        // The dialogue prompt asked for the fill-gap variant.
        assert!(mock.prompts()[3].contains("fill-in-the-blank"));
    }

    #[tokio::test]
    async fn progress_is_monotone_and_ends_at_100() {
        let mock = Arc::new(MockProvider::new(text_script(6)));
        let orchestrator = LessonOrchestrator::new(mock);
        let recording = Recording::new();

        let _ = orchestrator
            .generate_lesson(
                &request(LessonType::Discussion, CefrLevel::B1),
                Some(recording.clone()),
            )
            .await
            .unwrap();

        let updates = recording.updates.lock();
        // Discussion runs 6 phases; each emits a start and a complete.
        assert_eq!(updates.len(), 12);
        assert_eq!(updates[0].progress, 0);
        assert_eq!(updates.last().unwrap().progress, 100);
        for pair in updates.windows(2) {
            assert!(pair[1].progress >= pair[0].progress);
        }
    }

    #[tokio::test]
    async fn panicking_observer_does_not_abort_generation() {
        struct Panics;
        impl ProgressObserver for Panics {
            fn on_progress(&self, _: &ProgressUpdate) {
                panic!("observer blew up");
            }
        }

        let mock = Arc::new(MockProvider::new(text_script(5)));
        let orchestrator = LessonOrchestrator::new(mock);

        let lesson = orchestrator
            .generate_lesson(
                &request(LessonType::Reading, CefrLevel::B1),
                Some(Arc::new(Panics)),
            )
            .await
            .unwrap();

        assert_eq!(lesson.sections.len(), 5);
    }

    #[tokio::test]
    async fn phase_failure_aborts_with_no_partial_lesson() {
        let mock = Arc::new(MockProvider::new(vec![
            MockCompletion::text("warmup"),
            MockCompletion::Error(glossa_core::GatewayError::ProviderOverloaded),
        ]));
        let orchestrator = LessonOrchestrator::new(mock);

        let err = orchestrator
            .generate_lesson(&request(LessonType::Reading, CefrLevel::B1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Gateway(_)));
    }

    #[tokio::test]
    async fn malformed_dialogue_aborts() {
        let mock = Arc::new(MockProvider::new(vec![
            MockCompletion::text("warmup"),
            MockCompletion::text("vocabulary"),
            MockCompletion::text("this is not a dialogue"),
        ]));
        let orchestrator = LessonOrchestrator::new(mock);

        let err = orchestrator
            .generate_lesson(&request(LessonType::Conversation, CefrLevel::B1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::MalformedSection { .. }));
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let mock = Arc::new(MockProvider::new(vec![]));
        let orchestrator = LessonOrchestrator::new(mock);

        let mut req = request(LessonType::Reading, CefrLevel::B1);
        req.content = "   ".into();
        let err = orchestrator.generate_lesson(&req, None).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyContent));
    }

    #[tokio::test]
    async fn validation_findings_do_not_block_the_lesson() {
        // Dialogue lines avoid the key vocabulary entirely: the integration
        // rule warns, but the lesson is still returned.
        let lines: Vec<serde_json::Value> = (0..12)
            .map(|i| {
                let character = if i % 2 == 0 { "Student" } else { "Teacher" };
                serde_json::json!({
                    "character": character,
                    "line": format!("Completely unrelated sentence number {i}."),
                })
            })
            .collect();
        let mock = Arc::new(MockProvider::new(vec![
            MockCompletion::text("warmup"),
            MockCompletion::text("vocabulary"),
            MockCompletion::text(serde_json::to_string(&lines).unwrap()),
            MockCompletion::text("pronunciation"),
            MockCompletion::text("wrapup"),
        ]));
        let orchestrator = LessonOrchestrator::new(mock);

        let lesson = orchestrator
            .generate_lesson(&request(LessonType::Conversation, CefrLevel::B1), None)
            .await
            .unwrap();
        assert_eq!(lesson.sections.len(), 5);
    }

    #[tokio::test]
    async fn explicit_weight_override_applies_to_requests() {
        let mock = Arc::new(MockProvider::new(text_script(5)));
        let weights = PhaseWeights::standard().with_weight(Phase::Warmup, 60);
        let orchestrator = LessonOrchestrator::with_weights(mock, weights);
        let recording = Recording::new();

        let _ = orchestrator
            .generate_lesson(
                &request(LessonType::Reading, CefrLevel::B1),
                Some(recording.clone()),
            )
            .await
            .unwrap();

        // warmup now dominates: 60 of 115 total → 52% after the first phase.
        let updates = recording.updates.lock();
        assert_eq!(updates[1].progress, 52);
    }

    #[tokio::test]
    async fn generators_receive_shared_context_in_prompts() {
        let mock = Arc::new(MockProvider::new(text_script(5)));
        let orchestrator = LessonOrchestrator::new(mock.clone());

        let _ = orchestrator
            .generate_lesson(&request(LessonType::Reading, CefrLevel::B1), None)
            .await
            .unwrap();

        // Every prompt embeds the same key vocabulary from the one shared
        // context built for the request.
        for prompt in mock.prompts() {
            assert!(prompt.contains("trade"), "prompt missing vocabulary: {prompt}");
        }
    }
}
