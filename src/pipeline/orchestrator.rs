/*!
 * Pipeline orchestrator for terminology-constrained translation.
 *
 * Drives the state machine
 *
 * ```text
 * MATCHING -> PROTECTING -> GENERATING -> RECOVERING -> VALIDATING
 *                                -> {ACCEPTED, RETRYING, FAILED}
 * ```
 *
 * Protection always runs, even with zero matches (the marked text is
 * then the source text). A generator error fails the request
 * immediately; retry policy for the generator itself belongs to the
 * adapter. A validation failure triggers one bounded retry with the
 * stricter prompt, after which the last result is returned marked as
 * failed, never silently degraded.
 */

use log::{debug, warn};

use crate::generator::{GenerationPrompt, Generator};
use crate::glossary::Glossary;
use crate::language_utils::Direction;
use crate::matcher::{TermMatch, TermMatcher};
use crate::placeholder::{PlaceholderCodec, PlaceholderRecoverer};
use crate::validation::{QualityReport, QualityValidator, ValidationConfig};

/// States of the translation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Scanning the source text for glossary terms
    Matching,
    /// Substituting matches with placeholder tokens
    Protecting,
    /// Waiting on the generation boundary
    Generating,
    /// Restoring placeholders from raw output
    Recovering,
    /// Scoring the recovered translation
    Validating,
    /// Terminal: translation accepted
    Accepted,
    /// Re-entering generation with the strict prompt
    Retrying,
    /// Terminal: translation failed
    Failed,
}

impl PipelineState {
    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Matching => "matching",
            PipelineState::Protecting => "protecting",
            PipelineState::Generating => "generating",
            PipelineState::Recovering => "recovering",
            PipelineState::Validating => "validating",
            PipelineState::Accepted => "accepted",
            PipelineState::Retrying => "retrying",
            PipelineState::Failed => "failed",
        }
    }
}

/// Configuration for the translation pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retries after a failed validation (attempts = max_retries + 1)
    pub max_retries: u32,
    /// Whether to match and protect glossary terms at all
    pub use_termbase: bool,
    /// Configuration for the validation stage
    pub validation: ValidationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            use_termbase: true,
            validation: ValidationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry bound
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enable or disable term protection
    pub fn with_termbase(mut self, use_termbase: bool) -> Self {
        self.use_termbase = use_termbase;
        self
    }

    /// Set custom validation configuration
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }
}

/// Result of a pipeline run, immutable once returned
#[derive(Debug, Clone)]
pub struct TranslationResult {
    /// The original source text
    pub source_text: String,
    /// The final translated text (best attempt when failed)
    pub translated_text: String,
    /// Glossary matches found in the source
    pub matched_terms: Vec<TermMatch>,
    /// Quality report for the final attempt
    pub quality_report: QualityReport,
    /// Number of generation attempts made
    pub attempts: u32,
    /// Whether the pipeline accepted the translation
    pub success: bool,
    /// Error description when the pipeline failed
    pub error: Option<String>,
}

impl TranslationResult {
    /// Create an accepted result
    fn accepted(
        source_text: &str,
        translated_text: String,
        matched_terms: Vec<TermMatch>,
        quality_report: QualityReport,
        attempts: u32,
    ) -> Self {
        Self {
            source_text: source_text.to_string(),
            translated_text,
            matched_terms,
            quality_report,
            attempts,
            success: true,
            error: None,
        }
    }

    /// Create a failed result that still carries the best attempt
    fn failed(
        source_text: &str,
        translated_text: String,
        matched_terms: Vec<TermMatch>,
        quality_report: QualityReport,
        attempts: u32,
        error: String,
    ) -> Self {
        Self {
            source_text: source_text.to_string(),
            translated_text,
            matched_terms,
            quality_report,
            attempts,
            success: false,
            error: Some(error),
        }
    }
}

/// The translation pipeline orchestrator
pub struct TranslationPipeline {
    config: PipelineConfig,
    recoverer: PlaceholderRecoverer,
    validator: QualityValidator,
}

impl TranslationPipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        let validator = QualityValidator::with_config(config.validation.clone());
        Self {
            config,
            recoverer: PlaceholderRecoverer::new(),
            validator,
        }
    }

    /// The pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Translate a text through the full pipeline
    ///
    /// The glossary must already serve the requested direction (callers
    /// obtain it from `GlossaryStore::glossary_for`).
    pub async fn translate(
        &self,
        generator: &dyn Generator,
        glossary: Option<&Glossary>,
        text: &str,
        direction: Direction,
    ) -> TranslationResult {
        let mut state = PipelineState::Matching;
        debug!("Pipeline {}: {}", direction, state.name());

        let matches = match glossary {
            Some(glossary) if self.config.use_termbase => {
                TermMatcher::find_matches(text, glossary)
            }
            _ => Vec::new(),
        };

        // Always protect, even with zero matches: the marked text is then
        // just the source text
        state = PipelineState::Protecting;
        debug!("Pipeline {}: {} ({} matches)", direction, state.name(), matches.len());
        let protected = PlaceholderCodec::protect(text, &matches);

        let mut attempts = 0u32;

        loop {
            attempts += 1;

            state = PipelineState::Generating;
            debug!("Pipeline {}: {} (attempt {})", direction, state.name(), attempts);

            let mut prompt = GenerationPrompt::new(&protected.marked_text, direction);
            if attempts > 1 {
                prompt = prompt.strict();
            }

            let raw_output = match generator.generate(&prompt).await {
                Ok(raw) => raw,
                Err(e) => {
                    state = PipelineState::Failed;
                    warn!("Pipeline {}: {} ({})", direction, state.name(), e);
                    return TranslationResult::failed(
                        text,
                        String::new(),
                        matches,
                        QualityReport::default(),
                        attempts,
                        format!("generation failed: {}", e),
                    );
                }
            };

            state = PipelineState::Recovering;
            debug!("Pipeline {}: {}", direction, state.name());
            let recovery = self.recoverer.recover(&raw_output, &protected.map);

            state = PipelineState::Validating;
            debug!("Pipeline {}: {}", direction, state.name());
            let outcome = self
                .validator
                .validate(text, &recovery.text, direction, Some(&recovery));

            if outcome.report.passed() {
                state = PipelineState::Accepted;
                debug!("Pipeline {}: {} after {} attempt(s)", direction, state.name(), attempts);
                return TranslationResult::accepted(
                    text,
                    outcome.text,
                    matches,
                    outcome.report,
                    attempts,
                );
            }

            if attempts > self.config.max_retries {
                state = PipelineState::Failed;
                warn!(
                    "Pipeline {}: {} after {} attempt(s), {} issue(s) remain",
                    direction,
                    state.name(),
                    attempts,
                    outcome.report.remaining_issues.len()
                );
                let error = format!(
                    "validation failed after {} attempt(s): {}",
                    attempts,
                    outcome.report.remaining_issues.join("; ")
                );
                return TranslationResult::failed(
                    text,
                    outcome.text,
                    matches,
                    outcome.report,
                    attempts,
                    error,
                );
            }

            state = PipelineState::Retrying;
            warn!(
                "Pipeline {}: {} (attempt {} failed validation: {:?})",
                direction,
                state.name(),
                attempts,
                outcome.report.remaining_issues
            );
        }
    }
}

impl Default for TranslationPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
