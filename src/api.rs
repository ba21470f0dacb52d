/*!
 * Request/response surface consumed by external callers.
 *
 * A thin HTTP layer (not part of this crate) maps routes onto
 * `ApiService`: one endpoint for glossary matching, one for full
 * translation. The DTO shapes here are the wire contract; errors are
 * reported in-band via `success`/`error` rather than transport codes.
 */

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::generator::Generator;
use crate::glossary::GlossaryStore;
use crate::language_utils::resolve_direction;
use crate::matcher::{TermMatch, TermMatcher};
use crate::pipeline::{PipelineConfig, TranslationPipeline};
use crate::validation::QualityReport;

/// Request for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Text to scan for glossary terms
    pub text: String,
    /// Source language identifier (aliases and `auto` accepted)
    pub source_lang: String,
    /// Target language identifier (aliases and `auto` accepted)
    pub target_lang: String,
}

/// One matched term on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedTermDto {
    /// The matched source-text slice
    pub source: String,
    /// The substitution target (priority alias)
    pub target: String,
    /// Byte offset of the match in the source text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&TermMatch> for MatchedTermDto {
    fn from(m: &TermMatch) -> Self {
        Self {
            source: m.source_text.clone(),
            target: m.target_term.clone(),
            position: Some(m.start()),
        }
    }
}

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    /// Whether the request was served
    pub success: bool,
    /// Matches in source-text order
    pub matched_terms: Vec<MatchedTermDto>,
    /// Error description when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchResponse {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            matched_terms: Vec::new(),
            error: Some(error),
        }
    }
}

/// Request for the translate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language identifier (aliases and `auto` accepted)
    pub source_lang: String,
    /// Target language identifier (aliases and `auto` accepted)
    pub target_lang: String,
    /// Whether to protect glossary terms
    #[serde(default = "default_use_termbase")]
    pub use_termbase: bool,
}

fn default_use_termbase() -> bool {
    true
}

/// Translation payload on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationDto {
    /// The original text
    pub source_text: String,
    /// The translated text (best attempt when success is false)
    pub translated_text: String,
}

/// Quality summary on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityCheckDto {
    pub issues_found: usize,
    pub issues_fixed: usize,
    pub remaining_issues: Vec<String>,
}

impl From<&QualityReport> for QualityCheckDto {
    fn from(report: &QualityReport) -> Self {
        Self {
            issues_found: report.issues_found,
            issues_fixed: report.issues_fixed,
            remaining_issues: report.remaining_issues.clone(),
        }
    }
}

/// Response for the translate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    /// Whether the translation was accepted
    pub success: bool,
    /// The translation payload (present even for failed validation, so
    /// callers can inspect the best attempt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationDto>,
    /// Matches that were protected during translation
    pub matched_terms: Vec<MatchedTermDto>,
    /// Quality summary for the final attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_check: Option<QualityCheckDto>,
    /// Error description when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslateResponse {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            translation: None,
            matched_terms: Vec::new(),
            quality_check: None,
            error: Some(error),
        }
    }
}

/// Service implementing the two endpoints over a store and a generator
pub struct ApiService {
    store: Arc<GlossaryStore>,
    generator: Arc<dyn Generator>,
    pipeline: TranslationPipeline,
}

impl ApiService {
    /// Create a service with the default pipeline configuration
    pub fn new(store: Arc<GlossaryStore>, generator: Arc<dyn Generator>) -> Self {
        Self::with_config(store, generator, PipelineConfig::default())
    }

    /// Create a service with a custom pipeline configuration
    pub fn with_config(
        store: Arc<GlossaryStore>,
        generator: Arc<dyn Generator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            generator,
            pipeline: TranslationPipeline::new(config),
        }
    }

    /// Serve a match request
    pub fn match_terms(&self, request: &MatchRequest) -> MatchResponse {
        let direction = match resolve_direction(
            &request.source_lang,
            &request.target_lang,
            &request.text,
        ) {
            Ok(direction) => direction,
            Err(e) => return MatchResponse::failure(e.to_string()),
        };

        // A direction the glossary does not serve simply yields no matches
        let matched_terms = match self.store.glossary_for(direction) {
            Some(glossary) => TermMatcher::find_matches(&request.text, &glossary)
                .iter()
                .map(MatchedTermDto::from)
                .collect(),
            None => Vec::new(),
        };

        debug!(
            "Match request {}: {} term(s)",
            direction,
            matched_terms.len()
        );

        MatchResponse {
            success: true,
            matched_terms,
            error: None,
        }
    }

    /// Serve a translate request
    pub async fn translate(&self, request: &TranslateRequest) -> TranslateResponse {
        let direction = match resolve_direction(
            &request.source_lang,
            &request.target_lang,
            &request.text,
        ) {
            Ok(direction) => direction,
            Err(e) => return TranslateResponse::failure(e.to_string()),
        };

        let glossary = if request.use_termbase {
            self.store.glossary_for(direction)
        } else {
            None
        };

        let result = self
            .pipeline
            .translate(
                self.generator.as_ref(),
                glossary.as_deref(),
                &request.text,
                direction,
            )
            .await;

        TranslateResponse {
            success: result.success,
            translation: Some(TranslationDto {
                source_text: result.source_text.clone(),
                translated_text: result.translated_text.clone(),
            }),
            matched_terms: result.matched_terms.iter().map(MatchedTermDto::from).collect(),
            quality_check: Some(QualityCheckDto::from(&result.quality_report)),
            error: result.error,
        }
    }
}
