/*!
 * # termbridge - Terminology-Constrained Translation Pipeline
 *
 * A Rust library for glossary-protected machine translation.
 *
 * ## Features
 *
 * - Bidirectional glossary matching (any alias detected, priority alias substituted)
 * - Placeholder protection of matched terms before generation
 * - Staged recovery of placeholders from corrupted generator output
 * - Quality validation with direction-aware length floors and bounded retry
 * - JSON glossary loading with legacy-shape tolerance and partial-load reporting
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `glossary`: Glossary value objects and the copy-on-write store
 * - `matcher`: Longest-first, overlap-free term matching
 * - `placeholder`: Placeholder codec, staged recovery and residue patterns
 * - `generator`: The text-generation boundary:
 *   - `generator::prompts`: Prompt templates (normal and strict retry)
 *   - `generator::mock`: Mock generators simulating corruption modes
 * - `validation`: Quality checks and the quality report
 * - `pipeline`: The orchestrating state machine
 * - `api`: Request/response DTOs for external callers
 * - `language_utils`: Language alias normalization and script detection
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod api;
pub mod app_config;
pub mod errors;
pub mod generator;
pub mod glossary;
pub mod language_utils;
pub mod matcher;
pub mod pipeline;
pub mod placeholder;
pub mod validation;

// Re-export main types for easier usage
pub use api::{ApiService, MatchRequest, MatchResponse, TranslateRequest, TranslateResponse};
pub use app_config::Config;
pub use errors::{AppError, GenerationError, GlossaryError, TranslationError};
pub use generator::{GenerationPrompt, Generator, MockGenerator};
pub use glossary::{Glossary, GlossaryStore, TermEntry};
pub use language_utils::{Direction, LangCode, normalize_language, resolve_direction};
pub use matcher::{TermMatch, TermMatcher};
pub use pipeline::{PipelineConfig, TranslationPipeline, TranslationResult};
pub use placeholder::{PlaceholderCodec, PlaceholderMap, PlaceholderRecoverer};
pub use validation::{QualityReport, QualityValidator};
