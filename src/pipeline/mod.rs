/*!
 * Translation pipeline orchestration.
 *
 * The orchestrator sequences matching, protection, generation, recovery
 * and validation, owns the result object, and applies the bounded retry
 * policy when validation fails.
 */

pub mod orchestrator;

// Re-export main types
pub use orchestrator::{PipelineConfig, PipelineState, TranslationPipeline, TranslationResult};
