/*!
 * Text-generation boundary.
 *
 * The generation engine is an external collaborator: it accepts a prompt
 * and returns raw text, and its treatment of embedded placeholder tokens
 * is non-deterministic and lossy. This module defines only the boundary:
 *
 * - `Generator`: the trait adapters implement
 * - `prompts`: prompt rendering, including the stricter retry variant
 * - `mock`: mock generators simulating the known corruption modes
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::GenerationError;
use crate::language_utils::Direction;

pub mod mock;
pub mod prompts;

// Re-export main types
pub use mock::{MockBehavior, MockGenerator};
pub use prompts::PromptTemplate;

/// A rendered generation request
#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    /// The marked-up text to translate
    pub text: String,
    /// Translation direction
    pub direction: Direction,
    /// Whether to render the stricter instruction variant (used on retry)
    pub strict: bool,
}

impl GenerationPrompt {
    /// Build a prompt for a marked text
    pub fn new(text: &str, direction: Direction) -> Self {
        Self {
            text: text.to_string(),
            direction,
            strict: false,
        }
    }

    /// Switch to the stricter instruction variant
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Common trait for text generators
///
/// Implementations must assume their output is post-processed by the
/// recovery stage: placeholder tokens in the prompt may be dropped,
/// split, transliterated or annotated in the output, and that is treated
/// as the normal operating envelope, not an error. Only transport-level
/// failures (request failure, timeout, unusable response) are errors.
#[async_trait]
pub trait Generator: Send + Sync + Debug {
    /// Generate raw output text for a prompt
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError>;
}
