/*!
 * Mock generator implementations for testing.
 *
 * Each behavior simulates one of the corruption modes seen from real
 * generation engines:
 * - `MockGenerator::echo()` - returns the marked text unchanged
 * - `MockGenerator::corrupt_tokens()` - splits/rewrites placeholder tokens
 * - `MockGenerator::drop_tokens()` - removes placeholder tokens entirely
 * - `MockGenerator::append_explanation()` - appends unrequested prose
 * - `MockGenerator::truncated()` - returns an implausibly short output
 * - `MockGenerator::failing()` - always fails with an error
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::GenerationError;
use crate::generator::{GenerationPrompt, Generator};

/// Placeholder tokens as emitted by the codec
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[T(\d+)\]").expect("Invalid token regex"));

/// Behavior mode for the mock generator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return the prompt text unchanged
    Echo,
    /// Return the prompt text with every token rewritten into a known
    /// corruption shape (deterministic per index)
    CorruptTokens,
    /// Return the prompt text with all tokens removed
    DropTokens,
    /// Echo, then append explanatory prose the caller did not ask for
    AppendExplanation,
    /// Return an implausibly short output
    Truncated,
    /// Always fail with a request error
    Failing,
    /// Always return a fixed response
    Fixed(String),
}

/// Mock generator for exercising the recovery and validation layers
#[derive(Debug)]
pub struct MockGenerator {
    behavior: MockBehavior,
    /// Custom response generator (optional, overrides behavior when set)
    custom_response: Option<fn(&GenerationPrompt) -> String>,
}

impl MockGenerator {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            custom_response: None,
        }
    }

    /// Mock that returns the marked text unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Mock that corrupts every placeholder token
    pub fn corrupt_tokens() -> Self {
        Self::new(MockBehavior::CorruptTokens)
    }

    /// Mock that drops every placeholder token
    pub fn drop_tokens() -> Self {
        Self::new(MockBehavior::DropTokens)
    }

    /// Mock that appends explanatory prose
    pub fn append_explanation() -> Self {
        Self::new(MockBehavior::AppendExplanation)
    }

    /// Mock that returns an implausibly short output
    pub fn truncated() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    /// Mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that always returns the given text
    pub fn fixed(text: &str) -> Self {
        Self::new(MockBehavior::Fixed(text.to_string()))
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&GenerationPrompt) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Rewrite one token index into a corruption shape
    ///
    /// Deterministic per index so tests can assert exact outputs:
    /// whitespace/underscore splits, paren substitution and bracket
    /// splits cycle by index.
    fn corrupt_token(index: u32) -> String {
        match index % 3 {
            0 => format!("( T {} )", index),
            1 => format!("__ TERM _ 00{}__", index),
            _ => format!("[ T_{} ]", index),
        }
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError> {
        if let Some(generator) = self.custom_response {
            return Ok(generator(prompt));
        }

        match &self.behavior {
            MockBehavior::Echo => Ok(prompt.text.clone()),

            MockBehavior::CorruptTokens => {
                let corrupted = TOKEN_REGEX.replace_all(&prompt.text, |caps: &regex::Captures| {
                    let index: u32 = caps[1].parse().unwrap_or(0);
                    Self::corrupt_token(index)
                });
                Ok(corrupted.into_owned())
            }

            MockBehavior::DropTokens => {
                Ok(TOKEN_REGEX.replace_all(&prompt.text, "").into_owned())
            }

            MockBehavior::AppendExplanation => Ok(format!(
                "{}\n\nNote: the bracketed tokens are technical terms that I have preserved as instructed.",
                prompt.text
            )),

            MockBehavior::Truncated => Ok("Short.".to_string()),

            MockBehavior::Failing => Err(GenerationError::RequestFailed(
                "Simulated generator failure".to_string(),
            )),

            MockBehavior::Fixed(text) => Ok(text.clone()),
        }
    }
}
