/*!
 * Prompt templates for terminology-protected translation.
 *
 * Two variants exist: the normal instruction set, and a stricter one used
 * when a first attempt failed validation. The strict variant spells out
 * the placeholder contract more forcefully and forbids commentary.
 */

use crate::generator::GenerationPrompt;
use crate::language_utils::get_language_name;

/// Prompt template with placeholders for direction and text
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// The default instruction set for protected translation.
    pub const PROTECTED_TRANSLATOR: &'static str = r#"You are a professional translator. Translate the following text from {source_language} to {target_language}.

Rules:
- Tokens of the form [T1], [T2], ... are protected markers. Copy each one into your output exactly as written, at the position where its content belongs.
- Do not translate, transliterate, reformat or explain the markers.
- Output only the translated text.

Text:
{text}"#;

    /// Stricter instruction set used after a failed attempt.
    pub const PROTECTED_TRANSLATOR_STRICT: &'static str = r#"You are a professional translator. Translate the following text from {source_language} to {target_language}.

STRICT RULES - a previous attempt violated them:
- Every token [T1], [T2], ... MUST appear in your output exactly once, byte for byte: same brackets, same letter, same number, no added spaces or underscores.
- Do NOT add notes, explanations or any text that is not the translation itself.
- The translation must be complete; do not shorten or summarize.

Text:
{text}"#;

    /// Create a template from a raw string
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// The default protected-translation template
    pub fn protected_translator() -> Self {
        Self::new(Self::PROTECTED_TRANSLATOR)
    }

    /// The strict retry template
    pub fn protected_translator_strict() -> Self {
        Self::new(Self::PROTECTED_TRANSLATOR_STRICT)
    }

    /// Render the template for a generation prompt
    ///
    /// Language codes are rendered as display names when known, falling
    /// back to the raw code.
    pub fn render(&self, prompt: &GenerationPrompt) -> String {
        let source = get_language_name(prompt.direction.source)
            .unwrap_or_else(|_| prompt.direction.source.to_string());
        let target = get_language_name(prompt.direction.target)
            .unwrap_or_else(|_| prompt.direction.target.to_string());

        self.template
            .replace("{source_language}", &source)
            .replace("{target_language}", &target)
            .replace("{text}", &prompt.text)
    }

    /// Pick the template matching a prompt's strictness
    pub fn for_prompt(prompt: &GenerationPrompt) -> Self {
        if prompt.strict {
            Self::protected_translator_strict()
        } else {
            Self::protected_translator()
        }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::protected_translator()
    }
}
