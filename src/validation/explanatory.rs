/*!
 * Explanatory-text detection and stripping.
 *
 * Generators sometimes append meta-commentary the caller never asked
 * for: notes about what a term means, hedges about the translation, or
 * a "here is the translation" preamble. These are stripped rather than
 * failed: the translation itself is usually fine underneath.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed list of explanatory-phrase shapes
///
/// Each pattern matches one removable unit (a line, a preamble or a
/// parenthetical); stripping is repeated until nothing matches.
static EXPLANATORY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "note-line",
            Regex::new(r"(?im)^[ \t]*(?:note|translation note|translator's note|explanation)[ \t]*[:：].*(?:\r?\n|$)")
                .expect("Invalid note-line regex"),
        ),
        (
            "cjk-note-line",
            Regex::new(r"(?m)^[ \t]*(?:注|注意|译注|说明|备注)[ \t]*[:：].*(?:\r?\n|$)")
                .expect("Invalid cjk-note-line regex"),
        ),
        (
            "preamble",
            Regex::new(r"(?i)^[ \t]*(?:here is the translation|the translation is|translated text)[ \t]*[:：]?[ \t]*(?:\r?\n)?")
                .expect("Invalid preamble regex"),
        ),
        (
            "parenthetical-note",
            Regex::new(r"(?i)[（(][ \t]*(?:note|译注|注)[:：][^)）]*[)）]")
                .expect("Invalid parenthetical-note regex"),
        ),
        (
            "term-meaning",
            Regex::new(r"(?i)(?:the term|this term)[^.。\n]*\b(?:means|refers to)\b[^.。\n]*[.。]")
                .expect("Invalid term-meaning regex"),
        ),
        (
            "cjk-term-meaning",
            Regex::new(r"(?:意思是|指的是|的含义是)[^。\n]*。").expect("Invalid cjk-term-meaning regex"),
        ),
    ]
});

/// Result of stripping explanatory text
#[derive(Debug, Clone)]
pub struct StripOutcome {
    /// Text with explanatory units removed
    pub text: String,
    /// (pattern name, removed fragment) per stripping action
    pub stripped: Vec<(&'static str, String)>,
}

impl StripOutcome {
    /// Number of fragments removed
    pub fn count(&self) -> usize {
        self.stripped.len()
    }
}

/// Whether any explanatory shape is present
pub fn contains_explanation(text: &str) -> bool {
    EXPLANATORY_PATTERNS.iter().any(|(_, re)| re.is_match(text))
}

/// Strip all explanatory units from a text
///
/// Runs the pattern list to a fixpoint, recording each removed fragment.
pub fn strip_explanations(text: &str) -> StripOutcome {
    let mut current = text.to_string();
    let mut stripped = Vec::new();

    // Bounded: each iteration removes at least one fragment
    for _ in 0..64 {
        let mut changed = false;

        for (name, re) in EXPLANATORY_PATTERNS.iter() {
            if let Some(m) = re.find(&current) {
                stripped.push((*name, m.as_str().trim().to_string()));
                current.replace_range(m.start()..m.end(), "");
                changed = true;
                break;
            }
        }

        if !changed {
            break;
        }
    }

    // Stripping whole lines can leave blank runs behind
    let cleaned = current
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    StripOutcome {
        text: cleaned.trim().to_string(),
        stripped,
    }
}
