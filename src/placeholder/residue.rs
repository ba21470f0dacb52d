/*!
 * Corruption-variant and residue-shape patterns.
 *
 * Generators mangle placeholder tokens in recurring ways: whitespace or
 * underscores spliced into the token, brackets swapped for parens or
 * braces, case changes, `TERM`-style debris. The bounded variant family
 * here anchors on the numeric index, which survives corruption far more
 * often than the token's letters.
 *
 * The residue battery matches whatever marker debris is left after the
 * index-anchored passes. It is shared with the quality validator, which
 * uses it to assert that no placeholder debris reaches the final text.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Numeric index capture group name used across residue patterns
pub const INDEX_GROUP: &str = "idx";

/// Build the bounded family of corruption variants for one placeholder index
///
/// Ordered most-specific first; the recoverer takes the first variant that
/// matches. All variants are case-insensitive and tolerate leading zeros.
pub fn numeric_variants(index: u32) -> Vec<(&'static str, Regex)> {
    let patterns: [(&'static str, String); 5] = [
        (
            "bracketed",
            format!(r"(?i)\[\s*T[A-Za-z]{{0,4}}[_\s]*0*{}\s*\]", index),
        ),
        (
            "paren-brace",
            format!(r"(?i)[({{]\s*T[A-Za-z]{{0,4}}[_\s]*0*{}\s*[)}}]", index),
        ),
        (
            "underscore-wrapped",
            format!(r"(?i)_+\s*T(?:ERM)?[A-Za-z]?[_\s]*0*{}\s*_+", index),
        ),
        (
            "term-word",
            format!(r"(?i)\bT(?:ERM[A-Za-z]?)?[_\s]+0*{}\b", index),
        ),
        ("collapsed", format!(r"(?i)\bT0*{}\b", index)),
    ];

    patterns
        .into_iter()
        .filter_map(|(name, pattern)| Regex::new(&pattern).ok().map(|re| (name, re)))
        .collect()
}

/// Residue shapes left behind when index-anchored recovery fails
///
/// Each pattern optionally captures a numeric index (`idx`) so cleanup can
/// still attempt index-based resolution before deleting the fragment.
pub static RESIDUE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "bracketed-marker",
            Regex::new(r"(?i)[\[({]\s*T[A-Za-z]{0,4}[_\s]*0*(?P<idx>\d{1,4})?\s*[\])}]")
                .expect("Invalid bracketed-marker regex"),
        ),
        (
            "underscore-cluster",
            Regex::new(r"(?i)_{2,}[ \t]*(?:T[A-Za-z]{0,4})?[_\s]*0*(?P<idx>\d{1,4})?[ \t]*_{2,}")
                .expect("Invalid underscore-cluster regex"),
        ),
        (
            "term-debris",
            Regex::new(r"(?i)\bT(?:ERM[A-Za-z]?)?[_\s]*0*(?P<idx>\d{1,4})\b")
                .expect("Invalid term-debris regex"),
        ),
        (
            "bracketed-index",
            Regex::new(r"[\[({]\s*0*(?P<idx>\d{1,4})\s*[\])}]")
                .expect("Invalid bracketed-index regex"),
        ),
        (
            "empty-brackets",
            Regex::new(r"\[\s*\]|\(\s*\)|\{\s*\}").expect("Invalid empty-brackets regex"),
        ),
        (
            "underscore-run",
            Regex::new(r"_{2,}").expect("Invalid underscore-run regex"),
        ),
    ]
});

/// Whether any residue shape still matches a text
pub fn has_residue(text: &str) -> bool {
    RESIDUE_PATTERNS.iter().any(|(_, re)| re.is_match(text))
}

/// Extract the captured index from a residue match, if present
pub fn captured_index(caps: &regex::Captures<'_>) -> Option<u32> {
    caps.name(INDEX_GROUP)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}
