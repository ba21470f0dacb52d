/*!
 * Term matching: find glossary hits in free text.
 *
 * Candidates are scanned longest-first so a short term never shadows a
 * longer compound term containing it, and accepted spans never overlap.
 * Matching is case-insensitive and deliberately has no word-boundary
 * requirement: glossary terms are domain nouns that legitimately appear
 * inside compound words, so `Neck` matches inside `Necking`. Tests
 * document this choice.
 */

use log::debug;
use regex::Regex;

use crate::glossary::Glossary;

/// A single glossary hit in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    /// Byte span of the match in the source text
    pub source_span: (usize, usize),
    /// The matched slice, as it appears in the text
    pub source_text: String,
    /// Highest-priority target term for substitution
    pub target_term: String,
    /// Remaining target aliases, in priority order
    pub alternate_targets: Vec<String>,
}

impl TermMatch {
    /// Start offset of the match
    pub fn start(&self) -> usize {
        self.source_span.0
    }

    /// End offset of the match
    pub fn end(&self) -> usize {
        self.source_span.1
    }
}

/// Scanner for glossary terms in source text
pub struct TermMatcher;

impl TermMatcher {
    /// Find all glossary matches in a text, ordered by position
    ///
    /// Returns an empty vector when nothing matches; that is not an error.
    pub fn find_matches(text: &str, glossary: &Glossary) -> Vec<TermMatch> {
        if text.is_empty() || glossary.is_empty() {
            return Vec::new();
        }

        // Longest key first; stable sort keeps glossary insertion order
        // as the tie-breaker for equal lengths
        let mut candidates: Vec<usize> = (0..glossary.entries().len()).collect();
        candidates.sort_by(|&a, &b| {
            let len_a = glossary.entries()[a].key.chars().count();
            let len_b = glossary.entries()[b].key.chars().count();
            len_b.cmp(&len_a)
        });

        let mut accepted: Vec<TermMatch> = Vec::new();

        for idx in candidates {
            let entry = &glossary.entries()[idx];

            let pattern = match Regex::new(&format!("(?i){}", regex::escape(&entry.key))) {
                Ok(p) => p,
                Err(e) => {
                    debug!("Skipping unmatchable glossary key '{}': {}", entry.key, e);
                    continue;
                }
            };

            for m in pattern.find_iter(text) {
                let span = (m.start(), m.end());
                if Self::overlaps_any(span, &accepted) {
                    continue;
                }

                accepted.push(TermMatch {
                    source_span: span,
                    source_text: m.as_str().to_string(),
                    target_term: entry.priority_target().to_string(),
                    alternate_targets: entry.alternate_targets().to_vec(),
                });
            }
        }

        accepted.sort_by_key(|m| m.start());

        debug!(
            "Matched {} glossary term(s) in {} chars of text",
            accepted.len(),
            text.chars().count()
        );

        accepted
    }

    /// Whether a span overlaps any already-accepted match
    fn overlaps_any(span: (usize, usize), accepted: &[TermMatch]) -> bool {
        accepted
            .iter()
            .any(|m| span.0 < m.end() && m.start() < span.1)
    }
}
