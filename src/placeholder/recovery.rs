/*!
 * Staged placeholder recovery.
 *
 * Generator output arrives with placeholder tokens intact, mangled, or
 * gone. Recovery runs an ordered list of strategies, each a pure
 * transformation over the text and the placeholder map:
 *
 * 1. Exact: verbatim token replacement
 * 2. NumericAnchor: bounded corruption variants anchored on the index
 * 3. TermName: fragments that echo the target term alongside debris
 * 4. ResidueCleanup: delete what cannot be resolved, record it
 * 5. NormalizeFormatting: whitespace and punctuation tidy-up
 *
 * Stages run in strict order; within a stage, placeholders are processed
 * in ascending index order so earlier replacements cannot be re-matched
 * by later patterns. Recovery never fails: the worst case is text with
 * residues deleted and reported, which the quality validator surfaces.
 */

use std::collections::BTreeSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::placeholder::codec::{PlaceholderEntry, PlaceholderMap};
use crate::placeholder::residue::{self, RESIDUE_PATTERNS};

/// Safety bound for the residue-cleanup fixpoint loop
const MAX_CLEANUP_ITERATIONS: usize = 100;

/// Tagged recovery strategies, applied in list order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    /// Replace tokens found verbatim
    Exact,
    /// Match corruption variants anchored on the numeric index
    NumericAnchor,
    /// Match fragments that contain the target term itself
    TermName,
    /// Resolve or delete remaining residue shapes
    ResidueCleanup,
    /// Collapse whitespace and fix punctuation spacing
    NormalizeFormatting,
}

impl RecoveryStage {
    /// Stable name used in reports and logs
    pub fn name(&self) -> &'static str {
        match self {
            RecoveryStage::Exact => "exact",
            RecoveryStage::NumericAnchor => "numeric-anchor",
            RecoveryStage::TermName => "term-name",
            RecoveryStage::ResidueCleanup => "residue-cleanup",
            RecoveryStage::NormalizeFormatting => "normalize-formatting",
        }
    }

    /// The full strategy list in canonical order
    pub fn full_pipeline() -> Vec<RecoveryStage> {
        vec![
            RecoveryStage::Exact,
            RecoveryStage::NumericAnchor,
            RecoveryStage::TermName,
            RecoveryStage::ResidueCleanup,
            RecoveryStage::NormalizeFormatting,
        ]
    }
}

/// How a single placeholder was resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlaceholder {
    /// Placeholder index
    pub index: u32,
    /// Stage that resolved it
    pub stage: RecoveryStage,
    /// Pattern name within the stage
    pub pattern: &'static str,
}

/// A fragment deleted during cleanup without being resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueRecord {
    /// Residue pattern that matched the fragment
    pub pattern: &'static str,
    /// The deleted text
    pub fragment: String,
    /// Index extracted from the fragment, if any
    pub index: Option<u32>,
}

/// Result of a recovery run
#[derive(Debug, Clone)]
pub struct RecoveryOutcome {
    /// The cleaned text
    pub text: String,
    /// Placeholders resolved, in resolution order
    pub resolved: Vec<ResolvedPlaceholder>,
    /// Placeholder indices never located in the output
    pub missing: Vec<u32>,
    /// Fragments deleted because they could not be resolved
    pub deleted_residues: Vec<ResidueRecord>,
}

impl RecoveryOutcome {
    /// Count of unresolved residues: missing placeholders plus deleted
    /// fragments
    pub fn unresolved_count(&self) -> usize {
        self.missing.len() + self.deleted_residues.len()
    }

    /// Whether every placeholder was resolved and nothing was deleted
    pub fn is_clean(&self) -> bool {
        self.unresolved_count() == 0
    }

    /// Human-readable descriptions of everything left unresolved
    pub fn unresolved_descriptions(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .missing
            .iter()
            .map(|i| format!("placeholder {} missing from generator output", i))
            .collect();
        out.extend(self.deleted_residues.iter().map(|r| {
            format!(
                "deleted unresolvable residue '{}' (pattern: {})",
                r.fragment, r.pattern
            )
        }));
        out
    }
}

/// Staged placeholder recoverer
pub struct PlaceholderRecoverer {
    stages: Vec<RecoveryStage>,
}

impl PlaceholderRecoverer {
    /// Create a recoverer running the full canonical stage list
    pub fn new() -> Self {
        Self {
            stages: RecoveryStage::full_pipeline(),
        }
    }

    /// Create a recoverer with a custom stage list (tests, diagnostics)
    pub fn with_stages(stages: Vec<RecoveryStage>) -> Self {
        Self { stages }
    }

    /// Recover all placeholders in generator output
    pub fn recover(&self, raw_output: &str, map: &PlaceholderMap) -> RecoveryOutcome {
        let mut text = raw_output.to_string();
        let mut pending: BTreeSet<u32> = map.indices().into_iter().collect();
        let mut resolved: Vec<ResolvedPlaceholder> = Vec::new();
        let mut deleted: Vec<ResidueRecord> = Vec::new();

        for stage in &self.stages {
            match stage {
                RecoveryStage::Exact => {
                    Self::exact_pass(&mut text, map, &mut pending, &mut resolved);
                }
                RecoveryStage::NumericAnchor => {
                    Self::numeric_pass(&mut text, map, &mut pending, &mut resolved);
                }
                RecoveryStage::TermName => {
                    Self::term_name_pass(&mut text, map, &mut pending, &mut resolved);
                }
                RecoveryStage::ResidueCleanup => {
                    Self::cleanup_pass(&mut text, map, &mut pending, &mut resolved, &mut deleted);
                }
                RecoveryStage::NormalizeFormatting => {
                    text = normalize_formatting(&text);
                }
            }
        }

        let missing: Vec<u32> = pending.into_iter().collect();

        debug!(
            "Recovery: {} resolved, {} missing, {} residue(s) deleted",
            resolved.len(),
            missing.len(),
            deleted.len()
        );

        RecoveryOutcome {
            text,
            resolved,
            missing,
            deleted_residues: deleted,
        }
    }

    /// Stage 1: verbatim token replacement
    fn exact_pass(
        text: &mut String,
        map: &PlaceholderMap,
        pending: &mut BTreeSet<u32>,
        resolved: &mut Vec<ResolvedPlaceholder>,
    ) {
        for index in pending.clone() {
            let Some(entry) = map.get(index) else { continue };
            if text.contains(&entry.token) {
                *text = text.replace(&entry.token, &entry.target);
                pending.remove(&index);
                resolved.push(ResolvedPlaceholder {
                    index,
                    stage: RecoveryStage::Exact,
                    pattern: "verbatim",
                });
            }
        }
    }

    /// Stage 2: corruption variants anchored on the numeric index
    fn numeric_pass(
        text: &mut String,
        map: &PlaceholderMap,
        pending: &mut BTreeSet<u32>,
        resolved: &mut Vec<ResolvedPlaceholder>,
    ) {
        for index in pending.clone() {
            let Some(entry) = map.get(index) else { continue };

            // First variant found wins
            for (name, re) in residue::numeric_variants(index) {
                if re.is_match(text) {
                    *text = re.replace_all(text, entry.target.as_str()).into_owned();
                    pending.remove(&index);
                    resolved.push(ResolvedPlaceholder {
                        index,
                        stage: RecoveryStage::NumericAnchor,
                        pattern: name,
                    });
                    break;
                }
            }
        }
    }

    /// Stage 3: fragments echoing the target term alongside marker debris
    ///
    /// Whichever alias matched, the replacement is always the
    /// highest-priority alias.
    fn term_name_pass(
        text: &mut String,
        map: &PlaceholderMap,
        pending: &mut BTreeSet<u32>,
        resolved: &mut Vec<ResolvedPlaceholder>,
    ) {
        for index in pending.clone() {
            let Some(entry) = map.get(index) else { continue };

            if let Some(pattern) = Self::resolve_by_name(text, entry) {
                pending.remove(&index);
                resolved.push(ResolvedPlaceholder {
                    index,
                    stage: RecoveryStage::TermName,
                    pattern,
                });
            }
        }
    }

    /// Try to resolve one placeholder by term name; mutates the text on
    /// success and returns the pattern name used
    ///
    /// Aliases are tried longest-first so a short alias cannot shadow a
    /// longer one it is contained in; the replacement is always the
    /// priority alias.
    fn resolve_by_name(text: &mut String, entry: &PlaceholderEntry) -> Option<&'static str> {
        let mut aliases: Vec<&String> = std::iter::once(&entry.target)
            .chain(entry.alternates.iter())
            .collect();
        aliases.sort_by_key(|a| std::cmp::Reverse(a.chars().count()));

        for alias in aliases {
            let escaped = regex::escape(alias);

            // Bracketed fragment containing the alias
            let bracketed = Regex::new(&format!(
                r"(?i)[\[({{]\s*[^\[\](){{}}]*{}[^\[\](){{}}]*\s*[\])}}]",
                escaped
            ))
            .ok()?;
            if bracketed.is_match(text) {
                *text = bracketed.replace_all(text, entry.target.as_str()).into_owned();
                return Some("bracketed-fragment");
            }

            // Underscore-wrapped fragment containing the alias
            let underscored =
                Regex::new(&format!(r"(?i)_+[^_\n]*{}[^_\n]*_+", escaped)).ok()?;
            if underscored.is_match(text) {
                *text = underscored
                    .replace_all(text, entry.target.as_str())
                    .into_owned();
                return Some("underscored-fragment");
            }

            // The alias survived bare: substitute the priority alias in place
            let bare = Regex::new(&format!(r"(?i){}", escaped)).ok()?;
            if bare.is_match(text) {
                if alias != &entry.target {
                    *text = bare.replace_all(text, entry.target.as_str()).into_owned();
                }
                return Some("bare-term");
            }
        }

        None
    }

    /// Stage 4: resolve or delete remaining residue shapes
    ///
    /// Runs the battery to a fixpoint so cleaned text is stable under a
    /// second pass.
    fn cleanup_pass(
        text: &mut String,
        map: &PlaceholderMap,
        pending: &mut BTreeSet<u32>,
        resolved: &mut Vec<ResolvedPlaceholder>,
        deleted: &mut Vec<ResidueRecord>,
    ) {
        for _ in 0..MAX_CLEANUP_ITERATIONS {
            let mut changed = false;

            for (name, re) in RESIDUE_PATTERNS.iter() {
                let Some(caps) = re.captures(text) else { continue };
                let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str().to_string()));
                let Some((start, end, fragment)) = whole else { continue };

                let index = residue::captured_index(&caps);

                // Index-based resolution first
                if let Some(idx) = index {
                    if let Some(entry) = map.get(idx) {
                        text.replace_range(start..end, &entry.target);
                        if pending.remove(&idx) {
                            resolved.push(ResolvedPlaceholder {
                                index: idx,
                                stage: RecoveryStage::ResidueCleanup,
                                pattern: name,
                            });
                        }
                        changed = true;
                        break;
                    }
                }

                // Name-based resolution against any still-pending entry
                let lower_fragment = fragment.to_lowercase();
                let by_name = pending.iter().copied().find(|idx| {
                    map.get(*idx).is_some_and(|e| {
                        std::iter::once(&e.target)
                            .chain(e.alternates.iter())
                            .any(|alias| lower_fragment.contains(&alias.to_lowercase()))
                    })
                });
                if let Some(idx) = by_name {
                    if let Some(entry) = map.get(idx) {
                        text.replace_range(start..end, &entry.target);
                        pending.remove(&idx);
                        resolved.push(ResolvedPlaceholder {
                            index: idx,
                            stage: RecoveryStage::ResidueCleanup,
                            pattern: name,
                        });
                        changed = true;
                        break;
                    }
                }

                // Unresolvable: delete rather than leave visible debris
                text.replace_range(start..end, "");
                deleted.push(ResidueRecord {
                    pattern: name,
                    fragment,
                    index,
                });
                changed = true;
                break;
            }

            if !changed {
                break;
            }
        }
    }
}

impl Default for PlaceholderRecoverer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whitespace collapse
static MULTI_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("Invalid multi-space regex"));

/// Space before punctuation
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([,.;:!?、，。！？；：])").expect("Invalid punct-space regex"));

/// Repeated sentence terminators, one pattern per terminator (the regex
/// crate has no backreferences)
static REPEATED_TERMINATORS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"!{2,}").expect("Invalid terminator regex"), "!"),
        (Regex::new(r"\?{2,}").expect("Invalid terminator regex"), "?"),
        (Regex::new(r"。{2,}").expect("Invalid terminator regex"), "。"),
        (Regex::new(r"！{2,}").expect("Invalid terminator regex"), "！"),
        (Regex::new(r"？{2,}").expect("Invalid terminator regex"), "？"),
    ]
});

/// Overlong dot runs (ellipsis stays)
static DOT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.{4,}").expect("Invalid dot-run regex"));

/// Stage 5: formatting normalization
///
/// Collapses repeated whitespace, removes space before punctuation,
/// collapses repeated sentence terminators, trims.
pub fn normalize_formatting(text: &str) -> String {
    let text = MULTI_SPACE.replace_all(text, " ");
    let mut text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned();
    for (re, replacement) in REPEATED_TERMINATORS.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    let text = DOT_RUN.replace_all(&text, "...");
    text.trim().to_string()
}
