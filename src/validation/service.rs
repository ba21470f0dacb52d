/*!
 * Quality validation service.
 *
 * Composes the individual checks into a single verdict over a recovered
 * translation: non-empty output, direction-aware length ratio, no
 * placeholder debris, no injected explanatory prose. Explanatory text is
 * stripped and counted as fixed; everything else that fails lands in
 * `remaining_issues` and drives the orchestrator's retry decision.
 */

use log::debug;

use crate::language_utils::Direction;
use crate::placeholder::residue;
use crate::placeholder::RecoveryOutcome;
use crate::validation::explanatory;
use crate::validation::length::LengthValidator;

/// Configuration for the quality validator
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Check the length ratio against direction floors
    pub check_length: bool,
    /// Strip explanatory prose instead of failing on it
    pub strip_explanations: bool,
    /// Minimum source length (chars) before ratio checks apply
    pub min_source_chars_for_ratio: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_length: true,
            strip_explanations: true,
            min_source_chars_for_ratio: crate::validation::length::DEFAULT_MIN_SOURCE_CHARS,
        }
    }
}

impl ValidationConfig {
    /// Config that skips the length check (diagnostics, tests)
    pub fn without_length_check() -> Self {
        Self {
            check_length: false,
            ..Default::default()
        }
    }
}

/// Quality report for one validated translation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityReport {
    /// Total issues detected (fixed + remaining)
    pub issues_found: usize,
    /// Issues the validator fixed itself (stripping actions)
    pub issues_fixed: usize,
    /// Issues that could not be fixed, in detection order
    pub remaining_issues: Vec<String>,
}

impl QualityReport {
    /// Whether the translation is acceptable
    ///
    /// Fixed issues are acceptable; remaining ones are not.
    pub fn passed(&self) -> bool {
        self.remaining_issues.is_empty()
    }
}

/// Result of validating one translation
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The (possibly stripped) final text
    pub text: String,
    /// The quality report
    pub report: QualityReport,
}

/// Quality validator composing all checks
pub struct QualityValidator {
    config: ValidationConfig,
}

impl QualityValidator {
    /// Create a validator with default configuration
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Create a validator with custom configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a recovered translation
    ///
    /// `recovery` carries the recoverer's residue bookkeeping; its
    /// unresolved entries become remaining issues here rather than being
    /// swallowed.
    pub fn validate(
        &self,
        source: &str,
        translated: &str,
        direction: Direction,
        recovery: Option<&RecoveryOutcome>,
    ) -> ValidationOutcome {
        let mut report = QualityReport::default();

        // Strip explanatory prose first; it would skew the length check
        let text = if self.config.strip_explanations {
            let stripped = explanatory::strip_explanations(translated);
            report.issues_found += stripped.count();
            report.issues_fixed += stripped.count();
            stripped.text
        } else {
            translated.trim().to_string()
        };

        // Non-empty
        if text.trim().is_empty() {
            report.issues_found += 1;
            report
                .remaining_issues
                .push("translated text is empty".to_string());
        }

        // Length ratio, direction-aware
        if self.config.check_length && !text.trim().is_empty() {
            let validator = LengthValidator {
                min_source_chars: self.config.min_source_chars_for_ratio,
            };
            if let Some(issue) = validator.check(source, &text, direction) {
                report.issues_found += 1;
                report.remaining_issues.push(issue.to_string());
            }
        }

        // No residual placeholder debris
        for (name, re) in residue::RESIDUE_PATTERNS.iter() {
            if re.is_match(&text) {
                report.issues_found += 1;
                report
                    .remaining_issues
                    .push(format!("residual placeholder debris (pattern: {})", name));
            }
        }

        // Unresolved residues reported by the recoverer
        if let Some(recovery) = recovery {
            for description in recovery.unresolved_descriptions() {
                report.issues_found += 1;
                report.remaining_issues.push(description);
            }
        }

        debug!(
            "Validation: {} found, {} fixed, {} remaining",
            report.issues_found,
            report.issues_fixed,
            report.remaining_issues.len()
        );

        ValidationOutcome { text, report }
    }
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self::new()
    }
}
