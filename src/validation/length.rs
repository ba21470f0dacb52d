/*!
 * Length validation for recovered translations.
 *
 * Different directions have different expected length ratios: dense
 * scripts (Chinese) contract when translated into themselves and expand
 * heavily when translated into English. The floor below which a
 * translation is flagged "possibly incomplete" is therefore
 * direction-dependent.
 */

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;

use crate::language_utils::Direction;

/// Fallback floor for directions not in the table
const DEFAULT_MIN_RATIO: f64 = 0.3;

/// Ratio checks only apply above this source length (in chars)
pub const DEFAULT_MIN_SOURCE_CHARS: usize = 20;

/// Calibrated minimum length ratios per direction
///
/// Dense-script sources translated into sparse scripts tolerate lower
/// floors than the reverse.
static DIRECTION_FLOORS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("en_zh", 0.25); // Chinese contracts heavily from English
    m.insert("zh_en", 0.8);  // English expands from Chinese
    m.insert("en_ja", 0.3);
    m.insert("ja_en", 0.7);
    m.insert("en_ko", 0.3);
    m.insert("ko_en", 0.7);
    m
});

/// A failed length check
#[derive(Debug, Clone, PartialEq)]
pub struct LengthIssue {
    /// Observed ratio (translated / source, in chars)
    pub ratio: f64,
    /// The floor the ratio fell below
    pub min_ratio: f64,
    /// Source length in chars
    pub source_len: usize,
    /// Translated length in chars
    pub translated_len: usize,
}

impl std::fmt::Display for LengthIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "possibly incomplete: length ratio {:.2} below minimum {:.2} ({} -> {} chars)",
            self.ratio, self.min_ratio, self.source_len, self.translated_len
        )
    }
}

/// Length validator with direction-aware floors
#[derive(Debug, Clone)]
pub struct LengthValidator {
    /// Minimum source length (chars) before ratio checks apply
    pub min_source_chars: usize,
}

impl Default for LengthValidator {
    fn default() -> Self {
        Self {
            min_source_chars: DEFAULT_MIN_SOURCE_CHARS,
        }
    }
}

impl LengthValidator {
    /// Create a validator with the default threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// The minimum acceptable ratio for a direction
    pub fn floor_for(direction: Direction) -> f64 {
        let key = format!("{}_{}", direction.source, direction.target);
        DIRECTION_FLOORS.get(key.as_str()).copied().unwrap_or(DEFAULT_MIN_RATIO)
    }

    /// Calculate length ratio between translated and source text
    pub fn calculate_ratio(source: &str, translated: &str) -> f64 {
        let source_len = source.chars().count();
        let translated_len = translated.chars().count();

        if source_len == 0 {
            if translated_len == 0 { 1.0 } else { f64::INFINITY }
        } else {
            translated_len as f64 / source_len as f64
        }
    }

    /// Check a translation's length against the direction floor
    ///
    /// Short sources are exempt; there the ratio carries no signal.
    pub fn check(
        &self,
        source: &str,
        translated: &str,
        direction: Direction,
    ) -> Option<LengthIssue> {
        let source_len = source.trim().chars().count();
        let translated_len = translated.trim().chars().count();

        if source_len <= self.min_source_chars {
            return None;
        }

        let ratio = Self::calculate_ratio(source.trim(), translated.trim());
        let min_ratio = Self::floor_for(direction);

        if ratio > min_ratio {
            return None;
        }

        debug!(
            "Length check failed for {}: ratio {:.2} <= floor {:.2}",
            direction, ratio, min_ratio
        );

        Some(LengthIssue {
            ratio,
            min_ratio,
            source_len,
            translated_len,
        })
    }
}
