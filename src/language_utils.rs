use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for translation direction handling
///
/// This module provides functions for normalizing the language identifiers
/// accepted at the API boundary (ISO codes, English names, native names)
/// and for resolving the `auto` pseudo-language via script detection.
/// A resolved translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Normalized source language code (ISO 639-1)
    pub source: LangCode,
    /// Normalized target language code (ISO 639-1)
    pub target: LangCode,
}

impl Direction {
    /// Build a direction from already-normalized codes
    pub fn new(source: LangCode, target: LangCode) -> Self {
        Self { source, target }
    }

    /// The opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// A normalized two-letter language code
///
/// Stored as a fixed-size array so directions stay `Copy` and hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LangCode([u8; 2]);

impl LangCode {
    /// Chinese
    pub const ZH: LangCode = LangCode(*b"zh");
    /// English
    pub const EN: LangCode = LangCode(*b"en");

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        // Always constructed from validated ASCII codes
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl std::fmt::Display for LangCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize a language identifier to an ISO 639-1 code
///
/// Accepts the fixed alias sets used by callers (`zh-cn`, `chinese`, `中文`,
/// `en-gb`, `english`, `英文`, ...) plus any code isolang can resolve.
/// `auto` is not handled here; use [`resolve_language`] for that.
pub fn normalize_language(code: &str) -> Result<LangCode> {
    let normalized = code.trim().to_lowercase();

    match normalized.as_str() {
        "zh" | "zh-cn" | "zh-tw" | "zh-hans" | "zh-hant" | "chinese" | "中文" => {
            return Ok(LangCode::ZH);
        }
        "en" | "en-us" | "en-gb" | "english" | "英文" => {
            return Ok(LangCode::EN);
        }
        _ => {}
    }

    // Fall back to ISO lookup for anything else
    let lang = if normalized.len() == 2 {
        Language::from_639_1(&normalized)
    } else if normalized.len() == 3 {
        Language::from_639_3(&normalized)
    } else {
        Language::from_name(code.trim())
    };

    let lang = lang.ok_or_else(|| anyhow!("Unknown language identifier: {}", code))?;
    let part1 = lang
        .to_639_1()
        .ok_or_else(|| anyhow!("Language has no ISO 639-1 code: {}", code))?;

    let bytes = part1.as_bytes();
    if bytes.len() != 2 {
        return Err(anyhow!("Unexpected ISO 639-1 code length: {}", part1));
    }
    Ok(LangCode([bytes[0], bytes[1]]))
}

/// Resolve a language identifier, handling `auto` via script detection
///
/// When the identifier is `auto`, the text is inspected for CJK codepoints:
/// majority-CJK text resolves to Chinese, anything else to English. This is
/// the fallback used when no external language detector is available.
pub fn resolve_language(code: &str, text: &str) -> Result<LangCode> {
    if code.trim().eq_ignore_ascii_case("auto") {
        return Ok(detect_script(text));
    }
    normalize_language(code)
}

/// Resolve a full direction, allowing `auto` on the source side
///
/// An `auto` target is resolved to the opposite of the detected source,
/// restricted to the zh/en pair this deployment serves.
pub fn resolve_direction(source: &str, target: &str, text: &str) -> Result<Direction> {
    let source_code = resolve_language(source, text)?;

    let target_code = if target.trim().eq_ignore_ascii_case("auto") {
        if source_code == LangCode::ZH {
            LangCode::EN
        } else {
            LangCode::ZH
        }
    } else {
        normalize_language(target)?
    };

    if source_code == target_code {
        return Err(anyhow!(
            "Source and target language are both '{}'",
            source_code
        ));
    }

    Ok(Direction::new(source_code, target_code))
}

/// Detect the dominant script of a text
///
/// Counts CJK codepoints against other alphabetic codepoints. Returns
/// Chinese when CJK dominates, English otherwise (including empty text).
pub fn detect_script(text: &str) -> LangCode {
    let mut cjk = 0usize;
    let mut other = 0usize;

    for c in text.chars() {
        if is_cjk(c) {
            cjk += 1;
        } else if c.is_alphabetic() {
            other += 1;
        }
    }

    if cjk > 0 && cjk >= other {
        LangCode::ZH
    } else {
        LangCode::EN
    }
}

/// Check whether a character falls in the common CJK ranges
fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF      // CJK Unified Ideographs
        | 0x3400..=0x4DBF    // CJK Extension A
        | 0xF900..=0xFAFF    // CJK Compatibility Ideographs
        | 0x3000..=0x303F    // CJK punctuation
        | 0xFF00..=0xFFEF    // Fullwidth forms
    )
}

/// Get the English display name for a normalized code
pub fn get_language_name(code: LangCode) -> Result<String> {
    let lang = Language::from_639_1(code.as_str())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
