/*!
 * Placeholder substitution for matched terms.
 *
 * Each matched span is replaced by a `[T<n>]` token before the text goes
 * to the generator. The token alphabet is short, ASCII-only and not a
 * natural-language word, so generators tend to copy it through rather
 * than translate it. Restoration lives in `recovery`, not here: by the
 * time text comes back the tokens may be corrupted, and undoing that is
 * a different job.
 */

use log::debug;

use crate::matcher::TermMatch;

/// One placeholder assignment for a request
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderEntry {
    /// 1-based placeholder index
    pub index: u32,
    /// The literal token inserted into the text
    pub token: String,
    /// Term the placeholder restores to (highest-priority alias)
    pub target: String,
    /// Other accepted aliases, used by name-based recovery
    pub alternates: Vec<String>,
    /// The source-text slice the placeholder replaced
    pub source_text: String,
}

/// Ordered placeholder assignments for one request
///
/// Created at protect time, consumed by the recoverer, and dropped with
/// the request.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderMap {
    entries: Vec<PlaceholderEntry>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placeholders
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no placeholders
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order
    pub fn entries(&self) -> &[PlaceholderEntry] {
        &self.entries
    }

    /// Look up an entry by placeholder index
    pub fn get(&self, index: u32) -> Option<&PlaceholderEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Whether an index is assigned
    pub fn contains(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    /// All assigned indices in ascending order
    pub fn indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.entries.iter().map(|e| e.index).collect();
        indices.sort_unstable();
        indices
    }

    /// Add an arbitrary token mapping, deriving the index from the digits
    /// inside the token
    ///
    /// Used by tests and callers holding maps produced elsewhere; tokens
    /// without digits are rejected.
    pub fn add_token(&mut self, token: &str, target: &str) -> bool {
        let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
        let index: u32 = match digits.parse() {
            Ok(i) => i,
            Err(_) => return false,
        };

        self.entries.push(PlaceholderEntry {
            index,
            token: token.to_string(),
            target: target.to_string(),
            alternates: Vec::new(),
            source_text: String::new(),
        });
        true
    }

    fn push(&mut self, entry: PlaceholderEntry) {
        self.entries.push(entry);
    }
}

/// Result of protecting a text
#[derive(Debug, Clone)]
pub struct ProtectOutcome {
    /// Source text with matched spans replaced by placeholder tokens
    pub marked_text: String,
    /// The placeholder assignments made
    pub map: PlaceholderMap,
}

/// Codec that swaps term matches for placeholder tokens
pub struct PlaceholderCodec;

impl PlaceholderCodec {
    /// Render the token for a placeholder index
    pub fn token(index: u32) -> String {
        format!("[T{}]", index)
    }

    /// Replace each match with its placeholder token
    ///
    /// Indices are assigned 1-based in left-to-right match order;
    /// replacement itself runs right-to-left so earlier byte offsets stay
    /// valid while splicing.
    pub fn protect(text: &str, matches: &[TermMatch]) -> ProtectOutcome {
        let mut ordered: Vec<&TermMatch> = matches.iter().collect();
        ordered.sort_by_key(|m| m.start());

        let mut map = PlaceholderMap::new();
        for (i, m) in ordered.iter().enumerate() {
            let index = (i + 1) as u32;
            map.push(PlaceholderEntry {
                index,
                token: Self::token(index),
                target: m.target_term.clone(),
                alternates: m.alternate_targets.clone(),
                source_text: m.source_text.clone(),
            });
        }

        let mut marked = text.to_string();
        for (i, m) in ordered.iter().enumerate().rev() {
            let token = Self::token((i + 1) as u32);
            marked.replace_range(m.start()..m.end(), &token);
        }

        debug!("Protected {} term(s) in text", map.len());

        ProtectOutcome {
            marked_text: marked,
            map,
        }
    }
}
