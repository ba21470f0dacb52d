/*!
 * Glossary value objects.
 *
 * A `Glossary` is an ordered, immutable set of term entries for one
 * translation direction. It is built once (by the store or by hand in
 * tests), then shared read-only between in-flight translations. The
 * reverse direction is served by a derived glossary in which every
 * target alias becomes a lookup key.
 */

use std::collections::HashMap;

use crate::language_utils::Direction;

/// A single glossary entry
///
/// `targets` is never empty; its order is the priority order, so
/// `targets[0]` is the canonical substitution for the key.
#[derive(Debug, Clone, PartialEq)]
pub struct TermEntry {
    /// Canonical term in the glossary's source language
    pub key: String,
    /// Equivalent terms in the target language, highest priority first
    pub targets: Vec<String>,
    /// Free-text definition, may be empty
    pub definition: String,
}

impl TermEntry {
    /// Create an entry with a single target term
    pub fn new(key: &str, target: &str) -> Self {
        Self {
            key: key.to_string(),
            targets: vec![target.to_string()],
            definition: String::new(),
        }
    }

    /// Create an entry with multiple target aliases, highest priority first
    pub fn with_aliases(key: &str, targets: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            definition: String::new(),
        }
    }

    /// Attach a definition
    pub fn with_definition(mut self, definition: &str) -> Self {
        self.definition = definition.to_string();
        self
    }

    /// The highest-priority target term
    pub fn priority_target(&self) -> &str {
        // Invariant: targets is non-empty (enforced on insert)
        self.targets.first().map(String::as_str).unwrap_or("")
    }

    /// Target aliases other than the priority one
    pub fn alternate_targets(&self) -> &[String] {
        if self.targets.len() > 1 {
            &self.targets[1..]
        } else {
            &[]
        }
    }
}

/// An ordered glossary for one translation direction
///
/// Entry insertion order is preserved: it is the tie-breaker for
/// same-length matches and the priority rule for reverse-alias
/// collisions.
#[derive(Debug, Clone)]
pub struct Glossary {
    direction: Direction,
    entries: Vec<TermEntry>,
    // lowercased key -> index into entries
    index: HashMap<String, usize>,
}

impl Glossary {
    /// Create an empty glossary for a direction
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The direction this glossary serves
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    /// Add an entry, rejecting empty targets and duplicate keys
    ///
    /// Returns false (and leaves the glossary unchanged) when the entry
    /// violates an invariant; the caller decides whether that is worth
    /// reporting.
    pub fn add(&mut self, entry: TermEntry) -> bool {
        if entry.key.trim().is_empty() {
            return false;
        }
        if entry.targets.is_empty() || entry.targets.iter().any(|t| t.trim().is_empty()) {
            return false;
        }

        let lookup_key = entry.key.to_lowercase();
        if self.index.contains_key(&lookup_key) {
            return false;
        }

        self.index.insert(lookup_key, self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Look up an entry by key, case-insensitively
    pub fn get(&self, key: &str) -> Option<&TermEntry> {
        self.index
            .get(&key.to_lowercase())
            .and_then(|&i| self.entries.get(i))
    }

    /// Whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_lowercase())
    }

    /// Derive the glossary for the opposite direction
    ///
    /// Every target alias becomes a lookup key whose single target is the
    /// original key, so any alias is found when scanning text in the
    /// reverse direction and always restores to the canonical source term.
    /// When two entries share an alias, the first-inserted entry wins.
    pub fn reverse_view(&self) -> Glossary {
        let mut reversed = Glossary::new(self.direction.reversed());

        for entry in &self.entries {
            for alias in &entry.targets {
                // add() skips aliases already claimed by an earlier entry
                reversed.add(
                    TermEntry::new(alias, &entry.key).with_definition(&entry.definition),
                );
            }
        }

        reversed
    }
}
