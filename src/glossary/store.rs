/*!
 * Glossary store: file loading and shared read access.
 *
 * The store owns the current glossary behind a copy-on-write swap:
 * readers take an `Arc` snapshot and are never exposed to a partially
 * updated glossary during reload. Reverse views are computed lazily and
 * cached per direction.
 *
 * The on-disk format is a JSON object mapping term keys to entry
 * objects; a legacy shape where the value is a bare string (the target
 * term) is still accepted.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use serde::Deserialize;

use crate::errors::GlossaryError;
use crate::glossary::model::{Glossary, TermEntry};
use crate::language_utils::{Direction, normalize_language};

/// Entry value as it appears in the glossary file
///
/// The current shape is an object; the legacy shape is a bare string
/// holding the target term.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTermValue {
    Full(RawTermEntry),
    Legacy(String),
}

/// Full entry shape in the glossary file
#[derive(Debug, Deserialize)]
struct RawTermEntry {
    /// Source-language term; defaults to the map key when absent
    #[serde(default)]
    source_term: String,
    /// Comma-separated target alternates, first = highest priority
    target_term: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    metadata: Option<RawMetadata>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    source_lang: String,
    #[serde(default)]
    target_lang: String,
}

/// Result of loading a glossary file
///
/// Partial loads are permitted: entries that fail to parse are dropped
/// and reported here so the caller knows how much of the file survived.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The glossary built from the entries that parsed
    pub glossary: Glossary,
    /// Total number of entries in the file
    pub total_entries: usize,
    /// Entries dropped during parsing, with the reason each was dropped
    pub dropped: Vec<(String, String)>,
}

impl LoadOutcome {
    /// Number of entries that loaded successfully
    pub fn loaded_entries(&self) -> usize {
        self.total_entries - self.dropped.len()
    }
}

/// Shared glossary store with copy-on-write reload
pub struct GlossaryStore {
    path: Option<PathBuf>,
    declared_direction: Direction,
    current: RwLock<Arc<Glossary>>,
    // direction -> derived reverse view, computed on first request
    reverse_cache: RwLock<HashMap<Direction, Arc<Glossary>>>,
}

impl GlossaryStore {
    /// Create an empty store for a declared direction
    pub fn empty(direction: Direction) -> Self {
        Self {
            path: None,
            declared_direction: direction,
            current: RwLock::new(Arc::new(Glossary::new(direction))),
            reverse_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store from an in-memory glossary (used by tests and the API layer)
    pub fn from_glossary(glossary: Glossary) -> Self {
        let direction = glossary.direction();
        Self {
            path: None,
            declared_direction: direction,
            current: RwLock::new(Arc::new(glossary)),
            reverse_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load a store from a glossary file
    ///
    /// A missing or unreadable file degrades to an empty glossary with a
    /// warning; a present-but-malformed file is an error. Per-entry
    /// problems never fail the load; they are reported in the outcome.
    pub fn load(
        path: &Path,
        declared_direction: Direction,
    ) -> Result<(Self, LoadOutcome), GlossaryError> {
        let outcome = Self::load_file(path, declared_direction)?;
        let store = Self {
            path: Some(path.to_path_buf()),
            declared_direction,
            current: RwLock::new(Arc::new(outcome.glossary.clone())),
            reverse_cache: RwLock::new(HashMap::new()),
        };
        Ok((store, outcome))
    }

    /// Re-read the backing file and swap the glossary atomically
    ///
    /// In-flight readers keep their old snapshot; new readers see the new
    /// glossary. The reverse-view cache is invalidated on swap.
    pub fn reload(&self) -> Result<LoadOutcome, GlossaryError> {
        let path = self.path.as_ref().ok_or_else(|| {
            GlossaryError::ReadFailed("store has no backing file".to_string())
        })?;

        let outcome = Self::load_file(path, self.declared_direction)?;

        *self.current.write() = Arc::new(outcome.glossary.clone());
        self.reverse_cache.write().clear();

        Ok(outcome)
    }

    /// Snapshot of the current glossary
    pub fn glossary(&self) -> Arc<Glossary> {
        Arc::clone(&self.current.read())
    }

    /// Glossary serving the requested direction, or None if neither the
    /// stored direction nor its reverse matches
    pub fn glossary_for(&self, direction: Direction) -> Option<Arc<Glossary>> {
        let current = self.glossary();

        if current.direction() == direction {
            return Some(current);
        }

        if current.direction().reversed() != direction {
            return None;
        }

        // Serve the reverse view, computing it at most once per swap
        if let Some(cached) = self.reverse_cache.read().get(&direction) {
            return Some(Arc::clone(cached));
        }

        let mut cache = self.reverse_cache.write();
        // Another thread may have filled the cache while we waited
        let view = cache
            .entry(direction)
            .or_insert_with(|| Arc::new(current.reverse_view()));
        Some(Arc::clone(view))
    }

    /// Look up a term entry for a direction, case-insensitively
    pub fn lookup(&self, term: &str, direction: Direction) -> Option<TermEntry> {
        self.glossary_for(direction)
            .and_then(|g| g.get(term).cloned())
    }

    /// Parse a glossary file into a load outcome
    fn load_file(
        path: &Path,
        declared_direction: Direction,
    ) -> Result<LoadOutcome, GlossaryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Glossary file {} unreadable ({}), continuing with empty glossary",
                    path.display(),
                    e
                );
                return Ok(LoadOutcome {
                    glossary: Glossary::new(declared_direction),
                    total_entries: 0,
                    dropped: Vec::new(),
                });
            }
        };

        Self::parse(&content, declared_direction)
    }

    /// Parse glossary JSON text
    ///
    /// File order is preserved (serde_json's preserve_order map), so entry
    /// order in the file is the priority order used for tie-breaking.
    pub fn parse(
        content: &str,
        declared_direction: Direction,
    ) -> Result<LoadOutcome, GlossaryError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| GlossaryError::InvalidFormat(e.to_string()))?;

        let mut glossary = Glossary::new(declared_direction);
        let mut dropped = Vec::new();
        let total_entries = raw.len();

        for (key, value) in raw {
            match serde_json::from_value::<RawTermValue>(value) {
                Ok(raw_value) => {
                    if let Err(reason) =
                        Self::add_raw_entry(&mut glossary, &key, raw_value, declared_direction)
                    {
                        dropped.push((key, reason));
                    }
                }
                Err(e) => {
                    dropped.push((key, format!("unparseable value: {}", e)));
                }
            }
        }

        if !dropped.is_empty() {
            warn!(
                "Glossary loaded with {}/{} entries dropped",
                dropped.len(),
                total_entries
            );
            for (key, reason) in &dropped {
                debug!("Dropped glossary entry '{}': {}", key, reason);
            }
        }

        Ok(LoadOutcome {
            glossary,
            total_entries,
            dropped,
        })
    }

    /// Convert a raw file entry into a TermEntry and add it
    fn add_raw_entry(
        glossary: &mut Glossary,
        key: &str,
        raw: RawTermValue,
        declared_direction: Direction,
    ) -> Result<(), String> {
        let (target_term, definition, metadata) = match raw {
            RawTermValue::Full(entry) => {
                // source_term, when present, must agree with the map key
                if !entry.source_term.is_empty() && entry.source_term != key {
                    return Err(format!(
                        "source_term '{}' does not match key",
                        entry.source_term
                    ));
                }
                (entry.target_term, entry.definition, entry.metadata)
            }
            RawTermValue::Legacy(target) => (target, String::new(), None),
        };

        // Entries declaring a different direction than the glossary are
        // dropped rather than silently remapped
        if let Some(meta) = metadata {
            if !meta.source_lang.is_empty() && !meta.target_lang.is_empty() {
                let entry_direction = normalize_language(&meta.source_lang)
                    .and_then(|s| normalize_language(&meta.target_lang).map(|t| Direction::new(s, t)))
                    .map_err(|e| e.to_string())?;
                if entry_direction != declared_direction {
                    return Err(format!(
                        "entry direction {} conflicts with glossary direction {}",
                        entry_direction, declared_direction
                    ));
                }
            }
        }

        let targets: Vec<String> = target_term
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if targets.is_empty() {
            return Err("no target terms".to_string());
        }

        let entry = TermEntry {
            key: key.to_string(),
            targets,
            definition,
        };

        if !glossary.add(entry) {
            return Err("duplicate or invalid key".to_string());
        }

        Ok(())
    }
}

impl std::fmt::Debug for GlossaryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlossaryStore")
            .field("path", &self.path)
            .field("direction", &self.declared_direction)
            .field("entries", &self.glossary().len())
            .finish()
    }
}
