/*!
 * Glossary handling for terminology-constrained translation.
 *
 * This module is split into two submodules:
 * - `model`: The immutable glossary value object (entries, reverse views)
 * - `store`: File loading, partial-load reporting and copy-on-write reload
 */

pub mod model;
pub mod store;

// Re-export main types
pub use model::{Glossary, TermEntry};
pub use store::{GlossaryStore, LoadOutcome};
