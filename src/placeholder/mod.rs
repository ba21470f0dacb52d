/*!
 * Placeholder protection for glossary terms.
 *
 * Matched terms are swapped for short synthetic tokens before text
 * generation and restored afterwards:
 *
 * - `codec`: substitutes matches with `[T<n>]` tokens and builds the
 *   per-request placeholder map
 * - `recovery`: staged restoration of tokens from generator output,
 *   tolerant of the generator corrupting or dropping them
 * - `residue`: the shared corruption-variant and residue-shape patterns
 */

pub mod codec;
pub mod recovery;
pub mod residue;

// Re-export main types
pub use codec::{PlaceholderCodec, PlaceholderEntry, PlaceholderMap, ProtectOutcome};
pub use recovery::{PlaceholderRecoverer, RecoveryOutcome, RecoveryStage, ResidueRecord};
