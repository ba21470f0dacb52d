/*!
 * Validation module for translation quality assurance.
 *
 * This module decides whether a recovered translation is acceptable:
 * - Length validation (direction-aware minimum length ratios)
 * - Residual-marker validation (no placeholder debris in final text)
 * - Explanatory-text detection and stripping (unrequested prose)
 * - Service layer composing the checks into a quality report
 *
 * # Architecture
 *
 * - `length`: Validates translation length ratios per direction
 * - `explanatory`: Detects and strips generator meta-commentary
 * - `service`: Orchestrates all checks into a QualityReport
 */

pub mod explanatory;
pub mod length;
pub mod service;

// Re-export main types
pub use service::{QualityReport, QualityValidator, ValidationConfig, ValidationOutcome};
