/*!
 * Error types for the termbridge application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when loading or querying a glossary
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// Error reading the glossary file from disk
    #[error("Failed to read glossary file: {0}")]
    ReadFailed(String),

    /// The glossary file is not valid JSON
    #[error("Glossary file is not valid JSON: {0}")]
    InvalidFormat(String),

    /// A single entry could not be parsed
    #[error("Invalid glossary entry '{key}': {reason}")]
    InvalidEntry {
        /// The offending glossary key
        key: String,
        /// Why the entry was rejected
        reason: String,
    },
}

/// Errors that can occur at the text-generation boundary
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Error when the generation request fails
    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    /// The generator did not respond within its deadline
    #[error("Generation timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout in seconds
        timeout_secs: u64,
    },

    /// The generator returned an unusable response
    #[error("Generator returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the generation boundary
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Quality validation failed after exhausting retries
    #[error("Validation failed after {attempts} attempt(s): {issues:?}")]
    ValidationExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The issues that remained after the last attempt
        issues: Vec<String>,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from glossary handling
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from the generation boundary
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
