use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pipeline::PipelineConfig;
use crate::validation::ValidationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language identifier (alias or `auto`)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language identifier (alias or `auto`)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Glossary config
    #[serde(default)]
    pub glossary: GlossaryConfig,

    /// Pipeline config
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Glossary file settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlossaryConfig {
    /// Path to the glossary JSON file
    #[serde(default = "default_glossary_path")]
    pub path: String,

    /// Declared source language of the stored glossary
    #[serde(default = "default_glossary_source")]
    pub source_lang: String,

    /// Declared target language of the stored glossary
    #[serde(default = "default_glossary_target")]
    pub target_lang: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            path: default_glossary_path(),
            source_lang: default_glossary_source(),
            target_lang: default_glossary_target(),
        }
    }
}

/// Pipeline behavior settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineSettings {
    /// Retries after a failed validation
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Whether to protect glossary terms
    #[serde(default = "default_true")]
    pub use_termbase: bool,

    /// Minimum source length (chars) before ratio checks apply
    #[serde(default = "default_min_source_chars")]
    pub min_source_chars_for_ratio: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            use_termbase: default_true(),
            min_source_chars_for_ratio: default_min_source_chars(),
        }
    }
}

impl PipelineSettings {
    /// Build the pipeline configuration these settings describe
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let validation = ValidationConfig {
            min_source_chars_for_ratio: self.min_source_chars_for_ratio,
            ..ValidationConfig::default()
        };
        PipelineConfig::default()
            .with_max_retries(self.max_retries)
            .with_termbase(self.use_termbase)
            .with_validation(validation)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "auto".to_string()
}

fn default_glossary_path() -> String {
    "glossary.json".to_string()
}

fn default_glossary_source() -> String {
    "zh".to_string()
}

fn default_glossary_target() -> String {
    "en".to_string()
}

fn default_max_retries() -> u32 {
    1
}

fn default_min_source_chars() -> usize {
    20
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file, creating defaults when the
    /// file does not exist
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // `auto` is resolved per request; anything else must normalize
        if !self.source_language.eq_ignore_ascii_case("auto") {
            crate::language_utils::normalize_language(&self.source_language)?;
        }
        if !self.target_language.eq_ignore_ascii_case("auto") {
            crate::language_utils::normalize_language(&self.target_language)?;
        }

        crate::language_utils::normalize_language(&self.glossary.source_lang)?;
        crate::language_utils::normalize_language(&self.glossary.target_lang)?;

        if self.glossary.path.trim().is_empty() {
            return Err(anyhow!("Glossary path must not be empty"));
        }

        Ok(())
    }

    /// The declared glossary direction
    pub fn glossary_direction(&self) -> Result<crate::language_utils::Direction> {
        let source = crate::language_utils::normalize_language(&self.glossary.source_lang)?;
        let target = crate::language_utils::normalize_language(&self.glossary.target_lang)?;
        Ok(crate::language_utils::Direction::new(source, target))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            glossary: GlossaryConfig::default(),
            pipeline: PipelineSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}
