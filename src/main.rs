// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ApiService, MatchRequest, TranslateRequest};
use crate::app_config::Config;
use crate::generator::MockGenerator;
use crate::glossary::GlossaryStore;

mod api;
mod app_config;
mod errors;
mod generator;
mod glossary;
mod language_utils;
mod matcher;
mod pipeline;
mod placeholder;
mod validation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a text for glossary terms and print the matches
    MatchTerms(TextArgs),

    /// Run a text through the full pipeline with a pass-through generator
    ///
    /// No generation engine is wired in this binary; the dry run uses an
    /// echo generator, which exercises matching, protection, recovery and
    /// validation end to end.
    DryRun(TextArgs),

    /// Generate shell completions for termbridge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// Text to process
    #[arg(value_name = "TEXT")]
    text: String,

    /// Source language identifier (alias or 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language identifier (alias or 'auto')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Glossary file path (overrides config)
    #[arg(short, long)]
    glossary: Option<PathBuf>,

    /// Disable term protection
    #[arg(long)]
    no_termbase: bool,
}

/// termbridge - terminology-constrained translation pipeline
#[derive(Parser, Debug)]
#[command(name = "termbridge")]
#[command(version = "1.0.0")]
#[command(about = "Glossary-protected translation pipeline")]
#[command(long_about = "termbridge protects glossary terms through machine translation:
it finds glossary matches in the source text, replaces them with placeholder
tokens, recovers the tokens from the generator's output even when corrupted,
and validates the result.

EXAMPLES:
    termbridge match-terms \"Neck, Crown, and Body are steps.\" -s en -t zh
    termbridge dry-run \"先引晶再放肩\" -s auto -t auto
    termbridge completions bash > termbridge.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. Missing files fall back to defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => writeln!(stderr, "\x1B[1;31m[error] {}\x1B[0m", record.args()),
                Level::Warn => writeln!(stderr, "\x1B[1;33m[warn] {}\x1B[0m", record.args()),
                Level::Info => writeln!(stderr, "{}", record.args()),
                Level::Debug => writeln!(stderr, "\x1B[0;36m[debug] {}\x1B[0m", record.args()),
                Level::Trace => writeln!(stderr, "\x1B[0;90m[trace] {}\x1B[0m", record.args()),
            };
        }
    }

    fn flush(&self) {}
}

fn level_filter(config: &Config, cli_override: Option<CliLogLevel>) -> LevelFilter {
    if let Some(level) = cli_override {
        return level.into();
    }
    match config.log_level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Build the glossary store from config and CLI overrides
fn build_store(config: &Config, glossary_override: Option<&PathBuf>) -> Result<Arc<GlossaryStore>> {
    let direction = config.glossary_direction()?;
    let path = glossary_override
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&config.glossary.path));

    let (store, outcome) = GlossaryStore::load(&path, direction)
        .with_context(|| format!("Loading glossary from {}", path.display()))?;

    info!(
        "Glossary: {} entries loaded from {}",
        outcome.loaded_entries(),
        path.display()
    );
    if !outcome.dropped.is_empty() {
        warn!("Glossary: {} entries dropped during load", outcome.dropped.len());
    }

    Ok(Arc::new(store))
}

fn resolve_languages(config: &Config, args: &TextArgs) -> (String, String) {
    let source = args
        .source_language
        .clone()
        .unwrap_or_else(|| config.source_language.clone());
    let target = args
        .target_language
        .clone()
        .unwrap_or_else(|| config.target_language.clone());
    (source, target)
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let config = Config::from_file(&options.config_path)?;
    CustomLogger::init(level_filter(&config, options.log_level))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    match options.command {
        Commands::MatchTerms(args) => {
            let store = build_store(&config, args.glossary.as_ref())?;
            let service = ApiService::new(store, Arc::new(MockGenerator::echo()));
            let (source_lang, target_lang) = resolve_languages(&config, &args);

            let response = service.match_terms(&MatchRequest {
                text: args.text,
                source_lang,
                target_lang,
            });

            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::DryRun(args) => {
            let store = build_store(&config, args.glossary.as_ref())?;
            let service = ApiService::with_config(
                store,
                Arc::new(MockGenerator::echo()),
                config.pipeline.to_pipeline_config(),
            );
            let (source_lang, target_lang) = resolve_languages(&config, &args);

            let response = service
                .translate(&TranslateRequest {
                    text: args.text,
                    source_lang,
                    target_lang,
                    use_termbase: !args.no_termbase,
                })
                .await;

            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }

    Ok(())
}
