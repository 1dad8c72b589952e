//! javalift command-line entry point
//!
//! Validates, modernizes and measures single Java source files. Results are
//! printed to stdout as JSON in the same shapes the pipeline returns; logs
//! go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use javalift_analysis::{Enhancer, EnhancerConfig};
use javalift_utils::logging::{init_logging, LogLevel, LoggerConfig};
use javalift_utils::{read_source_bytes, truncate_at_marker, ConfigBuilder};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "javalift")]
#[command(about = "javalift - metrics, warnings and modernization rewrites for Java sources")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a file is a syntactically valid Java source
    Validate {
        /// Java source file
        file: PathBuf,
    },

    /// Compute metrics and warnings and rewrite the file
    Enhance {
        /// Java source file
        file: PathBuf,

        /// Write the enhanced code to this file
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print metrics of the unmodified file
    Metrics {
        /// Java source file
        file: PathBuf,
    },
}

fn load_config(path: Option<&Path>, log_level: Option<LogLevel>) -> Result<EnhancerConfig> {
    let mut builder = ConfigBuilder::<EnhancerConfig>::new();
    if let Some(path) = path {
        builder = builder
            .load_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    }
    Ok(builder
        .with(|config| {
            if let Some(level) = log_level {
                config.log_level = level;
            }
        })
        .build())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    read_source_bytes(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.log_level)?;
    init_logging(&LoggerConfig {
        level: config.log_level,
        ..LoggerConfig::default()
    })?;

    let enhancer = Enhancer::new(config);

    match cli.command {
        Commands::Validate { file } => {
            let bytes = read_input(&file)?;
            let file_name = file.file_name().and_then(|name| name.to_str());
            let result = enhancer.validate_file(file_name, &bytes);
            print_json(&result)?;
            if !result.valid {
                std::process::exit(1);
            }
        }

        Commands::Enhance { file, output } => {
            let bytes = read_input(&file)?;
            let result = enhancer.enhance_file(&bytes);
            print_json(&result)?;

            let Some(enhanced) = result.enhanced_code.as_deref() else {
                std::process::exit(1);
            };
            if let Some(output_path) = output {
                std::fs::write(&output_path, enhanced)
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                tracing::info!("Enhanced code saved to: {}", output_path.display());
            }
        }

        Commands::Metrics { file } => {
            let bytes = read_input(&file)?;
            let code = String::from_utf8(bytes)
                .with_context(|| format!("{} is not valid UTF-8", file.display()))?;
            let metrics = enhancer.metrics(&code).map_err(|e| {
                anyhow::anyhow!(truncate_at_marker(
                    &e.to_string(),
                    &enhancer.config().diagnostic_marker
                ))
            })?;
            print_json(&metrics)?;
        }
    }

    Ok(())
}
