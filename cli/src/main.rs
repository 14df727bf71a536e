//! ppml-registry — command-line access to the data and model confirmation registries.

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use commands::{Command, StateFiles};
use config::CliConfig;
use ppml_utils::LogFormat;

#[derive(Parser)]
#[command(name = "ppml-registry", about = "PPML data/model confirmation registry")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "PPML_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the registry snapshots.
    #[arg(long, env = "PPML_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PPML_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "PPML_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    let config = CliConfig {
        state_dir: cli.state_dir.unwrap_or(file_config.state_dir),
        log_level: cli.log_level.unwrap_or(file_config.log_level),
        log_format: cli.log_format.unwrap_or(file_config.log_format),
        ..file_config
    };

    ppml_utils::init_tracing_with(&config.log_level, config.log_format)?;
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let files = StateFiles::from_config(&config);
    let mut deployment = files
        .load(&config)
        .with_context(|| format!("loading registry state from {}", config.state_dir.display()))?;

    let outcome = commands::execute(cli.command, &mut deployment)?;
    if outcome.mutated {
        files
            .save(&deployment)
            .with_context(|| format!("saving registry state to {}", config.state_dir.display()))?;
    }
    if !outcome.text.is_empty() {
        println!("{}", outcome.text);
    }
    Ok(())
}
