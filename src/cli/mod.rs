//! Command Line Interface module

pub mod args;
pub mod commands;

pub use args::*;

use crate::compiler::EsphomeCompiler;
use crate::config::AppConfig;
use crate::utils::logging::init_cli_logging;
use anyhow::{Context, Result};

/// Main CLI application runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_cli_logging(cli.verbose, cli.quiet)?;

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let compiler = EsphomeCompiler::new(config.compiler.clone(), cli.pre_release);

    let site =
        commands::generate::execute_generate_command(&cli.generate_options(), &config, &compiler)
            .await?;

    println!("\nStatic site generated at: {}", site.output_dir.display());
    println!("Serve with any static file server (must be HTTPS for ESP Web Tools)");
    Ok(())
}
