//! Command line argument parsing

use crate::cli::commands::generate::GenerateOptions;
use crate::models::ChipFamily;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, long_about = None)]
#[command(name = "ewt-gen")]
#[command(
    about = "Generate a static ESP Web Tools website for firmware distribution from an ESPHome configuration"
)]
pub struct Cli {
    /// ESPHome configuration file path or URL
    #[arg(value_name = "YAML_SOURCE")]
    pub yaml_source: String,

    /// Skip ESPHome compilation (use existing firmware)
    #[arg(long)]
    pub skip_compile: bool,

    /// Path to firmware binary. If not specified, uses ESPHome build output
    #[arg(short, long, value_name = "PATH")]
    pub firmware: Option<PathBuf>,

    /// Chip family. Auto-detected from YAML if not specified
    #[arg(short, long, value_enum, ignore_case = true)]
    pub chip_family: Option<ChipFamily>,

    /// Output directory. Defaults to YAML filename without extension
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Page title. Defaults to name from YAML file
    #[arg(short, long)]
    pub title: Option<String>,

    /// Use pre-release ESPHome version (uvx only, forces refresh)
    #[arg(long)]
    pub pre_release: bool,

    /// URL where the firmware will be published. Adds OTA updates and dashboard import
    #[arg(long, value_name = "URL")]
    pub publish_url: Option<String>,

    /// Firmware version. Read from esphome.project.version if not specified
    #[arg(long = "fw-version", value_name = "VERSION")]
    pub fw_version: Option<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            yaml_source: self.yaml_source.clone(),
            skip_compile: self.skip_compile,
            firmware: self.firmware.clone(),
            chip_family: self.chip_family,
            output: self.output.clone(),
            title: self.title.clone(),
            pre_release: self.pre_release,
            publish_url: self.publish_url.clone(),
            fw_version: self.fw_version.clone(),
        }
    }
}
