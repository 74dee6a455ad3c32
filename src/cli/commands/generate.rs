//! Site generation command implementation

use crate::compiler::{FirmwareCompiler, find_firmware, firmware_search_locations};
use crate::config::AppConfig;
use crate::models::{ChipFamily, ProjectInfo, detect_chip_family, file_stem};
use crate::site::{GeneratedSite, SiteOptions, create_factory_yaml, generate_site};
use crate::source::{is_remote, resolve_yaml_source, to_esphome_github_url};
use crate::yaml::{Substitutions, load_config_file};
use anyhow::{Context, Result, anyhow};
use std::path::{Component, Path, PathBuf};

/// Options for one site generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Local path or http(s) URL of the ESPHome YAML
    pub yaml_source: String,
    pub skip_compile: bool,
    /// Pre-built firmware; implies no compilation
    pub firmware: Option<PathBuf>,
    pub chip_family: Option<ChipFamily>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub pre_release: bool,
    pub publish_url: Option<String>,
    pub fw_version: Option<String>,
}

pub async fn execute_generate_command(
    options: &GenerateOptions,
    config: &AppConfig,
    compiler: &dyn FirmwareCompiler,
) -> Result<GeneratedSite> {
    let source = resolve_yaml_source(&options.yaml_source, &config.download).await?;
    let yaml_file = source.path().to_path_buf();

    let raw_config = load_config_file(&yaml_file)?;
    let substitutions = Substitutions::from_config(&raw_config);
    log::debug!("Loaded {} substitution(s)", substitutions.len());
    let esphome_config = substitutions.expand_config(&raw_config);

    let project = ProjectInfo::from_config(&esphome_config, &yaml_file);
    let title = project.title(options.title.as_deref());
    let version = project
        .version(options.fw_version.as_deref())
        .filter(|v| !v.is_empty());

    let compile_yaml = match &options.publish_url {
        Some(publish_url) => {
            let package_import_url = package_import_url(&options.yaml_source);

            if version.is_none() {
                log::warn!(
                    "⚠️  No version found. OTA updates will not be included.\n\
                     Specify --fw-version or add esphome.project.version to your YAML."
                );
            }

            let factory = create_factory_yaml(
                &yaml_file,
                publish_url,
                package_import_url.as_deref(),
                version.as_deref(),
            )?;

            if version.is_some() {
                log::info!("Added OTA update support (publish URL: {})", publish_url);
            } else {
                log::info!("Added dashboard import (publish URL: {})", publish_url);
            }
            factory
        }
        None => yaml_file.clone(),
    };

    if !options.skip_compile && options.firmware.is_none() {
        log::info!(
            "🔨 Compiling {} with {}...",
            display_name(&compile_yaml),
            compiler.name()
        );
        compiler.compile(&compile_yaml).await?;
    }

    let firmware = match &options.firmware {
        Some(firmware) => {
            if !firmware.exists() {
                return Err(anyhow!("Firmware not found: {}", firmware.display()));
            }
            firmware.clone()
        }
        None => find_firmware(&yaml_file, &project.name).ok_or_else(|| {
            anyhow!(
                "Could not find firmware binary. Please specify with --firmware option.\n\
                 Looked for: {}",
                firmware_search_locations(&yaml_file, &project.name).join(", ")
            )
        })?,
    };
    let firmware = firmware
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", firmware.display()))?;

    let chip_family = options
        .chip_family
        .or_else(|| detect_chip_family(&esphome_config))
        .ok_or_else(|| {
            anyhow!(
                "Could not detect chip family from YAML. Please specify with --chip-family option."
            )
        })?;

    let output_dir = match &options.output {
        Some(output) => absolute(output)?,
        None => std::env::current_dir()?.join(file_stem(&yaml_file)),
    };

    log::info!("Generating static site for {}", project.name);
    log::info!("  YAML: {}", compile_yaml.display());
    log::info!("  Firmware: {}", firmware.display());
    log::info!("  Chip: {}", chip_family);
    log::info!("  Output: {}", output_dir.display());

    let site = generate_site(&SiteOptions {
        output_dir,
        yaml_file: compile_yaml,
        firmware_file: firmware,
        chip_family,
        title,
        original_yaml_file: options.publish_url.as_ref().map(|_| yaml_file.clone()),
        version,
        esp_web_tools_url: config.site.esp_web_tools_url.clone(),
    })?;

    log::info!("✅ Wrote {} file(s)", site.files.len());

    // Downloaded sources are cleaned up here; everything needed is in the site
    drop(source);

    Ok(site)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `github://` reference for dashboard import; only GitHub sources have one
fn package_import_url(yaml_source: &str) -> Option<String> {
    if is_remote(yaml_source) {
        to_esphome_github_url(yaml_source)
    } else {
        None
    }
}

/// Absolute form of `path` with `.` and `..` folded away
fn absolute(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_path(&path))
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
