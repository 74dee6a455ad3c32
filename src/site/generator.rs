//! Static site generator

use super::html::escape;
use super::template::{TemplateContext, index_template, render_template};
use crate::errors::{EwtError, Result};
use crate::models::{ChipFamily, FIRMWARE_FILE_NAME, MANIFEST_FILE_NAME, Manifest};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_FILE_NAME: &str = "index.html";

/// Inputs for one generated site
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub output_dir: PathBuf,
    /// YAML copied into the site (the factory YAML when publishing)
    pub yaml_file: PathBuf,
    pub firmware_file: PathBuf,
    pub chip_family: ChipFamily,
    pub title: String,
    /// The user's YAML when `yaml_file` is a factory YAML that includes it
    pub original_yaml_file: Option<PathBuf>,
    pub version: Option<String>,
    pub esp_web_tools_url: String,
}

/// Files written into the output directory
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Write firmware, YAML, `manifest.json` and `index.html` into the output directory
pub fn generate_site(options: &SiteOptions) -> Result<GeneratedSite> {
    let output_dir = &options.output_dir;
    fs::create_dir_all(output_dir).map_err(|e| {
        EwtError::Site(format!("Failed to create {}: {}", output_dir.display(), e))
    })?;

    let mut files = Vec::new();

    let yaml_name = file_name(&options.yaml_file)?;
    files.push(copy_into(&options.yaml_file, &output_dir.join(&yaml_name))?);
    files.push(copy_into(
        &options.firmware_file,
        &output_dir.join(FIRMWARE_FILE_NAME),
    )?);

    let original_name = match &options.original_yaml_file {
        Some(original) => {
            let name = file_name(original)?;
            files.push(copy_into(original, &output_dir.join(&name))?);
            Some(name)
        }
        None => None,
    };

    let manifest = Manifest::new(
        &options.title,
        options.chip_family,
        options.version.as_deref(),
    );
    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    fs::write(&manifest_path, manifest.to_json_pretty()?)?;
    files.push(manifest_path);

    let displayed_yaml = options
        .original_yaml_file
        .as_deref()
        .unwrap_or(options.yaml_file.as_path());
    let yaml_content = fs::read_to_string(displayed_yaml).map_err(|e| {
        EwtError::Site(format!("Failed to read {}: {}", displayed_yaml.display(), e))
    })?;

    let mut context = TemplateContext::new();
    context.insert("title", escape(&options.title));
    context.insert("yaml_filename", escape(&yaml_name));
    context.insert("chip_family", options.chip_family.to_string());
    context.insert("build_date", Utc::now().format("%Y-%m-%d").to_string());
    context.insert(
        "esphome_config_html",
        esphome_config_html(&yaml_name, original_name.as_deref()),
    );
    context.insert("yaml_content", escape(&yaml_content));
    context.insert("esp_web_tools_url", escape(&options.esp_web_tools_url));

    let index_path = output_dir.join(INDEX_FILE_NAME);
    fs::write(&index_path, render_template(index_template()?, &context))?;
    files.push(index_path);

    for file in &files {
        log::debug!("   📦 {}", file.display());
    }

    Ok(GeneratedSite {
        output_dir: output_dir.clone(),
        files,
    })
}

/// Download links for the configuration section of the page
pub fn esphome_config_html(yaml_name: &str, original_name: Option<&str>) -> String {
    const ESPHOME_LINK: &str = r#"<a href="https://esphome.io" target="_blank">ESPHome</a>"#;

    match original_name {
        Some(original) => format!(
            r#"Download <a href="{}" download>original configuration</a> and the <a href="{}" download>OTA/import extension</a> to customize it with {}."#,
            escape(original),
            escape(yaml_name),
            ESPHOME_LINK
        ),
        None => format!(
            r#"Download the <a href="{}" download>YAML configuration</a> to customize it with {}."#,
            escape(yaml_name),
            ESPHOME_LINK
        ),
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| EwtError::Site(format!("Not a file: {}", path.display())))
}

/// Copy `src` to `dest`, leaving a file alone when it already is the destination
fn copy_into(src: &Path, dest: &Path) -> Result<PathBuf> {
    if let (Ok(a), Ok(b)) = (src.canonicalize(), dest.canonicalize()) {
        if a == b {
            log::debug!("{} is already in place", dest.display());
            return Ok(dest.to_path_buf());
        }
    }

    fs::copy(src, dest).map_err(|e| {
        EwtError::Site(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dest.display(),
            e
        ))
    })?;
    Ok(dest.to_path_buf())
}
