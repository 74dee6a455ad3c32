//! Factory YAML with OTA update support for published firmware

use crate::errors::{EwtError, Result};
use crate::models::{MANIFEST_FILE_NAME, file_stem};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Write `<stem>.factory.yaml` next to `yaml_path`. It pulls the original
/// config in as a package, adds `http_request` OTA and update components when
/// a version is known, and `dashboard_import` when an import URL is known.
pub fn create_factory_yaml(
    yaml_path: &Path,
    publish_url: &str,
    package_import_url: Option<&str>,
    version: Option<&str>,
) -> Result<PathBuf> {
    let original = yaml_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| EwtError::Site(format!("Not a file: {}", yaml_path.display())))?;

    let content = factory_yaml_content(&original, publish_url, package_import_url, version);

    let factory_path = yaml_path.with_file_name(format!("{}.factory.yaml", file_stem(yaml_path)));
    std::fs::write(&factory_path, content)?;
    log::debug!("Wrote factory configuration {}", factory_path.display());

    Ok(factory_path)
}

/// Factory YAML text
pub fn factory_yaml_content(
    original_file_name: &str,
    publish_url: &str,
    package_import_url: Option<&str>,
    version: Option<&str>,
) -> String {
    let mut content = format!(
        "# Factory firmware - generated by ewt-gen\n\
         # Users should import {original} directly, not this file.\n\
         \n\
         packages:\n  original: !include {original}\n",
        original = original_file_name
    );

    if let Some(version) = version.filter(|v| !v.is_empty()) {
        let manifest_url = format!("{}/{}", publish_url.trim_end_matches('/'), MANIFEST_FILE_NAME);
        let _ = write!(
            content,
            "\n\
             esphome:\n  project:\n    version: \"{version}\"\n\
             \n\
             ota:\n  - platform: http_request\n    id: ota_http_request\n\
             \n\
             update:\n  - platform: http_request\n    id: update_http_request\n    name: Firmware\n    source: {manifest_url}\n\
             \n\
             http_request:\n",
        );
    }

    if let Some(import_url) = package_import_url {
        let _ = write!(
            content,
            "\ndashboard_import:\n  package_import_url: {}\n",
            import_url
        );
    }

    content
}
