//! Firmware binary discovery

use crate::models::file_stem;
use std::path::{Path, PathBuf};

fn yaml_dir(yaml_path: &Path) -> &Path {
    yaml_path.parent().unwrap_or_else(|| Path::new("."))
}

fn pioenvs_dir(yaml_path: &Path, project_name: &str) -> PathBuf {
    yaml_dir(yaml_path)
        .join(".esphome")
        .join("build")
        .join(project_name)
        .join(".pioenvs")
}

/// Find a firmware image for the YAML: `<stem>.bin` next to it, then the
/// ESPHome build output `.esphome/build/<name>/.pioenvs/*/firmware.bin`.
pub fn find_firmware(yaml_path: &Path, project_name: &str) -> Option<PathBuf> {
    let sibling = yaml_dir(yaml_path).join(format!("{}.bin", file_stem(yaml_path)));
    if sibling.is_file() {
        return Some(sibling);
    }

    let pioenvs = pioenvs_dir(yaml_path, project_name);
    if !pioenvs.is_dir() {
        return None;
    }

    let pattern = format!(
        "{}/*/firmware.bin",
        glob::Pattern::escape(&pioenvs.to_string_lossy())
    );
    glob::glob(&pattern)
        .ok()?
        .flatten()
        .find(|path| path.is_file())
}

/// Locations checked by [`find_firmware`], for error messages
pub fn firmware_search_locations(yaml_path: &Path, project_name: &str) -> Vec<String> {
    vec![
        format!("{}.bin", file_stem(yaml_path)),
        format!(".esphome/build/{}/.pioenvs/*/firmware.bin", project_name),
    ]
}
