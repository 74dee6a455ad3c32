//! ESPHome project metadata

use crate::yaml::{lookup, scalar_to_string};
use serde_yaml::Mapping;
use std::path::Path;

/// Project metadata read from an (expanded) ESPHome config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// `esphome.name`, or the YAML file stem
    pub name: String,
    /// `esphome.friendly_name`
    pub friendly_name: Option<String>,
    /// `esphome.project.version`
    pub version: Option<String>,
}

impl ProjectInfo {
    pub fn from_config(config: &Mapping, yaml_path: &Path) -> Self {
        let text = |path: &[&str]| {
            lookup(config, path)
                .and_then(scalar_to_string)
                .filter(|s| !s.is_empty())
        };

        let name = text(&["esphome", "name"]).unwrap_or_else(|| file_stem(yaml_path));

        Self {
            name,
            friendly_name: text(&["esphome", "friendly_name"]),
            version: text(&["esphome", "project", "version"]),
        }
    }

    /// Page title: explicit override, friendly name, then project name
    pub fn title(&self, explicit: Option<&str>) -> String {
        explicit
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| self.friendly_name.clone())
            .unwrap_or_else(|| self.name.clone())
    }

    /// Firmware version: explicit override, then the config's project version
    pub fn version(&self, explicit: Option<&str>) -> Option<String> {
        match explicit {
            Some(v) => Some(v.to_string()),
            None => self.version.clone(),
        }
    }
}

/// File name without its final extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::{Substitutions, load_config_str};

    fn info(yaml: &str) -> ProjectInfo {
        let config = load_config_str(yaml).unwrap();
        let expanded = Substitutions::from_config(&config).expand_config(&config);
        ProjectInfo::from_config(&expanded, Path::new("/configs/garage-door.yaml"))
    }

    #[test]
    fn test_reads_expanded_metadata() {
        let info = info(
            r#"
substitutions:
  device: garage
esphome:
  name: ${device}-door
  friendly_name: Garage Door
  project:
    name: acme.garage
    version: "2024.6.1"
"#,
        );

        assert_eq!(info.name, "garage-door");
        assert_eq!(info.friendly_name.as_deref(), Some("Garage Door"));
        assert_eq!(info.version.as_deref(), Some("2024.6.1"));
    }

    #[test]
    fn test_falls_back_to_file_stem() {
        let info = info("esp8266:\n  board: d1_mini\n");
        assert_eq!(info.name, "garage-door");
        assert_eq!(info.friendly_name, None);
        assert_eq!(info.version, None);
        assert_eq!(info.title(None), "garage-door");
    }

    #[test]
    fn test_numeric_version_is_text() {
        let info = info("esphome:\n  name: x\n  project:\n    version: 3\n");
        assert_eq!(info.version.as_deref(), Some("3"));
    }

    #[test]
    fn test_title_and_version_overrides() {
        let info = info("esphome:\n  name: x\n  friendly_name: X Device\n");
        assert_eq!(info.title(None), "X Device");
        assert_eq!(info.title(Some("Custom")), "Custom");
        assert_eq!(info.version(Some("9.9")), Some("9.9".to_string()));
        assert_eq!(info.version(None), None);
    }
}
