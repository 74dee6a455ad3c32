//! ESP Web Tools manifest models

use super::chip::ChipFamily;
use serde::{Deserialize, Serialize};

/// File name of the firmware image inside the generated site
pub const FIRMWARE_FILE_NAME: &str = "firmware.bin";

/// File name of the manifest inside the generated site
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Domain announced to Home Assistant for versioned firmware
pub const HOME_ASSISTANT_DOMAIN: &str = "esphome";

/// Install manifest consumed by `<esp-web-install-button>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub builds: Vec<ManifestBuild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_assistant_domain: Option<String>,
}

/// One build per chip family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestBuild {
    #[serde(rename = "chipFamily")]
    pub chip_family: ChipFamily,
    pub parts: Vec<ManifestPart>,
}

/// A binary written at a flash offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPart {
    pub path: String,
    pub offset: u32,
}

impl Manifest {
    /// Single-image manifest; the version also advertises the Home Assistant domain
    pub fn new(name: &str, chip_family: ChipFamily, version: Option<&str>) -> Self {
        let version = version.filter(|v| !v.is_empty());

        Self {
            name: name.to_string(),
            builds: vec![ManifestBuild {
                chip_family,
                parts: vec![ManifestPart {
                    path: FIRMWARE_FILE_NAME.to_string(),
                    offset: 0,
                }],
            }],
            version: version.map(str::to_string),
            home_assistant_domain: version.map(|_| HOME_ASSISTANT_DOMAIN.to_string()),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
