//! Chip family models and detection

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;

/// Microcontroller family as understood by ESP Web Tools (`chipFamily`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum ChipFamily {
    #[serde(rename = "ESP32")]
    #[value(name = "ESP32")]
    Esp32,
    #[serde(rename = "ESP32-C3")]
    #[value(name = "ESP32-C3", alias = "esp32c3")]
    Esp32C3,
    #[serde(rename = "ESP32-S2")]
    #[value(name = "ESP32-S2", alias = "esp32s2")]
    Esp32S2,
    #[serde(rename = "ESP32-S3")]
    #[value(name = "ESP32-S3", alias = "esp32s3")]
    Esp32S3,
    #[serde(rename = "ESP8266")]
    #[value(name = "ESP8266")]
    Esp8266,
}

impl ChipFamily {
    pub const ALL: [ChipFamily; 5] = [
        ChipFamily::Esp32,
        ChipFamily::Esp32C3,
        ChipFamily::Esp32S2,
        ChipFamily::Esp32S3,
        ChipFamily::Esp8266,
    ];

    /// The ESP Web Tools `chipFamily` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ChipFamily::Esp32 => "ESP32",
            ChipFamily::Esp32C3 => "ESP32-C3",
            ChipFamily::Esp32S2 => "ESP32-S2",
            ChipFamily::Esp32S3 => "ESP32-S3",
            ChipFamily::Esp8266 => "ESP8266",
        }
    }

    /// Case-insensitive lookup accepting both `esp32c3` and `ESP32-C3` spellings
    pub fn normalize(name: &str) -> Option<ChipFamily> {
        match name.trim().to_ascii_lowercase().as_str() {
            "esp32" => Some(ChipFamily::Esp32),
            "esp32c3" | "esp32-c3" => Some(ChipFamily::Esp32C3),
            "esp32s2" | "esp32-s2" => Some(ChipFamily::Esp32S2),
            "esp32s3" | "esp32-s3" => Some(ChipFamily::Esp32S3),
            "esp8266" => Some(ChipFamily::Esp8266),
            _ => None,
        }
    }

    /// Match an `esp32: variant:` value
    fn from_variant(variant: &str) -> Option<ChipFamily> {
        match variant.to_ascii_uppercase().as_str() {
            "ESP32C3" | "ESP32-C3" => Some(ChipFamily::Esp32C3),
            "ESP32S2" | "ESP32-S2" => Some(ChipFamily::Esp32S2),
            "ESP32S3" | "ESP32-S3" => Some(ChipFamily::Esp32S3),
            _ => None,
        }
    }

    /// Guess a variant from a PlatformIO board name
    fn from_board(board: &str) -> Option<ChipFamily> {
        let board = board.to_ascii_lowercase();
        if board.contains("c3") {
            Some(ChipFamily::Esp32C3)
        } else if board.contains("s2") {
            Some(ChipFamily::Esp32S2)
        } else if board.contains("s3") {
            Some(ChipFamily::Esp32S3)
        } else {
            None
        }
    }
}

impl fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChipFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChipFamily::normalize(s).ok_or_else(|| {
            let allowed: Vec<&str> = ChipFamily::ALL.iter().map(|c| c.as_str()).collect();
            format!(
                "unknown chip family '{}' (expected one of: {})",
                s,
                allowed.join(", ")
            )
        })
    }
}

/// Detect the chip family from the platform blocks of an ESPHome config
pub fn detect_chip_family(config: &Mapping) -> Option<ChipFamily> {
    if let Some(esp32) = config.get("esp32") {
        let variant = str_field(esp32, "variant");
        if !variant.is_empty() {
            if let Some(chip) = ChipFamily::from_variant(variant) {
                return Some(chip);
            }
        }

        let board = str_field(esp32, "board");
        return Some(ChipFamily::from_board(board).unwrap_or(ChipFamily::Esp32));
    }

    if config.contains_key("esp8266") {
        return Some(ChipFamily::Esp8266);
    }

    None
}

fn str_field<'a>(block: &'a Value, key: &str) -> &'a str {
    block
        .as_mapping()
        .and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .unwrap_or("")
}
