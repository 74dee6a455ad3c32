//! Custom error types for ewt-gen

use std::fmt;

/// Main error type for ewt-gen operations
#[derive(Debug)]
pub enum EwtError {
    /// Configuration file errors
    Config(String),
    /// YAML source resolution errors
    Source(String),
    /// Remote YAML download errors
    Download(String),
    /// ESPHome YAML parsing errors
    Yaml(String),
    /// External compiler errors
    Compile(String),
    /// Firmware discovery errors
    Firmware(String),
    /// Static site generation errors
    Site(String),
    /// General I/O errors
    Io(std::io::Error),
    /// Serialization errors
    Serialization(String),
}

impl fmt::Display for EwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EwtError::Config(msg) => write!(f, "Configuration error: {}", msg),
            EwtError::Source(msg) => write!(f, "{}", msg),
            EwtError::Download(msg) => write!(f, "Download error: {}", msg),
            EwtError::Yaml(msg) => write!(f, "YAML error: {}", msg),
            EwtError::Compile(msg) => write!(f, "{}", msg),
            EwtError::Firmware(msg) => write!(f, "{}", msg),
            EwtError::Site(msg) => write!(f, "Site generation error: {}", msg),
            EwtError::Io(err) => write!(f, "I/O error: {}", err),
            EwtError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for EwtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EwtError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EwtError {
    fn from(err: std::io::Error) -> Self {
        EwtError::Io(err)
    }
}

impl From<serde_json::Error> for EwtError {
    fn from(err: serde_json::Error) -> Self {
        EwtError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for EwtError {
    fn from(err: serde_yaml::Error) -> Self {
        EwtError::Yaml(err.to_string())
    }
}

impl From<toml::de::Error> for EwtError {
    fn from(err: toml::de::Error) -> Self {
        EwtError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for EwtError {
    fn from(err: reqwest::Error) -> Self {
        EwtError::Download(err.to_string())
    }
}

/// Result type alias for ewt-gen operations
pub type Result<T> = std::result::Result<T, EwtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_has_source() {
        let err: EwtError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_source_errors_display_message_verbatim() {
        let err = EwtError::Source("File not found: device.yaml".to_string());
        assert_eq!(err.to_string(), "File not found: device.yaml");
    }
}
