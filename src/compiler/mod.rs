//! External firmware compilation
//!
//! Compilation is delegated to ESPHome; this module only picks the command,
//! runs it, and locates the resulting binary.

pub mod esphome;
pub mod firmware;

pub use esphome::{CompileCommand, EsphomeCompiler, ToolAvailability};
pub use firmware::{find_firmware, firmware_search_locations};

use crate::errors::Result;
use async_trait::async_trait;
use std::path::Path;

/// Something that turns an ESPHome YAML into a firmware build
#[async_trait]
pub trait FirmwareCompiler: Send + Sync {
    /// Human-readable compiler name for logs
    fn name(&self) -> &str;

    /// Compile the configuration; the build output lands next to the YAML
    async fn compile(&self, yaml_path: &Path) -> Result<()>;
}
