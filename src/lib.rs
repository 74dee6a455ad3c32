//! ewt-gen - ESP Web Tools site generator for ESPHome
//!
//! Turns an ESPHome configuration (local file or URL) into a static website
//! that installs the firmware from the browser with ESP Web Tools: a
//! `firmware.bin`, a `manifest.json` and an `index.html`.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod models;
pub mod site;
pub mod source;
pub mod utils;
pub mod yaml;

// Re-export commonly used types
pub use errors::*;
pub use models::*;

/// ewt-gen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ewt-gen application name
pub const APP_NAME: &str = "ewt-gen";
