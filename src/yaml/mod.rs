//! ESPHome YAML handling
//!
//! ESPHome configurations use custom tags (`!secret`, `!lambda`, `!include`, ...)
//! that a plain YAML loader rejects or would need to evaluate. The loader here
//! keeps the tagged content and drops the tag, which is all the site generator
//! needs to read names, versions and platform blocks.

pub mod loader;
pub mod substitutions;

pub use loader::{load_config_file, load_config_str, lookup, scalar_to_string};
pub use substitutions::Substitutions;

pub use serde_yaml::{Mapping, Value};
