//! YAML source resolution (local files and URLs)

pub mod resolver;
pub mod url_rewrite;

pub use resolver::{ResolvedSource, is_remote, resolve_yaml_source};
pub use url_rewrite::{to_esphome_github_url, to_raw_url};
