//! Data models and types used throughout ewt-gen

pub mod chip;
pub mod manifest;
pub mod project;

pub use chip::*;
pub use manifest::*;
pub use project::*;
