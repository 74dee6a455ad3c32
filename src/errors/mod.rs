//! Error types for ewt-gen

pub mod types;

pub use types::*;
