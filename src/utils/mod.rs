//! Utility functions and helpers used throughout ewt-gen

pub mod logging;
