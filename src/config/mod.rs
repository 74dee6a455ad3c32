//! Configuration management for ewt-gen

pub mod app_config;

pub use app_config::*;
