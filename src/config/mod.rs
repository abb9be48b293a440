//! Configuration module for the grandpad-archiver.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AccountConfig, ApiConfig, Config, OutputConfig};
pub use validation::validate_config;
