//! Filesystem module.
//!
//! Provides:
//! - Directory management
//! - Filename validation

pub mod naming;
pub mod paths;

pub use naming::check_file_name;
pub use paths::{absolute_dir, ensure_dir};
