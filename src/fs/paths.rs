//! Output directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !tokio::fs::try_exists(path).await? {
        tracing::debug!("Creating directory {}", path.display());
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Resolve a possibly relative directory against the working directory.
pub fn absolute_dir(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}
