//! Record dumps.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use crate::api::{Post, User};
use crate::error::Result;

/// File name of the posts dump.
pub const POSTS_FILE: &str = "posts.json";

/// File name of the users dump.
pub const USERS_FILE: &str = "users.json";

/// Destination for the records fetched during a sync.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn persist_posts(&self, posts: &[Post]) -> Result<()>;

    async fn persist_users(&self, users: &[User]) -> Result<()>;
}

/// Writes each record set as a pretty-printed JSON array in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn write<T: Serialize + Sync>(&self, file_name: &str, records: &[T]) -> Result<()> {
        let path = self.directory.join(file_name);
        let content = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&path, content).await?;
        tracing::info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl RecordSink for JsonFileSink {
    async fn persist_posts(&self, posts: &[Post]) -> Result<()> {
        self.write(POSTS_FILE, posts).await
    }

    async fn persist_users(&self, users: &[User]) -> Result<()> {
        self.write(USERS_FILE, users).await
    }
}
