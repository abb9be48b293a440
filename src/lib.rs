//! GrandPad Archiver - keep a local copy of a GrandPad family feed
//!
//! This library logs in to the GrandPad API with an account's email and
//! password, walks the account feed page by page from the newest post,
//! and stores what it finds.
//!
//! # Features
//!
//! - Password authentication with a single session token
//! - Lazy cursor pagination over the whole feed
//! - JSON dumps of posts (with comments) and users
//! - Download of every photo or video attached to a post or comment
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use grandpad_archiver::{Config, JsonFileSink, SyncOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let sink = JsonFileSink::new(config.records_directory());
//!     let stats = SyncOrchestrator::new(config, sink).run().await?;
//!     println!("{} posts archived", stats.posts);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod fs;
pub mod media;
pub mod output;
pub mod store;
pub mod sync;

// Re-exports for convenience
pub use api::{Credentials, Session, SessionClient};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{FeedPaginator, FeedParams};
pub use media::MediaResolver;
pub use store::{JsonFileSink, RecordSink};
pub use sync::{SyncOrchestrator, SyncStats};
