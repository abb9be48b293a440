//! Feed module: lazy pagination over the account's posts.

pub mod paginator;

pub use paginator::{FeedPaginator, FeedParams, DEFAULT_PAGE_SIZE, FEED_PATH};
