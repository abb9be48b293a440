//! Store module: persistence of fetched posts and users.

pub mod sink;

pub use sink::{JsonFileSink, RecordSink, POSTS_FILE, USERS_FILE};
