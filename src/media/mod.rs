//! Media module: naming and downloading referenced media.

pub mod reference;
pub mod resolver;

pub use reference::MediaKind;
pub use resolver::{MediaResolver, DEFAULT_SIZE, MEDIA_PATH};
