//! Local naming of referenced media.

use crate::api::MediaReference;
use crate::error::Result;
use crate::fs::check_file_name;

impl MediaReference {
    /// File extension taken from the MIME subtype (`image/jpeg` → `jpeg`).
    pub fn extension(&self) -> &str {
        self.mime_type
            .rsplit('/')
            .next()
            .unwrap_or(&self.mime_type)
    }

    /// Name of the local copy: `{id}.{extension}`.
    pub fn file_name(&self) -> Result<String> {
        let name = format!("{}.{}", self.id, self.extension());
        check_file_name(&name)?;
        Ok(name)
    }

    /// Broad media category, used for reporting only.
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }
}

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image") {
            MediaKind::Image
        } else if mime_type.starts_with("video") {
            MediaKind::Video
        } else if mime_type.starts_with("audio") {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }
}
