//! Sync statistics.

use crate::media::MediaKind;

/// Counters collected over one sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    pub pages: u64,
    pub posts: u64,
    pub comments: u64,
    pub users: u64,

    // Media
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
    pub other_count: u64,
    pub media_absent: u64,
}

impl SyncStats {
    /// Count one written media file.
    pub fn record_media(&mut self, kind: MediaKind) {
        match kind {
            MediaKind::Image => self.pic_count += 1,
            MediaKind::Video => self.vid_count += 1,
            MediaKind::Audio => self.audio_count += 1,
            MediaKind::Other => self.other_count += 1,
        }
    }

    /// Count a post or comment without attached media.
    pub fn record_absent(&mut self) {
        self.media_absent += 1;
    }

    /// Get total downloaded count.
    pub fn media_written(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count + self.other_count
    }
}
