//! Media resolution and download.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::{MediaReference, Params, SessionClient};
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Media redirect endpoint, relative to the API base URL.
pub const MEDIA_PATH: &str = "media/download_redirect";

/// Size variant requested when downloading media.
pub const DEFAULT_SIZE: &str = "default";

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Fetches media content through the authenticated session and stores it.
pub struct MediaResolver<'a> {
    client: &'a SessionClient,
    show_progress: bool,
}

impl<'a> MediaResolver<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        Self {
            client,
            show_progress: false,
        }
    }

    /// Show a byte progress bar for large downloads.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Ask the API for the content behind `media_key`.
    ///
    /// The endpoint answers with a redirect, which the HTTP client follows, so
    /// the returned response body is the media itself. Every call downloads
    /// again; nothing is cached.
    pub async fn resolve(&self, media_key: &str, size: &str) -> Result<Response> {
        let mut params = Params::new();
        params.insert("media_key".to_string(), media_key.to_string());
        params.insert("size".to_string(), size.to_string());

        let response = self.client.call(MEDIA_PATH, params).await?;

        if !response.status().is_success() {
            return Err(Error::MediaFetch(format!(
                "HTTP {} for media key {}",
                response.status(),
                media_key
            )));
        }

        Ok(response)
    }

    /// Download `media` into `target_folder` as `{id}.{extension}`.
    ///
    /// Absent media is not an error: nothing is requested and `None` is
    /// returned. An existing file with the same name is overwritten in place.
    pub async fn persist(
        &self,
        media: Option<&MediaReference>,
        target_folder: &Path,
    ) -> Result<Option<PathBuf>> {
        let Some(media) = media else {
            return Ok(None);
        };

        let output_path = target_folder.join(media.file_name()?);
        let response = self.resolve(&media.media_key, DEFAULT_SIZE).await?;
        let written = self.write_body(response, &output_path).await?;

        tracing::debug!("Wrote {} ({} bytes)", output_path.display(), written);

        Ok(Some(output_path))
    }

    /// Stream a response body to disk, returning the number of bytes written.
    async fn write_body(&self, response: Response, output_path: &Path) -> Result<u64> {
        let content_length = response.content_length();
        let progress = if self.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
        {
            Some(create_download_bar(content_length.unwrap_or(0)))
        } else {
            None
        };

        let mut file = File::create(output_path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::MediaFetch(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(downloaded)
    }
}
