//! Full archive run: authenticate, walk the feed, dump records, fetch media.

use std::path::Path;

use indicatif::ProgressBar;

use crate::api::{MediaReference, Post, SessionClient, User};
use crate::config::Config;
use crate::error::Result;
use crate::feed::{FeedPaginator, FeedParams};
use crate::fs::ensure_dir;
use crate::media::MediaResolver;
use crate::output::create_item_bar;
use crate::store::RecordSink;
use crate::sync::state::SyncStats;

/// Drives one complete archive run.
///
/// The run is all-or-nothing from the caller's point of view: the first
/// failing request or write aborts it, leaving whatever was already written
/// on disk.
pub struct SyncOrchestrator<S: RecordSink> {
    config: Config,
    sink: S,
}

impl<S: RecordSink> SyncOrchestrator<S> {
    pub fn new(config: Config, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Authenticate with the configured credentials and archive the feed.
    pub async fn run(&self) -> Result<SyncStats> {
        ensure_dir(&self.config.output.media_folder).await?;

        let client =
            SessionClient::authenticate(&self.config.api.url, self.config.credentials()).await?;

        self.run_with(&client).await
    }

    /// Archive the feed through an already authenticated client.
    pub async fn run_with(&self, client: &SessionClient) -> Result<SyncStats> {
        let mut stats = SyncStats::default();

        let mut paginator =
            FeedPaginator::new(client, FeedParams::with_limit(self.config.api.page_size));
        let posts = paginator.collect_all().await?;
        let users: Vec<User> = paginator.users().map(<[User]>::to_vec).unwrap_or_default();

        stats.pages = paginator.pages_fetched();
        stats.posts = posts.len() as u64;
        stats.comments = posts.iter().map(|p| p.comments.len() as u64).sum();
        stats.users = users.len() as u64;

        self.sink.persist_posts(&posts).await?;
        self.sink.persist_users(&users).await?;

        self.persist_all_media(client, &posts, &mut stats).await?;

        tracing::info!(
            "Archived {} posts, {} users, {} media files",
            stats.posts,
            stats.users,
            stats.media_written()
        );

        Ok(stats)
    }

    /// Post media first, then each comment's media in server order.
    async fn persist_all_media(
        &self,
        client: &SessionClient,
        posts: &[Post],
        stats: &mut SyncStats,
    ) -> Result<()> {
        let folder = self.config.output.media_folder.as_path();
        let resolver = MediaResolver::new(client).with_progress(self.config.output.show_progress);

        let bar = if self.config.output.show_progress {
            create_item_bar(count_media(posts), "Media")
        } else {
            ProgressBar::hidden()
        };

        for post in posts {
            tracing::debug!("Post {}: {} comments", post.id, post.comments.len());

            persist_one(&resolver, post.media.as_ref(), folder, stats, &bar).await?;
            for comment in &post.comments {
                persist_one(&resolver, comment.media.as_ref(), folder, stats, &bar).await?;
            }
        }

        bar.finish_and_clear();
        Ok(())
    }
}

async fn persist_one(
    resolver: &MediaResolver<'_>,
    media: Option<&MediaReference>,
    folder: &Path,
    stats: &mut SyncStats,
    bar: &ProgressBar,
) -> Result<()> {
    match media {
        Some(reference) => {
            if let Some(path) = resolver.persist(Some(reference), folder).await? {
                tracing::info!("Downloaded: {}", path.display());
                stats.record_media(reference.kind());
            }
            bar.inc(1);
        }
        None => stats.record_absent(),
    }
    Ok(())
}

/// Number of posts and comments carrying media.
fn count_media(posts: &[Post]) -> u64 {
    posts
        .iter()
        .map(|post| {
            post.media.iter().count() as u64
                + post.comments.iter().filter(|c| c.media.is_some()).count() as u64
        })
        .sum()
}
