//! Cursor-paginated walk over the account feed.

use std::collections::VecDeque;

use futures::Stream;

use crate::api::{Cursor, FeedPage, Paging, Params, Post, SessionClient, User};
use crate::error::{Error, Result};

/// Feed endpoint, relative to the API base URL.
pub const FEED_PATH: &str = "feed/recent";

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Longest response excerpt quoted in error messages.
const EXCERPT_LEN: usize = 500;

/// Parameters of the first page request.
#[derive(Debug, Clone, Default)]
pub struct FeedParams {
    pub limit: Option<u32>,
    pub before: Option<Cursor>,
}

impl FeedParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            before: None,
        }
    }
}

/// Where the walk stands between pages.
#[derive(Debug, Clone, PartialEq)]
enum Position {
    /// Next request goes out with this `before` value (none for the newest page).
    Pending(Option<Cursor>),
    Done,
}

/// Lazy, newest-first sequence of posts.
///
/// Pages are requested one at a time, only once every post of the previous
/// page has been handed out. The walk cannot be restarted; build a new
/// paginator to start again from the most recent post.
pub struct FeedPaginator<'a> {
    client: &'a SessionClient,
    limit: u32,
    position: Position,
    buffer: VecDeque<Post>,
    users: Option<Vec<User>>,
    pages_fetched: u64,
}

impl<'a> FeedPaginator<'a> {
    pub fn new(client: &'a SessionClient, params: FeedParams) -> Self {
        Self {
            client,
            limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            position: Position::Pending(params.before),
            buffer: VecDeque::new(),
            users: None,
            pages_fetched: 0,
        }
    }

    /// Users listed on the first page, once it has been fetched.
    pub fn users(&self) -> Option<&[User]> {
        self.users.as_deref()
    }

    /// Number of page requests that returned a usable page.
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Next post of the feed, fetching another page when the current one is
    /// exhausted. Returns `None` once the cursor stops advancing.
    pub async fn next_post(&mut self) -> Result<Option<Post>> {
        loop {
            if let Some(post) = self.buffer.pop_front() {
                return Ok(Some(post));
            }

            let before = match &self.position {
                Position::Done => return Ok(None),
                Position::Pending(before) => before.clone(),
            };

            // A failed page ends the walk; nothing is retried.
            let page = match self.fetch_page(before.as_ref()).await {
                Ok(page) => page,
                Err(e) => {
                    self.position = Position::Done;
                    return Err(e);
                }
            };

            self.pages_fetched += 1;
            self.position = next_position(&page.paging);

            tracing::debug!(
                "Feed page {}: {} posts, next: {:?}",
                self.pages_fetched,
                page.posts.len(),
                self.position
            );

            if self.users.is_none() {
                self.users = Some(page.users);
            }
            self.buffer.extend(page.posts);
        }
    }

    /// Drain the whole feed into memory.
    pub async fn collect_all(&mut self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        while let Some(post) = self.next_post().await? {
            posts.push(post);
        }
        tracing::info!(
            "Fetched {} posts in {} pages",
            posts.len(),
            self.pages_fetched
        );
        Ok(posts)
    }

    /// Consume the paginator as a stream of posts.
    pub fn into_stream(self) -> impl Stream<Item = Result<Post>> + 'a {
        futures::stream::try_unfold(self, |mut paginator| async move {
            let post = paginator.next_post().await?;
            Ok::<_, Error>(post.map(|post| (post, paginator)))
        })
    }

    async fn fetch_page(&self, before: Option<&Cursor>) -> Result<FeedPage> {
        let response = self
            .client
            .call(FEED_PATH, page_params(self.limit, before))
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == 401 || status == 403 {
            return Err(Error::Authentication(format!(
                "HTTP {} from feed: {}",
                status,
                excerpt(&text)
            )));
        }

        if !status.is_success() {
            return Err(Error::Protocol(format!(
                "HTTP {} from feed: {}",
                status,
                excerpt(&text)
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::Protocol(format!(
                "Failed to parse feed page: {} - Response: {}",
                e,
                excerpt(&text)
            ))
        })
    }
}

fn page_params(limit: u32, before: Option<&Cursor>) -> Params {
    let mut params = Params::new();
    params.insert("limit".to_string(), limit.to_string());
    if let Some(before) = before {
        params.insert("before".to_string(), before.as_param());
    }
    params
}

/// The walk ends when the next cursor repeats this page's cursor. A missing
/// next cursor ends it too, since requesting without `before` would start
/// over from the newest post.
fn next_position(paging: &Paging) -> Position {
    match &paging.next.before {
        Some(next) if paging.current.before.as_ref() != Some(next) => {
            Position::Pending(Some(next.clone()))
        }
        _ => Position::Done,
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}
