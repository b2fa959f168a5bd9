//! Incremental post-feed loading.
//!
//! [`FeedLoader`] owns the paginated fetch state for one feed view: the
//! accumulated items, the next page to request, and the flags the rendering
//! layer needs (loading, exhausted, error). [`sentinel::TailSentinel`]
//! watches the list tail and tells the view when to ask for more.

pub mod sentinel;

use crate::api::NewsApi;
use crate::app::GazetteError;
use crate::domain::{Page, PostSummary};

pub use sentinel::{SentinelEvent, TailSentinel};

const LOAD_ERROR_FALLBACK: &str = "Failed to load articles";

/// Paginated fetch state for a list of posts.
///
/// Pages are requested strictly in order starting at 1. At most one fetch is
/// in flight at a time: `begin_fetch` refuses to hand out a page number while
/// one is outstanding, and the page counter only advances once a response
/// has been applied. A failed fetch leaves the counter alone so a retry
/// re-requests the same page.
#[derive(Debug)]
pub struct FeedLoader {
    items: Vec<PostSummary>,
    current_page: u32,
    loading: bool,
    has_more: bool,
    error: Option<String>,
}

impl FeedLoader {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            loading: false,
            has_more: true,
            error: None,
        }
    }

    pub fn items(&self) -> &[PostSummary] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The feed is fully loaded and showed at least one item.
    pub fn is_end_of_list(&self) -> bool {
        !self.has_more && !self.items.is_empty()
    }

    /// Nothing to show and nothing happening: the empty state.
    pub fn is_empty_state(&self) -> bool {
        self.items.is_empty() && !self.loading && self.error.is_none()
    }

    /// Start a fetch, returning the page to request.
    ///
    /// Returns `None` while a fetch is outstanding or once the feed is
    /// exhausted; that `None` is the whole reentrancy guard.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.current_page)
    }

    /// Apply a successful response for the page handed out by `begin_fetch`.
    pub fn apply_page(&mut self, page: Page<PostSummary>) {
        self.has_more = page.has_more();
        self.items.extend(page.data);
        self.current_page += 1;
        self.loading = false;
    }

    /// Apply a failed fetch. Items and the page counter stay untouched.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Fetch the next page through `api`, driving the begin/apply cycle.
    ///
    /// Returns whether new items were appended. A guarded call (already
    /// loading, or exhausted) returns `false` without touching the network.
    pub async fn fetch_next(&mut self, api: &dyn NewsApi) -> bool {
        let Some(page) = self.begin_fetch() else {
            return false;
        };

        match api.posts_page(page).await {
            Ok(response) => {
                tracing::debug!(
                    "feed page {} loaded: {} items",
                    response.current_page,
                    response.data.len()
                );
                self.apply_page(response);
                true
            }
            Err(e) => {
                tracing::warn!("feed page {} failed: {}", page, e);
                self.apply_error(load_error_message(&e));
                false
            }
        }
    }

    /// Throw away everything and start over from page 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable message for the error banner: the server's words when it
/// sent any, a generic fallback for transport and malformed-response
/// failures.
pub fn load_error_message(err: &GazetteError) -> String {
    match err {
        GazetteError::Api(message) => message.clone(),
        GazetteError::Validation(message) => message.clone(),
        _ => LOAD_ERROR_FALLBACK.to_string(),
    }
}
