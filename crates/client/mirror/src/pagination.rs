use std::sync::Arc;

use mk_mirror::{MirrorError, PageOptions, Paged};
use reqwest::header::HeaderMap;

use crate::config::ClientConfig;
use crate::retry::{NotFound, PreparedRequest};
use crate::MirrorNodeClient;

/// Follows `links.next` cursors one page at a time, against a single configuration snapshot.
pub struct Paginator<'a> {
    client: &'a MirrorNodeClient,
    config: Arc<ClientConfig>,
    headers: HeaderMap,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a MirrorNodeClient, config: Arc<ClientConfig>) -> Self {
        Self { client, config, headers: HeaderMap::new() }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Collects the items of every page starting at `first_url`, which may be relative to the origin.
    ///
    /// Stops when a page has no cursor, when `options.limit` items were collected (the result is
    /// truncated to exactly that many) or after `options.max_pages` pages.
    pub async fn collect<P: Paged>(&self, first_url: &str, options: PageOptions) -> Result<Vec<P::Item>, MirrorError> {
        if options.limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        let mut url = self.config.resolve_cursor(first_url);
        let mut pages = 0usize;

        loop {
            let mut request = PreparedRequest::get(url.clone());
            request.headers = self.headers.clone();
            let page: P = self
                .client
                .execute(&self.config, request, NotFound::Retry)
                .await?
                .ok_or_else(|| crate::retry::unreachable_absent(&url))?;
            pages += 1;

            let (page_items, next) = page.into_parts();
            tracing::debug!(url = %url, page = pages, items = page_items.len(), "Fetched page");
            items.extend(page_items);

            if let Some(limit) = options.limit {
                if items.len() >= limit {
                    items.truncate(limit);
                    break;
                }
            }

            let Some(next) = next else {
                break;
            };

            if options.max_pages.is_some_and(|max_pages| pages >= max_pages) {
                tracing::debug!(pages, next = %next, "Page bound reached, not following cursor");
                break;
            }

            url = self.config.resolve_cursor(&next);
        }

        Ok(items)
    }
}
