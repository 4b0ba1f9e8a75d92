//! Fetch, filter, and re-syndicate a feed.

use super::*;

/// Fetch the feed at `source`, keep the entries `predicate` allows, and
/// write the result as rss.
pub async fn filter_feed(
    source: impl Into<Source>,
    predicate: &dyn Predicate,
) -> Result<String> {
    FeedFilter::new().run(source, predicate).await
}

/// A configurable filtering run.
#[derive(Clone, Debug, Default)]
pub struct FeedFilter {
    /// How remote feeds are fetched.
    pub fetch_options: FetchOptions,
    /// What the output looks like.
    pub format: SyndicationFormat,
}

impl FeedFilter {
    /// Create a filter run with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent used for remote feeds.
    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.fetch_options.user_agent = user_agent;
        self
    }

    /// Set the request timeout used for remote feeds.
    pub fn timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.fetch_options.timeout = timeout;
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: SyndicationFormat) -> Self {
        self.format = format;
        self
    }

    /// Fetch and parse the feed without filtering it.
    pub async fn fetch(&self, source: impl Into<Source>) -> Result<Feed> {
        let source = source.into();
        tracing::debug!("Fetching {}", source);
        let body = source.fetch(&self.fetch_options).await?;
        parse_feed(&body)
    }

    /// Run the whole pipeline. Either the complete document or an error
    /// comes back.
    pub async fn run(
        &self,
        source: impl Into<Source>,
        predicate: &dyn Predicate,
    ) -> Result<String> {
        let feed = self.fetch(source).await?;
        let filtered = feed.filtered(predicate);
        filtered.syndicate(self.format)
    }
}
