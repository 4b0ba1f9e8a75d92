//! rssfilter configuration.

use super::*;

/// Configuration for rssfilter.
/// This is parsed from the toml configuration file, then overridden by
/// command line flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log file.
    pub log: Option<String>,
    /// The user agent used for HTTP requests.
    /// Without specifying, no user agent is used.
    #[serde(default, alias = "user-agent")]
    pub user_agent: Option<String>,
    /// Request timeout. Without specifying, requests never time out.
    #[serde(default, with = "humantime_serde::option")]
    pub timeout: Option<Duration>,
    /// Output format.
    #[serde(default)]
    pub format: Option<rssfilter::SyndicationFormat>,
    /// Entry filters.
    #[serde(default)]
    pub filters: rssfilter::FilterConfig,
}

impl Config {
    /// Apply command line overrides.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if !cli.title.is_empty() {
            self.filters.title = cli.title.clone();
        }
        if !cli.summary.is_empty() {
            self.filters.summary = cli.summary.clone();
        }
        if !cli.url.is_empty() {
            self.filters.link = cli.url.clone();
        }
        if let Some(operation) = cli.operation {
            self.filters.operation = operation;
        }
        if cli.ignore_case {
            self.filters.case_insensitive = true;
        }
        if let Some(format) = cli.format {
            self.format = Some(format);
        }
        if let Some(user_agent) = &cli.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = cli.timeout {
            self.timeout = Some(timeout);
        }
        self
    }

    /// Create the filtering run described by this configuration.
    pub fn feed_filter(&self) -> rssfilter::FeedFilter {
        rssfilter::FeedFilter::new()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .format(self.format.unwrap_or_default())
    }
}
