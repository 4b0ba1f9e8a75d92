//! Errors.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop a feed from being filtered.
/// None of these are recovered internally; they surface to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A filter pattern is not a valid regex.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        #[source]
        reason: regex::Error,
    },

    #[error("unknown entry field `{0}`")]
    UnknownField(String),

    #[error("unknown operation `{0}`, expected AND or OR")]
    UnknownOperation(String),

    /// More patterns were configured than can be combined.
    #[error(
        "too many filters given ({0}), at most two may be combined; \
        use regex alternation to reuse a filter"
    )]
    TooManyFilters(usize),

    /// The feed could not be read from its source.
    #[error("unable to fetch `{location}`: {reason}")]
    Fetch { location: String, reason: String },

    /// The fetched bytes are neither atom nor rss.
    #[error("unable to parse feed as atom or rss:{0}")]
    Parse(String),

    /// The filtered feed could not be written.
    #[error("unable to build feed: {0}")]
    Build(String),
}

impl Error {
    pub(crate) fn fetch(
        location: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Error::Fetch {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
