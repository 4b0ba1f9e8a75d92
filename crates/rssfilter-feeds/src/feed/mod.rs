//! Feeds.

use super::*;

mod parse;
mod source;
mod syndicate;

pub use parse::*;
pub use source::*;
pub use syndicate::*;

/// Channel-level information about a feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMeta {
    /// Feed title.
    pub title: String,
    /// Link to the site the feed belongs to.
    pub link: String,
    /// Feed description (atom subtitle).
    pub description: String,
    /// Feed language.
    pub language: Option<String>,
    /// Copyright notice (atom rights).
    pub copyright: Option<String>,
    /// The generator named by the source.
    pub generator: Option<String>,
    /// When the source says the feed was published (rss only).
    pub published: Option<DateTime>,
    /// When the source says the feed last changed.
    pub updated: Option<DateTime>,
    /// The format the feed was parsed from.
    pub format: SyndicationFormat,
}

/// A parsed feed: its metadata and entries, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    meta: FeedMeta,
    entries: Vec<Entry>,
}

impl Feed {
    /// Create a feed.
    pub fn new(meta: FeedMeta, entries: Vec<Entry>) -> Self {
        Self { meta, entries }
    }

    /// Get feed metadata.
    pub fn meta(&self) -> &FeedMeta {
        &self.meta
    }

    /// Get feed entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Copy of this feed, keeping only the entries the predicate allows.
    /// Entry order is preserved and nothing in `self` changes.
    pub fn filtered(&self, predicate: &dyn Predicate) -> Feed {
        let entries: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| predicate.evaluate(entry))
            .cloned()
            .collect();
        tracing::debug!(
            "Kept {} of {} entries from `{}`",
            entries.len(),
            self.entries.len(),
            self.meta.title
        );
        Feed {
            meta: self.meta.clone(),
            entries,
        }
    }
}
