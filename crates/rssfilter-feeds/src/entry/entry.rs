//! Feed entry.

use super::*;

/// An entry from a feed.
/// Missing text fields are stored as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry title.
    title: String,
    /// Entry summary (rss description, atom summary).
    summary: String,
    /// Entry full content.
    content: String,
    /// Entry link.
    link: String,
    /// Entry author.
    author: String,
    /// The id provided by the source.
    id: Option<EntryId>,
    /// Publication date.
    published: Option<DateTime>,
    /// Last update date.
    updated: Option<DateTime>,
    /// Category names.
    categories: Vec<String>,
    /// Comments link.
    comments: String,
    /// Enclosed media.
    enclosures: Vec<Enclosure>,
    /// Other entry links.
    other_links: Vec<Link>,
}

impl Entry {
    /// Get entry title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get entry summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Get entry content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get entry link.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Get entry author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Get the source id.
    pub fn id(&self) -> Option<&EntryId> {
        self.id.as_ref()
    }

    /// Get the publication date.
    pub fn published(&self) -> Option<&DateTime> {
        self.published.as_ref()
    }

    /// Get the update date.
    pub fn updated(&self) -> Option<&DateTime> {
        self.updated.as_ref()
    }

    /// Get the categories.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Get comments link.
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Get enclosures.
    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }

    /// Get other links.
    pub fn other_links(&self) -> &[Link] {
        &self.other_links
    }

    /// Text of a field, for matching.
    /// Fields the entry lacks come back empty.
    pub fn field(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Title => Cow::Borrowed(&self.title),
            Field::Summary => Cow::Borrowed(&self.summary),
            Field::Content => Cow::Borrowed(&self.content),
            Field::Link => Cow::Borrowed(&self.link),
            Field::Author => Cow::Borrowed(&self.author),
            Field::Id => match &self.id {
                Some(id) => Cow::Borrowed(&id.value),
                None => Cow::Borrowed(""),
            },
            Field::Categories => Cow::Owned(self.categories.join(", ")),
        }
    }
}

/// The id an entry carries upstream (rss guid, atom id).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryId {
    /// The id.
    pub value: String,
    /// Whether the id is also a link to the entry.
    pub permalink: bool,
}

/// Media attached to an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// Where the media lives.
    pub url: String,
    /// Size in bytes, as given by the source.
    pub length: String,
    /// The media's mime-type.
    pub mime_type: String,
}

/// A link to resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The link's url.
    pub url: String,
    /// The link's relation (alternate, related, ...).
    pub rel: String,
    /// The link's title.
    pub title: Option<String>,
    /// The link's mime-type.
    pub mime_type: Option<String>,
}

/// Builder helper for entries.
#[derive(Default)]
pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.entry.title = title.into();
        self
    }

    /// Set the summary.
    pub fn summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.entry.summary = summary.into();
        self
    }

    /// Set the content.
    pub fn content(&mut self, content: impl Into<String>) -> &mut Self {
        self.entry.content = content.into();
        self
    }

    /// Set the link.
    pub fn link(&mut self, url: impl Into<String>) -> &mut Self {
        self.entry.link = url.into();
        self
    }

    /// Set the author.
    pub fn author(&mut self, author: impl Into<String>) -> &mut Self {
        self.entry.author = author.into();
        self
    }

    /// Set the source id.
    pub fn id(&mut self, id: impl Into<String>, permalink: bool) -> &mut Self {
        self.entry.id = Some(EntryId {
            value: id.into(),
            permalink,
        });
        self
    }

    /// Set the publication date.
    pub fn published(&mut self, date: DateTime) -> &mut Self {
        self.entry.published = Some(date);
        self
    }

    /// Set the update date.
    pub fn updated(&mut self, date: DateTime) -> &mut Self {
        self.entry.updated = Some(date);
        self
    }

    /// Add a category.
    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.entry.categories.push(category.into());
        self
    }

    /// Set the comments link.
    pub fn comments(&mut self, url: impl Into<String>) -> &mut Self {
        self.entry.comments = url.into();
        self
    }

    /// Add an enclosure.
    pub fn enclosure(&mut self, enclosure: Enclosure) -> &mut Self {
        self.entry.enclosures.push(enclosure);
        self
    }

    /// Add an additional link.
    pub fn other_link(&mut self, link: Link) -> &mut Self {
        self.entry.other_links.push(link);
        self
    }

    /// Build into an entry.
    pub fn build(&self) -> Entry {
        self.entry.clone()
    }
}

impl From<EntryBuilder> for Entry {
    fn from(value: EntryBuilder) -> Self {
        value.entry
    }
}
