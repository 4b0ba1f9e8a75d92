//! Writing feeds back out as rss or atom.

use super::*;

const INDENT: usize = 2;
const UNKNOWN_TITLE: &str = "Unknown title";

/// Output document format.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SyndicationFormat {
    /// RSS 2.0.
    #[default]
    Rss,
    /// Atom 1.0.
    Atom,
}

impl std::fmt::Display for SyndicationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyndicationFormat::Rss => f.write_str("rss"),
            SyndicationFormat::Atom => f.write_str("atom"),
        }
    }
}

impl std::str::FromStr for SyndicationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rss" => Ok(SyndicationFormat::Rss),
            "atom" => Ok(SyndicationFormat::Atom),
            other => Err(format!("unknown format `{other}`, use rss or atom")),
        }
    }
}

impl Feed {
    /// Serialize the feed as a pretty-printed document.
    /// The output only depends on the feed, so equal feeds give equal text.
    pub fn syndicate(&self, format: SyndicationFormat) -> Result<String> {
        let bytes = match format {
            SyndicationFormat::Rss => self
                .to_rss()
                .pretty_write_to(Vec::new(), b' ', INDENT)
                .map_err(|e| Error::Build(e.to_string()))?,
            SyndicationFormat::Atom => self
                .to_atom()
                .write_with_config(
                    Vec::new(),
                    atom::WriteConfig {
                        write_document_declaration: true,
                        indent_size: Some(INDENT),
                    },
                )
                .map_err(|e| Error::Build(e.to_string()))?,
        };
        String::from_utf8(bytes).map_err(|e| Error::Build(e.to_string()))
    }

    /// Channel description, falling back to the title and then the link,
    /// since rss channels can't go without one.
    fn description(&self) -> &str {
        let meta = self.meta();
        [&meta.description, &meta.title, &meta.link]
            .into_iter()
            .find(|text| !text.trim().is_empty())
            .map(|text| text.as_str())
            .unwrap_or(UNKNOWN_TITLE)
    }

    /// Convert into an rss channel.
    pub fn to_rss(&self) -> rss::Channel {
        let meta = self.meta();
        let mut channel = rss::ChannelBuilder::default();
        channel
            .title(meta.title.clone())
            .link(meta.link.clone())
            .description(self.description().to_string())
            .language(meta.language.clone())
            .copyright(meta.copyright.clone())
            .generator(meta.generator.clone())
            .pub_date(meta.published.as_ref().and_then(rss_date))
            .last_build_date(meta.updated.as_ref().and_then(rss_date))
            .items(self.entries().iter().map(to_rss_item).collect::<Vec<_>>());
        channel.build()
    }

    /// Convert into an atom feed.
    pub fn to_atom(&self) -> atom::Feed {
        let meta = self.meta();
        let updated = meta
            .updated
            .clone()
            .or_else(|| meta.published.clone())
            .or_else(|| self.entries().iter().filter_map(latest_date).max())
            .unwrap_or_else(DateTime::epoch);

        let mut syn = atom::FeedBuilder::default();
        syn.title(meta.title.as_str())
            .id(match meta.link.is_empty() {
                true => meta.title.clone(),
                false => meta.link.clone(),
            })
            .updated(atom::FixedDateTime::from(&updated))
            .subtitle(match meta.description.is_empty() {
                true => None,
                false => Some(atom::Text::plain(meta.description.clone())),
            })
            .lang(meta.language.clone())
            .rights(meta.copyright.clone().map(atom::Text::plain));
        if !meta.link.is_empty() {
            syn.link(
                atom::LinkBuilder::default()
                    .href(meta.link.clone())
                    .rel("alternate")
                    .build(),
            );
        }
        if let Some(generator) = &meta.generator {
            syn.generator(Some(
                atom::GeneratorBuilder::default()
                    .value(generator.clone())
                    .build(),
            ));
        }
        for entry in self.entries() {
            syn.entry(to_atom_entry(entry, &updated));
        }
        syn.build()
    }
}

/// Rss date text. Dates rss can't express are left out.
fn rss_date(date: &DateTime) -> Option<String> {
    let formatted = date.to_rfc2822();
    if formatted.is_none() {
        tracing::warn!("Dropping date {} that rss can't represent", date);
    }
    formatted
}

fn latest_date(entry: &Entry) -> Option<DateTime> {
    entry.updated().or(entry.published()).cloned()
}

fn to_rss_item(entry: &Entry) -> rss::Item {
    let mut item = rss::ItemBuilder::default();
    item.title(non_empty(entry.title()))
        .link(non_empty(entry.link()))
        .description(match entry.summary().is_empty() {
            true => non_empty(entry.content()),
            false => Some(entry.summary().to_string()),
        })
        .content(non_empty(entry.content()))
        .author(non_empty(entry.author()))
        .comments(non_empty(entry.comments()))
        .pub_date(entry.published().and_then(rss_date))
        .guid(entry.id().map(|id| {
            rss::GuidBuilder::default()
                .value(id.value.clone())
                .permalink(id.permalink)
                .build()
        }))
        .enclosure(entry.enclosures().first().map(|enclosure| {
            rss::EnclosureBuilder::default()
                .url(enclosure.url.clone())
                .length(enclosure.length.clone())
                .mime_type(enclosure.mime_type.clone())
                .build()
        }))
        .categories(
            entry
                .categories()
                .iter()
                .map(|name| {
                    rss::CategoryBuilder::default().name(name.clone()).build()
                })
                .collect::<Vec<_>>(),
        );
    item.build()
}

fn to_atom_entry(entry: &Entry, feed_updated: &DateTime) -> atom::Entry {
    let updated = latest_date(entry).unwrap_or_else(|| feed_updated.clone());
    let id = match entry.id() {
        Some(id) => id.value.clone(),
        None if !entry.link().is_empty() => entry.link().to_string(),
        None => entry.title().to_string(),
    };

    let mut syn = atom::EntryBuilder::default();
    syn.title(entry.title())
        .id(id)
        .updated(atom::FixedDateTime::from(&updated))
        .published(entry.published().map(atom::FixedDateTime::from))
        .summary(non_empty(entry.summary()).map(atom::Text::html))
        .content(non_empty(entry.content()).map(|content| {
            atom::ContentBuilder::default()
                .value(Some(content))
                .content_type(Some("html".to_string()))
                .build()
        }));
    if !entry.author().is_empty() {
        syn.author(
            atom::PersonBuilder::default()
                .name(entry.author().to_string())
                .build(),
        );
    }
    if !entry.link().is_empty() {
        syn.link(
            atom::LinkBuilder::default()
                .href(entry.link().to_string())
                .rel("alternate")
                .build(),
        );
    }
    if !entry.comments().is_empty() {
        syn.link(
            atom::LinkBuilder::default()
                .href(entry.comments().to_string())
                .rel("replies")
                .build(),
        );
    }
    for enclosure in entry.enclosures() {
        syn.link(
            atom::LinkBuilder::default()
                .href(enclosure.url.clone())
                .rel("enclosure")
                .mime_type(non_empty(&enclosure.mime_type))
                .length(non_empty(&enclosure.length))
                .build(),
        );
    }
    for link in entry.other_links() {
        syn.link(
            atom::LinkBuilder::default()
                .href(link.url.clone())
                .rel(link.rel.clone())
                .title(link.title.clone())
                .mime_type(link.mime_type.clone())
                .build(),
        );
    }
    for category in entry.categories() {
        syn.category(
            atom::CategoryBuilder::default()
                .term(category.clone())
                .build(),
        );
    }
    syn.build()
}

fn non_empty(text: &str) -> Option<String> {
    match text.is_empty() {
        true => None,
        false => Some(text.to_string()),
    }
}
