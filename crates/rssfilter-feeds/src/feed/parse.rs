//! Standard syndication (atom + rss) parsing.

use super::*;

/// Parse raw feed bytes, trying atom first and then rss.
pub fn parse_feed(body: &[u8]) -> Result<Feed> {
    let mut parse_error = String::new();

    // Try to parse as atom.
    match atom::Feed::read_from(body) {
        Ok(atom_feed) => {
            tracing::trace!("Parsed feed as atom");
            return Ok(from_atom(&atom_feed));
        }
        Err(e) => {
            parse_error.push_str(&format!("\n\tatom: {}", e));
        }
    }

    // Try to parse as rss.
    match rss::Channel::read_from(body) {
        Ok(channel) => {
            tracing::trace!("Parsed feed as rss");
            return Ok(from_rss(&channel));
        }
        Err(e) => {
            parse_error.push_str(&format!("\n\trss: {}", e));
        }
    }

    tracing::debug!("Unable to parse feed:{}", parse_error);
    Err(Error::Parse(parse_error))
}

fn from_atom(atom_feed: &atom::Feed) -> Feed {
    let meta = FeedMeta {
        title: atom_feed.title().value.clone(),
        link: alternate_link(atom_feed.links()).unwrap_or_default(),
        description: atom_feed
            .subtitle()
            .map(|sub| sub.value.clone())
            .unwrap_or_default(),
        language: atom_feed.lang().map(String::from),
        copyright: atom_feed.rights().map(|rights| rights.value.clone()),
        generator: atom_feed.generator().map(|g| g.value().to_string()),
        published: None,
        updated: Some(DateTime::from(atom_feed.updated())),
        format: SyndicationFormat::Atom,
    };
    let entries = atom_feed.entries().iter().map(parse_atom).collect();
    Feed::new(meta, entries)
}

/// First link with an alternate relation, else the first link.
fn alternate_link(links: &[atom::Link]) -> Option<String> {
    links
        .iter()
        .find(|link| link.rel() == "alternate")
        .or(links.first())
        .map(|link| link.href().to_string())
}

/// Parse an atom entry.
fn parse_atom(atom_entry: &atom::Entry) -> Entry {
    let mut parsed = EntryBuilder::new();
    parsed
        .title(atom_entry.title().value.clone())
        .id(atom_entry.id(), false)
        .updated(DateTime::from(atom_entry.updated()))
        .author(
            atom_entry
                .authors()
                .iter()
                .map(|author| author.name())
                .collect::<Vec<_>>()
                .join(", "),
        );
    if let Some(published) = atom_entry.published() {
        parsed.published(DateTime::from(published));
    }
    if let Some(summary) = atom_entry.summary() {
        parsed.summary(summary.value.clone());
    }
    if let Some(content) = atom_entry.content() {
        parsed.content(content.value().unwrap_or(""));
    }

    let links = atom_entry.links();
    let link = alternate_link(links);
    for atom_link in links {
        if Some(atom_link.href()) == link.as_deref() {
            parsed.link(atom_link.href());
        } else if atom_link.rel() == "enclosure" {
            parsed.enclosure(Enclosure {
                url: atom_link.href().into(),
                length: atom_link.length().unwrap_or("0").into(),
                mime_type: atom_link.mime_type().unwrap_or("").into(),
            });
        } else if atom_link.rel() == "replies" {
            parsed.comments(atom_link.href());
        } else {
            parsed.other_link(Link {
                url: atom_link.href().into(),
                rel: atom_link.rel().into(),
                title: atom_link.title().map(String::from),
                mime_type: atom_link.mime_type().map(String::from),
            });
        }
    }

    for category in atom_entry.categories() {
        parsed.category(category.term());
    }

    parsed.into()
}

fn from_rss(channel: &rss::Channel) -> Feed {
    let meta = FeedMeta {
        title: channel.title().into(),
        link: channel.link().into(),
        description: channel.description().into(),
        language: channel.language().map(String::from),
        copyright: channel.copyright().map(String::from),
        generator: channel.generator().map(String::from),
        published: channel
            .pub_date()
            .and_then(|date| DateTime::try_from(date).ok()),
        updated: channel
            .last_build_date()
            .and_then(|date| DateTime::try_from(date).ok()),
        format: SyndicationFormat::Rss,
    };
    let entries = channel.items().iter().map(parse_rss).collect();
    Feed::new(meta, entries)
}

/// Parse an rss item.
fn parse_rss(rss_entry: &rss::Item) -> Entry {
    let mut parsed = EntryBuilder::new();
    parsed
        .title(rss_entry.title().unwrap_or(""))
        .summary(rss_entry.description().unwrap_or(""))
        .content(rss_entry.content().unwrap_or(""))
        .link(rss_entry.link().unwrap_or(""))
        .author(rss_entry.author().unwrap_or(""))
        .comments(rss_entry.comments().unwrap_or(""));

    // Prefer pubDate, then dublin core dates.
    let published = 'date: {
        if let Ok(dt) = DateTime::try_from(rss_entry.pub_date().unwrap_or(""))
        {
            break 'date Some(dt);
        }
        if let Some(dc) = rss_entry.dublin_core_ext() {
            for date in dc.dates() {
                if let Ok(dt) = DateTime::try_from(date.as_str()) {
                    break 'date Some(dt);
                }
            }
        }
        None
    };
    if let Some(published) = published {
        parsed.published(published);
    }

    if let Some(guid) = rss_entry.guid() {
        parsed.id(guid.value(), guid.is_permalink());
    }
    if let Some(enclosure) = rss_entry.enclosure() {
        parsed.enclosure(Enclosure {
            url: enclosure.url().into(),
            length: enclosure.length().into(),
            mime_type: enclosure.mime_type().into(),
        });
    }
    for category in rss_entry.categories() {
        parsed.category(category.name());
    }

    parsed.into()
}
