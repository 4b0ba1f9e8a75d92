use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCIENCE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Daily Wire</title>
    <link>https://news.example.com/</link>
    <description>All the news</description>
    <language>en-us</language>
    <item>
      <title>Science: new discovery</title>
      <link>https://news.example.com/1</link>
      <description>A comet was found.</description>
      <guid isPermaLink="false">news-1</guid>
      <pubDate>Mon, 02 Jun 2025 08:00:00 GMT</pubDate>
      <category>science</category>
    </item>
    <item>
      <title>Sports: big win</title>
      <link>https://news.example.com/2</link>
      <description>The home team won.</description>
      <guid isPermaLink="false">news-2</guid>
      <pubDate>Mon, 02 Jun 2025 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Science: another find</title>
      <link>https://news.example.com/3</link>
      <guid isPermaLink="false">news-3</guid>
      <pubDate>Mon, 02 Jun 2025 10:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>
"#;

const SCIENCE_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Lab Notes</title>
  <subtitle>Notes from the lab</subtitle>
  <link href="https://lab.example.com/" rel="alternate"/>
  <id>urn:lab-notes</id>
  <updated>2025-06-02T12:00:00Z</updated>
  <entry>
    <title>Gay rights march downtown</title>
    <id>urn:lab-notes:1</id>
    <updated>2025-06-01T12:00:00Z</updated>
    <link href="https://lab.example.com/1" rel="alternate"/>
    <summary>Thousands attended.</summary>
  </entry>
  <entry>
    <title>Microscope calibration</title>
    <id>urn:lab-notes:2</id>
    <updated>2025-06-02T12:00:00Z</updated>
    <link href="https://lab.example.com/2" rel="alternate"/>
    <link href="https://lab.example.com/2.mp3" rel="enclosure" type="audio/mpeg" length="1024"/>
    <summary>Calibrating the new scope.</summary>
  </entry>
</feed>
"#;

fn entry(title: &str, summary: &str) -> Entry {
    EntryBuilder::new().title(title).summary(summary).build()
}

fn science_feed() -> Feed {
    parse_feed(SCIENCE_RSS.as_bytes()).unwrap()
}

fn titles(feed: &Feed) -> Vec<&str> {
    feed.entries().iter().map(|entry| entry.title()).collect()
}

/// A filter that counts how often it is asked.
fn counting(answer: bool, calls: Arc<AtomicUsize>) -> Filter {
    Arc::new(move |_entry: &Entry| {
        calls.fetch_add(1, Ordering::SeqCst);
        answer
    })
}

#[test]
fn composition_matches_boolean_logic() {
    let p = in_title_filter("^Science").unwrap();
    let q = in_summary_filter("comet").unwrap();
    let and = compose(p.clone(), Some(q.clone()), Operation::And);
    let or = compose(p.clone(), Some(q.clone()), Operation::Or);

    let entries = [
        entry("Science: comet", "A comet was found."),
        entry("Science: rocks", "Nothing here."),
        entry("Sports", "A comet-shaped trophy."),
        entry("Sports", ""),
    ];
    for entry in &entries {
        let (p, q) = (p.evaluate(entry), q.evaluate(entry));
        assert_eq!(and.evaluate(entry), p && q, "{entry:?}");
        assert_eq!(or.evaluate(entry), p || q, "{entry:?}");
    }
}

#[test]
fn composition_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let and = compose(
        counting(false, Arc::new(AtomicUsize::new(0))),
        Some(counting(true, calls.clone())),
        Operation::And,
    );
    assert!(!and.evaluate(&Entry::default()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let or = compose(
        counting(true, Arc::new(AtomicUsize::new(0))),
        Some(counting(false, calls.clone())),
        Operation::Or,
    );
    assert!(or.evaluate(&Entry::default()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let or = compose(
        counting(false, Arc::new(AtomicUsize::new(0))),
        Some(counting(false, calls.clone())),
        Operation::Or,
    );
    assert!(!or.evaluate(&Entry::default()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn single_filter_degrades_to_itself() {
    let p = in_title_filter("Science").unwrap();
    for operation in [Operation::And, Operation::Or] {
        let composed = compose(p.clone(), None, operation);
        assert!(Arc::ptr_eq(&composed, &p));
        for entry in science_feed().entries() {
            assert_eq!(composed.evaluate(entry), p.evaluate(entry));
        }
    }
}

#[test]
fn composition_nests() {
    let science = in_title_filter("Science").unwrap();
    let sports = in_title_filter("Sports").unwrap();
    let comet = in_summary_filter("comet").unwrap();
    let nested = science.and(comet).or(sports);

    let feed = science_feed().filtered(nested.as_ref());
    assert_eq!(titles(&feed), ["Science: new discovery", "Sports: big win"]);
}

#[test]
fn closures_are_predicates() {
    let short_titles = |entry: &Entry| entry.title().len() < 16;
    let feed = science_feed().filtered(&short_titles);
    assert_eq!(titles(&feed), ["Sports: big win"]);
}

#[test]
fn filtering_preserves_order_and_is_idempotent() {
    let feed = science_feed();
    let predicate = in_title_filter("Science").unwrap();

    let once = feed.filtered(predicate.as_ref());
    assert_eq!(
        titles(&once),
        ["Science: new discovery", "Science: another find"]
    );
    assert_eq!(once.entries()[0], feed.entries()[0]);
    assert_eq!(once.entries()[1], feed.entries()[2]);
    assert_eq!(once.meta(), feed.meta());

    let twice = once.filtered(predicate.as_ref());
    assert_eq!(twice, once);

    // The source feed is untouched.
    assert_eq!(feed.entries().len(), 3);
}

#[test]
fn missing_summary_never_matches() {
    let predicate = FieldMatch::new(Field::Summary, ".*").unwrap();
    let bare = EntryBuilder::new().title("No summary").build();
    assert!(!predicate.evaluate(&bare));

    let feed = science_feed().filtered(&predicate);
    assert_eq!(
        titles(&feed),
        ["Science: new discovery", "Sports: big win"]
    );
}

#[test]
fn malformed_pattern_fails_at_construction() {
    for result in [
        in_title_filter("(").map(|_| ()),
        in_summary_filter("(").map(|_| ()),
        FieldMatch::new(Field::Link, "(").map(|_| ()),
    ] {
        match result {
            Err(Error::InvalidPattern { pattern, .. }) => {
                assert_eq!(pattern, "(")
            }
            other => panic!("Expected an invalid pattern, got {other:?}"),
        }
    }
}

#[test]
fn matching_is_case_sensitive_unless_asked() {
    let atom = parse_feed(SCIENCE_ATOM.as_bytes()).unwrap();

    let strict = FieldMatch::new(Field::Title, "gay").unwrap();
    assert!(atom.filtered(&strict).entries().is_empty());

    let alternation = FieldMatch::new(Field::Title, "[Gg]ay").unwrap();
    assert_eq!(atom.filtered(&alternation).entries().len(), 1);

    let inline = FieldMatch::new(Field::Title, "(?i)GAY").unwrap();
    assert_eq!(atom.filtered(&inline).entries().len(), 1);

    let relaxed =
        FieldMatch::with_case_insensitive(Field::Title, "GAY").unwrap();
    assert_eq!(atom.filtered(&relaxed).entries().len(), 1);
    assert_eq!(relaxed.field(), Field::Title);
    assert_eq!(relaxed.pattern(), "GAY");
}

#[test]
fn filter_config_combinations() {
    let feed = science_feed();

    let everything = FilterConfig::default().predicate().unwrap();
    assert_eq!(feed.filtered(everything.as_ref()).entries().len(), 3);

    let empty_pattern = FilterConfig {
        title: vec!["".into()],
        ..Default::default()
    };
    assert!(empty_pattern.patterns().is_empty());

    let or = FilterConfig {
        title: vec!["Sports".into()],
        summary: vec!["comet".into()],
        ..Default::default()
    };
    assert_eq!(or.operation, Operation::Or);
    let filtered = feed.filtered(or.predicate().unwrap().as_ref());
    assert_eq!(
        titles(&filtered),
        ["Science: new discovery", "Sports: big win"]
    );

    let and = FilterConfig {
        operation: Operation::And,
        ..or.clone()
    };
    assert!(feed.filtered(and.predicate().unwrap().as_ref()).entries().is_empty());

    let link = FilterConfig {
        link: vec!["/3$".into()],
        ..Default::default()
    };
    let filtered = feed.filtered(link.predicate().unwrap().as_ref());
    assert_eq!(titles(&filtered), ["Science: another find"]);

    let too_many = FilterConfig {
        title: vec!["a".into()],
        summary: vec!["b".into()],
        link: vec!["c".into()],
        ..Default::default()
    };
    assert!(matches!(too_many.predicate(), Err(Error::TooManyFilters(3))));

    let two_titles = FilterConfig {
        title: vec!["^Science".into(), "discovery$".into()],
        operation: Operation::And,
        ..Default::default()
    };
    assert_eq!(
        two_titles.patterns(),
        [(Field::Title, "^Science"), (Field::Title, "discovery$")]
    );
    let filtered = feed.filtered(two_titles.predicate().unwrap().as_ref());
    assert_eq!(titles(&filtered), ["Science: new discovery"]);

    let three_titles = FilterConfig {
        title: vec!["a".into(), "b".into(), "c".into()],
        ..Default::default()
    };
    assert!(matches!(
        three_titles.predicate(),
        Err(Error::TooManyFilters(3))
    ));

    let bad = FilterConfig {
        summary: vec!["(".into()],
        ..Default::default()
    };
    assert!(matches!(bad.predicate(), Err(Error::InvalidPattern { .. })));
}

#[test]
fn operations_parse() {
    assert_eq!("AND".parse::<Operation>().unwrap(), Operation::And);
    assert_eq!("or".parse::<Operation>().unwrap(), Operation::Or);
    assert!(matches!(
        "XOR".parse::<Operation>(),
        Err(Error::UnknownOperation(_))
    ));
}

#[test]
fn operations_deserialize_in_any_case() {
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StrDeserializer};

    for (text, expected) in
        [("And", Operation::And), ("and", Operation::And), ("OR", Operation::Or)]
    {
        let deserializer: StrDeserializer<'_, ValueError> =
            text.into_deserializer();
        assert_eq!(Operation::deserialize(deserializer).unwrap(), expected);
    }

    let deserializer: StrDeserializer<'_, ValueError> =
        "XOR".into_deserializer();
    assert!(Operation::deserialize(deserializer).is_err());
}

#[test]
fn parses_rss() {
    let feed = science_feed();
    let meta = feed.meta();
    assert_eq!(meta.title, "Daily Wire");
    assert_eq!(meta.link, "https://news.example.com/");
    assert_eq!(meta.language.as_deref(), Some("en-us"));
    assert_eq!(meta.format, SyndicationFormat::Rss);

    let first = &feed.entries()[0];
    assert_eq!(first.summary(), "A comet was found.");
    assert_eq!(first.link(), "https://news.example.com/1");
    assert_eq!(first.categories(), ["science"]);
    assert_eq!(first.id().map(|id| id.value.as_str()), Some("news-1"));
    assert_eq!(
        first.published().map(DateTime::to_rfc3339).as_deref(),
        Some("2025-06-02T08:00:00+00:00")
    );
}

#[test]
fn parses_atom() {
    let feed = parse_feed(SCIENCE_ATOM.as_bytes()).unwrap();
    assert_eq!(feed.meta().title, "Lab Notes");
    assert_eq!(feed.meta().description, "Notes from the lab");
    assert_eq!(feed.meta().link, "https://lab.example.com/");
    assert_eq!(feed.meta().format, SyndicationFormat::Atom);

    let second = &feed.entries()[1];
    assert_eq!(second.link(), "https://lab.example.com/2");
    assert_eq!(second.summary(), "Calibrating the new scope.");
    assert_eq!(second.enclosures().len(), 1);
    assert_eq!(second.enclosures()[0].mime_type, "audio/mpeg");
}

#[test]
fn garbage_is_a_parse_error() {
    let result = parse_feed(b"<html><body>not a feed</body></html>");
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn rss_output_reparses() {
    let feed = science_feed();
    let filtered = feed.filtered(in_title_filter("Science").unwrap().as_ref());
    let document = filtered.syndicate(SyndicationFormat::Rss).unwrap();
    assert!(document.starts_with("<?xml"));

    let reparsed = parse_feed(document.as_bytes()).unwrap();
    assert_eq!(reparsed.meta(), filtered.meta());
    assert_eq!(reparsed.entries(), filtered.entries());
}

#[test]
fn rss_channel_dates_pass_through() {
    let source = SCIENCE_RSS.replace(
        "<language>en-us</language>",
        "<language>en-us</language>\n    <pubDate>Mon, 02 Jun 2025 07:00:00 GMT</pubDate>",
    );
    let feed = parse_feed(source.as_bytes()).unwrap();
    assert!(feed.meta().published.is_some());
    assert_eq!(feed.meta().updated, None);

    let channel = feed.to_rss();
    assert_eq!(channel.pub_date(), Some("Mon, 2 Jun 2025 07:00:00 +0000"));
    assert_eq!(channel.last_build_date(), None);

    let document = feed.syndicate(SyndicationFormat::Rss).unwrap();
    let reparsed = parse_feed(document.as_bytes()).unwrap();
    assert_eq!(reparsed.meta(), feed.meta());
}

#[test]
fn rss_output_drops_dates_it_cannot_write() {
    tracing_subscriber::fmt::try_init().ok();

    let far_future = SCIENCE_RSS.replace(
        "Mon, 02 Jun 2025 08:00:00 GMT",
        "Sat, 01 Jan 10000 00:00:00 GMT",
    );
    let feed = parse_feed(far_future.as_bytes()).unwrap();
    assert!(feed.entries()[0].published().is_some());
    let document = feed.syndicate(SyndicationFormat::Rss).unwrap();
    let reparsed = parse_feed(document.as_bytes()).unwrap();
    assert_eq!(reparsed.entries()[0].published(), None);
    assert_eq!(
        reparsed.entries()[1].published(),
        feed.entries()[1].published()
    );

    let year_zero = SCIENCE_ATOM.replace(
        "<updated>2025-06-02T12:00:00Z</updated>\n  <entry>",
        "<updated>0000-01-01T00:00:00+01:00</updated>\n  <entry>",
    );
    let feed = parse_feed(year_zero.as_bytes()).unwrap();
    assert!(feed.meta().updated.is_some());
    let channel = feed.to_rss();
    assert_eq!(channel.last_build_date(), None);
    assert_eq!(channel.items().len(), 2);
    assert!(feed.syndicate(SyndicationFormat::Rss).is_ok());
}

#[test]
fn rss_output_falls_back_on_description() {
    let untitled = Feed::new(
        FeedMeta {
            link: "https://example.com/".into(),
            ..Default::default()
        },
        vec![],
    );
    let titled = Feed::new(
        FeedMeta {
            title: "Titled".into(),
            ..untitled.meta().clone()
        },
        vec![],
    );
    assert_eq!(untitled.to_rss().description(), "https://example.com/");
    assert_eq!(titled.to_rss().description(), "Titled");
    assert_eq!(Feed::default().to_rss().description(), "Unknown title");
}

#[test]
fn rss_items_fall_back_to_content() {
    let feed = Feed::new(
        FeedMeta::default(),
        vec![
            EntryBuilder::new()
                .title("Content only")
                .content("<p>Body</p>")
                .build(),
        ],
    );
    let channel = feed.to_rss();
    assert_eq!(channel.items()[0].description(), Some("<p>Body</p>"));
}

#[test]
fn atom_output_is_deterministic() {
    let feed = parse_feed(SCIENCE_ATOM.as_bytes()).unwrap();
    let first = feed.syndicate(SyndicationFormat::Atom).unwrap();
    let second = feed.syndicate(SyndicationFormat::Atom).unwrap();
    assert_eq!(first, second);

    let reparsed = parse_feed(first.as_bytes()).unwrap();
    assert_eq!(titles(&reparsed), titles(&feed));
    assert_eq!(reparsed.meta().updated, feed.meta().updated);
    assert_eq!(reparsed.entries()[1].enclosures(), feed.entries()[1].enclosures());
}

#[test]
fn atom_output_without_dates_uses_epoch() {
    let feed = Feed::new(
        FeedMeta {
            title: "Dateless".into(),
            ..Default::default()
        },
        vec![entry("Only entry", "")],
    );
    let atom = feed.to_atom();
    assert_eq!(atom.updated().timestamp(), 0);
    assert_eq!(atom.entries()[0].id(), "Only entry");
}

#[tokio::test]
async fn end_to_end_from_file() {
    tracing_subscriber::fmt::try_init().ok();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("science.xml");
    std::fs::write(&file, SCIENCE_RSS).unwrap();

    let predicate = in_title_filter("Science").unwrap();
    let document = filter_feed(
        format!("file://{}", file.display()),
        predicate.as_ref(),
    )
    .await
    .unwrap();

    let output = parse_feed(document.as_bytes()).unwrap();
    let original = science_feed();
    assert_eq!(
        titles(&output),
        ["Science: new discovery", "Science: another find"]
    );
    assert_eq!(output.meta(), original.meta());
}

#[tokio::test]
async fn missing_file_is_a_fetch_error() {
    tracing_subscriber::fmt::try_init().ok();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.xml");
    let result = filter_feed(missing.to_string_lossy().into_owned(), &Always)
        .await;
    assert!(matches!(result, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn end_to_end_over_http() {
    tracing_subscriber::fmt::try_init().ok();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lab.atom"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SCIENCE_ATOM)
                .insert_header("content-type", "application/atom+xml"),
        )
        .mount(&server)
        .await;

    let predicate = FilterConfig {
        summary: vec!["scope".into()],
        ..Default::default()
    }
    .predicate()
    .unwrap();
    let document = FeedFilter::new()
        .user_agent(Some("rssfilter-test".into()))
        .format(SyndicationFormat::Atom)
        .run(format!("{}/lab.atom", server.uri()), predicate.as_ref())
        .await
        .unwrap();

    let output = parse_feed(document.as_bytes()).unwrap();
    assert_eq!(output.meta().format, SyndicationFormat::Atom);
    assert_eq!(titles(&output), ["Microscope calibration"]);
}

#[tokio::test]
async fn http_errors_are_fetch_errors() {
    tracing_subscriber::fmt::try_init().ok();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result =
        filter_feed(format!("{}/gone.xml", server.uri()), &Always).await;
    match result {
        Err(Error::Fetch { reason, .. }) => assert!(reason.contains("404")),
        other => panic!("Expected a fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_feed_bodies_are_parse_errors() {
    tracing_subscriber::fmt::try_init().ok();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html></html>"),
        )
        .mount(&server)
        .await;

    let result =
        filter_feed(format!("{}/index.html", server.uri()), &Always).await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn sources_are_classified() {
    assert_eq!(
        Source::new("https://example.com/feed"),
        Source::Url("https://example.com/feed".into())
    );
    assert!(matches!(Source::new("HTTP://example.com"), Source::Url(_)));
    assert!(matches!(Source::new("/tmp/feed.xml"), Source::Path(_)));
    assert_eq!(
        Source::new("file:///tmp/feed.xml"),
        Source::Path("/tmp/feed.xml".into())
    );
}
