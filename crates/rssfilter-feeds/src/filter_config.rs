//! Filters described as plain configuration.

use super::*;

/// The patterns a filtered feed is built from.
/// At most two patterns can be combined at once, whichever fields they match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Regexes matched against entry titles.
    #[serde(
        default,
        alias = "title-pattern",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub title: Vec<String>,
    /// Regexes matched against entry summaries.
    #[serde(
        default,
        alias = "summary-pattern",
        alias = "description",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub summary: Vec<String>,
    /// Regexes matched against entry links.
    #[serde(
        default,
        alias = "link-pattern",
        alias = "url",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub link: Vec<String>,
    /// How two patterns combine.
    #[serde(default)]
    pub operation: Operation,
    /// Whether patterns ignore case.
    #[serde(default, alias = "case-insensitive")]
    pub case_insensitive: bool,
}

/// A single pattern or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Patterns {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Patterns::deserialize(deserializer)? {
        Patterns::One(pattern) => vec![pattern],
        Patterns::Many(patterns) => patterns,
    })
}

impl FilterConfig {
    /// Patterns that are set, paired with the field they match.
    pub fn patterns(&self) -> Vec<(Field, &str)> {
        [
            (Field::Title, &self.title),
            (Field::Summary, &self.summary),
            (Field::Link, &self.link),
        ]
        .into_iter()
        .flat_map(|(field, patterns)| {
            patterns
                .iter()
                .filter(|pattern| !pattern.is_empty())
                .map(move |pattern| (field, pattern.as_str()))
        })
        .collect()
    }

    /// Compile the configured patterns into one filter.
    /// No patterns at all lets every entry through.
    pub fn predicate(&self) -> Result<Filter> {
        let patterns = self.patterns();
        if patterns.len() > 2 {
            return Err(Error::TooManyFilters(patterns.len()));
        }

        let mut filters = Vec::with_capacity(patterns.len());
        for (field, pattern) in patterns {
            let filter = match self.case_insensitive {
                true => FieldMatch::with_case_insensitive(field, pattern)?,
                false => FieldMatch::new(field, pattern)?,
            };
            filters.push(Arc::new(filter) as Filter);
        }

        let mut filters = filters.into_iter();
        let Some(first) = filters.next() else {
            tracing::debug!("No filters configured, passing all entries");
            return Ok(Arc::new(Always));
        };
        Ok(compose(first, filters.next(), self.operation))
    }
}
