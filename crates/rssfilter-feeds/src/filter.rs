//! Entry filters.

use super::*;

use regex::{Regex, RegexBuilder};

/// Decides whether an entry belongs in the filtered feed.
/// Any `Fn(&Entry) -> bool` closure is a predicate too.
pub trait Predicate: Send + Sync {
    /// Check the entry.
    fn evaluate(&self, entry: &Entry) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Entry) -> bool + Send + Sync,
{
    fn evaluate(&self, entry: &Entry) -> bool {
        self(entry)
    }
}

/// Shared, composable predicate.
pub type Filter = Arc<dyn Predicate>;

/// Lets every entry through.
#[derive(Clone, Copy, Debug, Default)]
pub struct Always;

impl Predicate for Always {
    fn evaluate(&self, _entry: &Entry) -> bool {
        true
    }
}

/// Matches a regex anywhere in one field of an entry.
#[derive(Clone, Debug)]
pub struct FieldMatch {
    field: Field,
    regex: Regex,
}

impl FieldMatch {
    /// Compile a case-sensitive match on `field`.
    pub fn new(field: Field, pattern: &str) -> Result<Self> {
        Self::build(field, pattern, false)
    }

    /// Compile a match on `field` that ignores case.
    pub fn with_case_insensitive(field: Field, pattern: &str) -> Result<Self> {
        Self::build(field, pattern, true)
    }

    fn build(field: Field, pattern: &str, ignore_case: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|reason| Error::InvalidPattern {
                pattern: pattern.into(),
                reason,
            })?;
        tracing::trace!("Compiled `{}` filter for {}", pattern, field);
        Ok(Self { field, regex })
    }

    /// The field being matched.
    pub fn field(&self) -> Field {
        self.field
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Predicate for FieldMatch {
    fn evaluate(&self, entry: &Entry) -> bool {
        let text = entry.field(self.field);
        if text.is_empty() {
            return false;
        }
        self.regex.is_match(&text)
    }
}

/// Only allow entries whose title matches `pattern`.
pub fn in_title_filter(pattern: &str) -> Result<Filter> {
    Ok(Arc::new(FieldMatch::new(Field::Title, pattern)?))
}

/// Only allow entries whose summary matches `pattern`.
pub fn in_summary_filter(pattern: &str) -> Result<Filter> {
    Ok(Arc::new(FieldMatch::new(Field::Summary, pattern)?))
}

/// Only allow entries whose link matches `pattern`.
pub fn in_link_filter(pattern: &str) -> Result<Filter> {
    Ok(Arc::new(FieldMatch::new(Field::Link, pattern)?))
}

/// How two filters combine.
/// Parsed the same way everywhere, so `and`, `And` and `AND` are all fine.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(try_from = "String")]
pub enum Operation {
    #[serde(rename = "AND")]
    And,
    #[default]
    #[serde(rename = "OR")]
    Or,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::And => f.write_str("AND"),
            Operation::Or => f.write_str("OR"),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(Operation::And),
            "OR" => Ok(Operation::Or),
            _ => Err(Error::UnknownOperation(s.into())),
        }
    }
}

impl TryFrom<String> for Operation {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Two filters joined by an operation.
/// The right filter only runs when the left one can't decide alone.
pub struct Composed {
    left: Filter,
    right: Filter,
    operation: Operation,
}

impl Predicate for Composed {
    fn evaluate(&self, entry: &Entry) -> bool {
        match self.operation {
            Operation::And => {
                self.left.evaluate(entry) && self.right.evaluate(entry)
            }
            Operation::Or => {
                self.left.evaluate(entry) || self.right.evaluate(entry)
            }
        }
    }
}

/// Combine two filters. Without a second filter, the first is returned as-is.
pub fn compose(
    left: Filter,
    right: Option<Filter>,
    operation: Operation,
) -> Filter {
    match right {
        Some(right) => Arc::new(Composed {
            left,
            right,
            operation,
        }),
        None => left,
    }
}

/// Combinators on shared filters.
pub trait FilterExt {
    /// Both filters must allow the entry.
    fn and(self, other: Filter) -> Filter;

    /// Either filter may allow the entry.
    fn or(self, other: Filter) -> Filter;
}

impl FilterExt for Filter {
    fn and(self, other: Filter) -> Filter {
        compose(self, Some(other), Operation::And)
    }

    fn or(self, other: Filter) -> Filter {
        compose(self, Some(other), Operation::Or)
    }
}
