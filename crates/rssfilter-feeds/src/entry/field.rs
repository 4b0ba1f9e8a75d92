//! Entry fields that filters can match against.

use super::*;

/// A named field of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    #[serde(alias = "description")]
    Summary,
    Content,
    #[serde(alias = "url")]
    Link,
    Author,
    #[serde(alias = "guid")]
    Id,
    #[serde(alias = "tags")]
    Categories,
}

impl Field {
    /// Name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Summary => "summary",
            Field::Content => "content",
            Field::Link => "link",
            Field::Author => "author",
            Field::Id => "id",
            Field::Categories => "categories",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "summary" | "description" => Ok(Field::Summary),
            "content" => Ok(Field::Content),
            "link" | "url" => Ok(Field::Link),
            "author" => Ok(Field::Author),
            "id" | "guid" => Ok(Field::Id),
            "categories" | "tags" => Ok(Field::Categories),
            _ => Err(Error::UnknownField(s.into())),
        }
    }
}
