//! Best-effort timestamp handling for the dates found in feeds.

use super::*;

use chrono::Datelike;

/// Timestamp normalized to UTC.
/// Feeds carry dates in a handful of formats; they all end up here.
#[derive(
    Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct DateTime(chrono::DateTime<chrono::Utc>);

impl DateTime {
    /// Generate a DateTime at the unix epoch.
    pub fn epoch() -> Self {
        DateTime(chrono::DateTime::UNIX_EPOCH)
    }

    /// Format as RFC-2822, as rss `pubDate` expects.
    /// RFC-2822 only has room for years 0 through 9999.
    pub fn to_rfc2822(&self) -> Option<String> {
        match (0..=9999).contains(&self.0.year()) {
            true => Some(self.0.to_rfc2822()),
            false => None,
        }
    }

    /// Format as RFC-3339, as atom dates expect.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.format("%Y-%m-%d %H:%M UTC").to_string())
    }
}

impl From<&atom::FixedDateTime> for DateTime {
    fn from(value: &atom::FixedDateTime) -> Self {
        DateTime(value.to_utc())
    }
}

impl From<&DateTime> for atom::FixedDateTime {
    fn from(value: &DateTime) -> Self {
        value.0.fixed_offset()
    }
}

impl TryFrom<&str> for DateTime {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let date = value.trim();

        // rfc2822 (rss):
        if let Ok(parsed) =
            chrono::DateTime::<chrono::FixedOffset>::parse_from_rfc2822(date)
        {
            return Ok(DateTime(parsed.to_utc()));
        }

        // rfc3339 (atom, dublin core):
        if let Ok(parsed) =
            chrono::DateTime::<chrono::FixedOffset>::parse_from_rfc3339(date)
        {
            return Ok(DateTime(parsed.to_utc()));
        }

        // iso8601 and variants:
        for format in
            ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%MZ", "%Y-%m-%d %H:%M:%S"]
        {
            if let Ok(parsed) =
                chrono::NaiveDateTime::parse_from_str(date, format)
            {
                return Ok(DateTime(
                    chrono::DateTime::from_naive_utc_and_offset(
                        parsed,
                        chrono::Utc,
                    ),
                ));
            }
        }

        if let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        {
            if let Some(parsed) = parsed.and_hms_opt(0, 0, 0) {
                return Ok(DateTime(
                    chrono::DateTime::from_naive_utc_and_offset(
                        parsed,
                        chrono::Utc,
                    ),
                ));
            }
        }

        Err(())
    }
}
