//! Timestamp Value Object
//!
//! A point in time that is either known (parsed successfully) or explicitly
//! marked invalid. Nothing in the push workflow silently substitutes "now" or
//! the epoch for a value it could not read.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// On-disk format for timestamps (`2024-03-09-17-04-55`, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// A timestamp that may have failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A parseable point in time
    Valid(DateTime<Utc>),
    /// The recorded value could not be understood; keeps the raw text
    Invalid(String),
}

impl Timestamp {
    /// Parse a persisted timestamp.
    ///
    /// Accepts the compact on-disk format and RFC 3339 (which is what the
    /// remote service reports).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
            return Self::Valid(Utc.from_utc_datetime(&naive));
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Valid(parsed.with_timezone(&Utc));
        }
        Self::Invalid(raw.to_string())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::Valid(at)
    }

    pub fn invalid() -> Self {
        Self::Invalid(String::new())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(at) => Some(*at),
            Self::Invalid(_) => None,
        }
    }

    /// Strictly-before comparison; `None` when either side is invalid.
    pub fn is_before(&self, other: &Timestamp) -> Option<bool> {
        Some(self.as_datetime()? < other.as_datetime()?)
    }

    /// Text written back to disk. Invalid values round-trip unchanged.
    pub fn to_persisted(&self) -> String {
        match self {
            Self::Valid(at) => at.format(TIMESTAMP_FORMAT).to_string(),
            Self::Invalid(raw) => raw.clone(),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            Self::Invalid(raw) if raw.is_empty() => write!(f, "unknown"),
            Self::Invalid(raw) => write!(f, "invalid ({})", raw),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Valid(at)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_persisted())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Timestamp::parse(&s)).unwrap_or_default())
    }
}
