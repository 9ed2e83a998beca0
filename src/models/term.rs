//! Academic term model.
//!
//! A term is a (year, season) pair totally ordered chronologically:
//! years compare first, seasons within a year rank Spring < Summer < Fall.
//! Terms parse from and display as the key form `"<year>-<TermName>"`
//! (`"2025-Spring"`), and serialize as that string so a plan keyed by
//! terms round-trips to the external JSON mapping shape.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Season of an academic term.
///
/// Derived ordering follows declaration order, which is the
/// chronological order within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TermType {
    Spring,
    Summer,
    Fall,
}

impl TermType {
    /// All seasons in chronological order.
    pub const ALL: [TermType; 3] = [TermType::Spring, TermType::Summer, TermType::Fall];

    /// Chronological rank within a year.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            TermType::Spring => 0,
            TermType::Summer => 1,
            TermType::Fall => 2,
        }
    }

    /// Season name as it appears in term keys.
    pub fn name(self) -> &'static str {
        match self {
            TermType::Spring => "Spring",
            TermType::Summer => "Summer",
            TermType::Fall => "Fall",
        }
    }

    /// The season that follows this one, wrapping Fall to Spring.
    pub fn next(self) -> TermType {
        match self {
            TermType::Spring => TermType::Summer,
            TermType::Summer => TermType::Fall,
            TermType::Fall => TermType::Spring,
        }
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A term key: year plus season.
///
/// Derived ordering compares `(year, term_type)`, which is the
/// chronological total order used throughout the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    /// Calendar year.
    pub year: u16,
    /// Season within the year.
    pub term_type: TermType,
}

impl Term {
    /// Creates a term key.
    pub fn new(year: u16, term_type: TermType) -> Self {
        Self { year, term_type }
    }

    /// The next chronological term (Fall wraps to Spring of the next year).
    pub fn succ(self) -> Term {
        match self.term_type {
            TermType::Fall => Term::new(self.year + 1, TermType::Spring),
            season => Term::new(self.year, season.next()),
        }
    }
}

/// Error parsing a term key string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermParseError {
    /// The key is not of the form `<year>-<TermName>`.
    #[error("term key '{0}' is not of the form <year>-<TermName>")]
    MalformedKey(String),
    /// The year component is not a number.
    #[error("term key '{0}' has a non-numeric year")]
    InvalidYear(String),
    /// The season component is not Spring, Summer, or Fall.
    #[error("unknown term name '{0}'")]
    UnknownTermName(String),
}

impl FromStr for Term {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, name) = s
            .split_once('-')
            .ok_or_else(|| TermParseError::MalformedKey(s.to_string()))?;
        let year: u16 = year
            .parse()
            .map_err(|_| TermParseError::InvalidYear(s.to_string()))?;
        let term_type = match name {
            "Spring" => TermType::Spring,
            "Summer" => TermType::Summer,
            "Fall" => TermType::Fall,
            other => return Err(TermParseError::UnknownTermName(other.to_string())),
        };
        Ok(Term::new(year, term_type))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.term_type)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}
