//! Validated identifiers for the static lookup tables.
//!
//! Counties and industries arrive as strings in the JSON tables. They are
//! parsed once at load time into these types so malformed keys are rejected
//! early and every later lookup works with known-good values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when an identifier fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid county FIPS code '{0}': expected 5 digits")]
    InvalidFips(String),

    #[error("invalid NAICS industry code '{0}': expected 2 to 6 digits")]
    InvalidIndustry(String),

    #[error("invalid year '{0}': expected a 4-digit year")]
    InvalidYear(String),
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Five-digit county FIPS code (2-digit state + 3-digit county).
///
/// The county list stores some codes as `SS_CCC`; a single underscore
/// separator is removed before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountyFips(String);

impl CountyFips {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        let normalized = trimmed.replacen('_', "", 1);
        if normalized.len() == 5 && all_digits(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(IdError::InvalidFips(raw.to_string()))
        }
    }

    /// Builds the code from the separate state and county parts used by the
    /// Census API.
    pub fn from_parts(state: &str, county: &str) -> Result<Self, IdError> {
        Self::parse(&format!("{}{}", state.trim(), county.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl FromStr for CountyFips {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountyFips {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountyFips> for String {
    fn from(value: CountyFips) -> Self {
        value.0
    }
}

impl fmt::Display for CountyFips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// NAICS industry code, 2 to 6 digits (`5411`, `531320`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndustryCode(pub(crate) String);

impl IndustryCode {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        if (2..=6).contains(&trimmed.len()) && all_digits(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(IdError::InvalidIndustry(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IndustryCode {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IndustryCode {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IndustryCode> for String {
    fn from(value: IndustryCode) -> Self {
        value.0
    }
}

impl fmt::Display for IndustryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four-digit calendar year of an observation.
///
/// Serialized as a plain number; JSON object keys such as `"2012"` also
/// deserialize into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(u16);

impl Year {
    pub const MIN: u16 = 1000;
    pub const MAX: u16 = 9999;

    pub fn new(year: u16) -> Result<Self, IdError> {
        if (Self::MIN..=Self::MAX).contains(&year) {
            Ok(Self(year))
        } else {
            Err(IdError::InvalidYear(year.to_string()))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl FromStr for Year {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 4 || !all_digits(trimmed) {
            return Err(IdError::InvalidYear(s.to_string()));
        }
        trimmed
            .parse::<u16>()
            .map_err(|_| IdError::InvalidYear(s.to_string()))
            .and_then(Self::new)
            .map_err(|_| IdError::InvalidYear(s.to_string()))
    }
}

impl TryFrom<u16> for Year {
    type Error = IdError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(value: Year) -> Self {
        value.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
