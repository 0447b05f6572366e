//! Date parsing from Unicode date patterns.
//!
//! A [`DatePattern`] is compiled once from a pattern such as
//! `dd/MM/yyyy HH:mm` and can then parse any number of strings. Parsing is
//! strict: the whole input must match and the resulting calendar date must
//! exist. Fields missing from the pattern default to 2000-01-01 00:00:00.
//!
//! Locale and time zone are explicit through [`DateOptions`]:
//!
//! ```rust
//! use aruba_commons::date::{DateOptions, DatePattern, Locale, TimeZone};
//!
//! let options = DateOptions::utc().with_locale(Locale::italian());
//! let pattern = DatePattern::compile("d MMMM yyyy").unwrap();
//! let date = pattern.parse("15 marzo 2024", &options).unwrap();
//! assert_eq!(date.to_rfc3339(), "2024-03-15T00:00:00+00:00");
//! ```

mod locale;
mod parse;
mod pattern;
mod zone;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};

use crate::error::PatternError;

pub use locale::{Locale, POSIX_IDENTIFIER, Symbols};
pub use parse::DEFAULT_YEAR;
pub use pattern::{FieldKind, Token};
pub use zone::TimeZone;

/// How far back the default two-digit-year window starts.
pub const TWO_DIGIT_YEAR_LOOKBACK: i32 = 80;

/// Locale, time zone and two-digit-year window used by date parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOptions {
    /// Symbols for month names, weekdays and AM/PM.
    pub locale: Locale,
    /// Zone applied when the text carries no offset.
    pub time_zone: TimeZone,
    /// First year of the 100-year window `yy` resolves into.
    pub two_digit_year_start: i32,
}

impl DateOptions {
    /// System locale and time zone.
    pub fn system() -> Self {
        Self {
            locale: Locale::current(),
            time_zone: TimeZone::current(),
            two_digit_year_start: default_two_digit_year_start(),
        }
    }

    /// `en_US_POSIX` symbols in UTC, independent of the environment.
    pub fn utc() -> Self {
        Self {
            locale: Locale::english(),
            time_zone: TimeZone::Utc,
            two_digit_year_start: default_two_digit_year_start(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_two_digit_year_start(mut self, year: i32) -> Self {
        self.two_digit_year_start = year;
        self
    }
}

impl Default for DateOptions {
    /// Same as [`DateOptions::system`].
    fn default() -> Self {
        Self::system()
    }
}

fn default_two_digit_year_start() -> i32 {
    Utc::now().year() - TWO_DIGIT_YEAR_LOOKBACK
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    tokens: Vec<Token>,
}

impl DatePattern {
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            source: pattern.to_string(),
            tokens: pattern::tokenize(pattern)?,
        })
    }

    /// Returns the pattern this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parses `text`, returning `None` if it does not match the pattern.
    pub fn parse(&self, text: &str, options: &DateOptions) -> Option<DateTime<Utc>> {
        let parsed = parse::parse(&self.tokens, text, options);
        if parsed.is_none() {
            tracing::trace!(pattern = %self.source, text, "text does not match date pattern");
        }
        parsed
    }
}

impl FromStr for DatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
