//! Matching text against compiled pattern tokens.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::locale::Symbols;
use super::pattern::{FieldKind, Token};
use super::zone::TimeZone;
use super::DateOptions;

/// Year used when the pattern has no year field.
pub const DEFAULT_YEAR: i32 = 2000;

/// Longest digit run read by a greedy year or fraction field.
const MAX_GREEDY_DIGITS: usize = 9;

/// Field values collected while walking the pattern.
#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    /// From `H` or `k`, already in 0-23.
    hour: Option<u32>,
    /// From `h` or `K`, in 0-11 before the day period is applied.
    hour12: Option<u32>,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u32>,
    offset: Option<FixedOffset>,
}

impl Fields {
    fn resolve(self, options: &DateOptions) -> Option<DateTime<Utc>> {
        let hour = match (self.hour, self.hour12) {
            (Some(hour), _) => hour,
            (None, Some(hour)) if self.pm == Some(true) => hour + 12,
            (None, Some(hour)) => hour,
            (None, None) => 0,
        };

        let date = NaiveDate::from_ymd_opt(
            self.year.unwrap_or(DEFAULT_YEAR),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )?;
        let time = NaiveTime::from_hms_nano_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanos.unwrap_or(0),
        )?;
        let local = NaiveDateTime::new(date, time);

        match self.offset {
            Some(offset) => TimeZone::Fixed(offset).to_utc(&local),
            None => options.time_zone.to_utc(&local),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum OffsetStyle {
    /// `+HHMM`
    Basic,
    /// `+HH:MM`
    Extended,
    /// `+HH` or `+HHMM`
    HourOptionalMinutes,
}

/// Forward-only view over the unparsed input.
#[derive(Debug)]
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn eat(&mut self, literal: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(literal)?;
        Some(())
    }

    fn eat_char(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Reads between `min` and `max` ASCII digits. Consumes nothing on failure.
    fn digits(&mut self, min: usize, max: usize) -> Option<&'a str> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(digits)
    }

    fn number(&mut self, min: usize, max: usize) -> Option<u32> {
        self.digits(min, max)?.parse().ok()
    }

    /// Matches the longest of `names`, ignoring case, and returns its index.
    fn name(&mut self, names: &[&str]) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for (index, name) in names.iter().enumerate() {
            let chars = name.chars().count();
            let end = self
                .rest
                .char_indices()
                .nth(chars)
                .map_or(self.rest.len(), |(idx, _)| idx);
            let candidate = &self.rest[..end];

            if candidate.chars().count() == chars
                && candidate.to_lowercase() == name.to_lowercase()
                && best.map_or(true, |(_, len)| end > len)
            {
                best = Some((index, end));
            }
        }

        let (index, len) = best?;
        self.rest = &self.rest[len..];
        Some(index)
    }

    /// Reads a signed UTC offset and returns it in seconds.
    fn offset(&mut self, style: OffsetStyle) -> Option<i32> {
        let sign = if self.eat_char('+') {
            1
        } else if self.eat_char('-') {
            -1
        } else {
            return None;
        };

        let hours = self.number(2, 2)?;
        let minutes = match style {
            OffsetStyle::Basic => self.number(2, 2)?,
            OffsetStyle::Extended => {
                if !self.eat_char(':') {
                    return None;
                }
                self.number(2, 2)?
            }
            OffsetStyle::HourOptionalMinutes => self.number(2, 2).unwrap_or(0),
        };

        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(sign * (hours * 3600 + minutes * 60) as i32)
    }

    fn starts_with_sign(&self) -> bool {
        self.rest.starts_with(['+', '-'])
    }
}

/// Resolves a two-digit year into the 100-year window starting at `start`.
pub fn resolve_two_digit_year(yy: i32, start: i32) -> i32 {
    let year = start.div_euclid(100) * 100 + yy;
    if year < start { year + 100 } else { year }
}

/// Parses `text` against `tokens`. The whole input must be consumed.
pub fn parse(tokens: &[Token], text: &str, options: &DateOptions) -> Option<DateTime<Utc>> {
    let mut cursor = Cursor { rest: text };
    let mut fields = Fields::default();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(literal) => cursor.eat(literal)?,
            Token::Field { kind, count } => {
                let abutting = matches!(
                    tokens.get(i + 1),
                    Some(Token::Field { kind: next, count: n }) if next.is_numeric(*n)
                );
                read_field(&mut cursor, &mut fields, *kind, *count, abutting, options)?;
            }
        }
    }

    if !cursor.rest.is_empty() {
        return None;
    }

    fields.resolve(options)
}

fn read_field(
    cursor: &mut Cursor<'_>,
    fields: &mut Fields,
    kind: FieldKind,
    count: usize,
    abutting: bool,
    options: &DateOptions,
) -> Option<()> {
    let symbols: &Symbols = options.locale.symbols();

    // A numeric field directly followed by another one reads exactly its
    // pattern width, so "yyyyMMdd" can split "20240315".
    let (min, max) = match kind {
        _ if abutting => (count, count),
        FieldKind::Year | FieldKind::Fraction => (1, MAX_GREEDY_DIGITS),
        _ => (1, count.max(2)),
    };

    match kind {
        FieldKind::Year => {
            let digits = cursor.digits(min, max)?;
            let value: i32 = digits.parse().ok()?;
            fields.year = Some(if count == 2 && digits.len() == 2 {
                resolve_two_digit_year(value, options.two_digit_year_start)
            } else {
                value
            });
        }
        FieldKind::Month if count <= 2 => fields.month = Some(cursor.number(min, max)?),
        FieldKind::Month => {
            let names = if count == 3 {
                &symbols.short_months
            } else {
                &symbols.months
            };
            fields.month = Some(cursor.name(names)? as u32 + 1);
        }
        FieldKind::Day => fields.day = Some(cursor.number(min, max)?),
        FieldKind::Hour23 => fields.hour = Some(cursor.number(min, max)?),
        FieldKind::Hour24 => {
            let hour = cursor.number(min, max)?;
            if !(1..=24).contains(&hour) {
                return None;
            }
            fields.hour = Some(hour % 24);
        }
        FieldKind::Hour12 => {
            let hour = cursor.number(min, max)?;
            if !(1..=12).contains(&hour) {
                return None;
            }
            fields.hour12 = Some(hour % 12);
        }
        FieldKind::Hour11 => {
            let hour = cursor.number(min, max)?;
            if hour > 11 {
                return None;
            }
            fields.hour12 = Some(hour);
        }
        FieldKind::Minute => fields.minute = Some(cursor.number(min, max)?),
        FieldKind::Second => fields.second = Some(cursor.number(min, max)?),
        FieldKind::Fraction => {
            let digits = cursor.digits(min, max)?;
            fields.nanos = Some(format!("{digits:0<9}").parse().ok()?);
        }
        FieldKind::Weekday => {
            // Read for shape only; the date fields decide the day.
            let names = if count == 4 {
                &symbols.weekdays
            } else {
                &symbols.short_weekdays
            };
            cursor.name(names)?;
        }
        FieldKind::DayPeriod => {
            fields.pm = Some(cursor.name(&[symbols.am, symbols.pm])? == 1);
        }
        FieldKind::ZoneRfc => {
            let seconds = match count {
                1..=3 => cursor.offset(OffsetStyle::Basic)?,
                4 => {
                    cursor.name(&["GMT"])?;
                    if cursor.starts_with_sign() {
                        cursor.offset(OffsetStyle::Extended)?
                    } else {
                        0
                    }
                }
                _ if cursor.eat_char('Z') => 0,
                _ => cursor.offset(OffsetStyle::Extended)?,
            };
            fields.offset = Some(FixedOffset::east_opt(seconds)?);
        }
        FieldKind::ZoneIsoUtc | FieldKind::ZoneIso => {
            let seconds = if kind == FieldKind::ZoneIsoUtc && cursor.eat_char('Z') {
                0
            } else {
                let style = match count {
                    1 => OffsetStyle::HourOptionalMinutes,
                    2 | 4 => OffsetStyle::Basic,
                    _ => OffsetStyle::Extended,
                };
                cursor.offset(style)?
            };
            fields.offset = Some(FixedOffset::east_opt(seconds)?);
        }
        FieldKind::ZoneName => {
            cursor.name(&["GMT", "UTC"])?;
            let seconds = if cursor.starts_with_sign() {
                cursor.offset(OffsetStyle::Extended)?
            } else {
                0
            };
            fields.offset = Some(FixedOffset::east_opt(seconds)?);
        }
    }

    Some(())
}
