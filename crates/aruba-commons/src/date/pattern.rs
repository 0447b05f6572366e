//! Unicode date pattern compilation.
//!
//! Patterns follow the LDML date field symbols (`dd/MM/yyyy HH:mm`). Runs
//! of the same ASCII letter form a field; text in single quotes is literal,
//! `''` is a literal quote, and every other character is literal as is.

use crate::error::PatternError;

/// What a pattern field reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `y`
    Year,
    /// `M` or `L`
    Month,
    /// `d`
    Day,
    /// `H`, 0-23
    Hour23,
    /// `k`, 1-24
    Hour24,
    /// `h`, 1-12
    Hour12,
    /// `K`, 0-11
    Hour11,
    /// `m`
    Minute,
    /// `s`
    Second,
    /// `S`
    Fraction,
    /// `E` or `c`
    Weekday,
    /// `a`
    DayPeriod,
    /// `Z`
    ZoneRfc,
    /// `X`, accepts `Z` for UTC
    ZoneIsoUtc,
    /// `x`
    ZoneIso,
    /// `z`
    ZoneName,
}

impl FieldKind {
    fn from_letter(letter: char, count: usize) -> Option<Self> {
        let kind = match (letter, count) {
            ('y', _) => FieldKind::Year,
            ('M' | 'L', 1..=4) => FieldKind::Month,
            ('d', 1..=2) => FieldKind::Day,
            ('H', 1..=2) => FieldKind::Hour23,
            ('k', 1..=2) => FieldKind::Hour24,
            ('h', 1..=2) => FieldKind::Hour12,
            ('K', 1..=2) => FieldKind::Hour11,
            ('m', 1..=2) => FieldKind::Minute,
            ('s', 1..=2) => FieldKind::Second,
            ('S', 1..=9) => FieldKind::Fraction,
            ('E' | 'c', 1..=4) => FieldKind::Weekday,
            ('a', 1..=3) => FieldKind::DayPeriod,
            ('Z', 1..=5) => FieldKind::ZoneRfc,
            ('X', 1..=5) => FieldKind::ZoneIsoUtc,
            ('x', 1..=5) => FieldKind::ZoneIso,
            ('z', 1..=4) => FieldKind::ZoneName,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns true if the field reads digits at this width.
    pub fn is_numeric(&self, count: usize) -> bool {
        match self {
            FieldKind::Month => count <= 2,
            FieldKind::Year
            | FieldKind::Day
            | FieldKind::Hour23
            | FieldKind::Hour24
            | FieldKind::Hour12
            | FieldKind::Hour11
            | FieldKind::Minute
            | FieldKind::Second
            | FieldKind::Fraction => true,
            _ => false,
        }
    }
}

/// One element of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Field { kind: FieldKind, count: usize },
}

/// Splits a pattern into literals and fields.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                literal.push('\'');
                continue;
            }
            // Quoted run; '' inside it is an escaped quote.
            loop {
                match chars.next() {
                    None => return Err(PatternError::UnterminatedQuote),
                    Some('\'') if chars.peek() == Some(&'\'') => {
                        chars.next();
                        literal.push('\'');
                    }
                    Some('\'') => break,
                    Some(other) => literal.push(other),
                }
            }
        } else if c.is_ascii_alphabetic() {
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }

            let kind = FieldKind::from_letter(c, count)
                .ok_or(PatternError::UnsupportedField { letter: c, count })?;

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field { kind, count });
        } else {
            literal.push(c);
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}
