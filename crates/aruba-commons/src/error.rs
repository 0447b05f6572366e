//! Error types for text slicing, date patterns, localization tables and colors.

use std::path::PathBuf;

use thiserror::Error;

use crate::color::Channel;

/// Error from a character-offset operation on text.
///
/// Offsets count grapheme clusters, so `len` is the character count of the
/// text, not its byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("offset {offset} out of bounds (length: {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("invalid range {start}..{end}: start is after end")]
    InvalidRange { start: usize, end: usize },
}

/// Error while compiling a date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unsupported pattern field {letter:?} (width {count})")]
    UnsupportedField { letter: char, count: usize },

    #[error("unterminated quoted literal in pattern")]
    UnterminatedQuote,

    #[error("empty date pattern")]
    Empty,
}

/// Error while parsing a `.strings` table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StringsParseError {
    #[error("line {line}: unexpected end of input while reading {context}")]
    UnexpectedEof { line: usize, context: &'static str },

    #[error("line {line}: unexpected character {found:?} while reading {context}")]
    UnexpectedChar {
        line: usize,
        found: char,
        context: &'static str,
    },

    #[error("line {line}: invalid escape sequence {escape:?}")]
    InvalidEscape { line: usize, escape: String },

    #[error("invalid UTF-16 in strings table")]
    InvalidUtf16,

    #[error("invalid UTF-8 in strings table")]
    InvalidUtf8,
}

/// Error while loading a bundle from disk.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: StringsParseError,
    },
}

/// Error constructing a [`Color`](crate::Color).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ColorError {
    #[error("{channel} component {value} out of range [0, 255]")]
    ChannelOutOfRange { channel: Channel, value: i32 },

    #[error("alpha component {value} out of range [0.0, 1.0]")]
    AlphaOutOfRange { value: f64 },

    #[error("hex color {value:#x} exceeds 0xFFFFFF")]
    HexOutOfRange { value: u32 },
}
