//! Character-offset slicing.
//!
//! A character is an extended grapheme cluster, so `"e\u{301}"` is one
//! character and so is a flag emoji. Offsets are translated to byte
//! positions by walking the grapheme boundaries; every function returns a
//! borrowed slice of the input.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::TextError;

/// Returns the number of characters in `text`.
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Converts a character offset to a byte offset.
///
/// `offset == char_count(text)` maps to `text.len()`.
fn byte_offset(text: &str, offset: usize) -> Result<usize, TextError> {
    if offset == 0 {
        return Ok(0);
    }

    let mut seen = 0;
    for (idx, _) in text.grapheme_indices(true) {
        if seen == offset {
            return Ok(idx);
        }
        seen += 1;
    }

    if seen == offset {
        Ok(text.len())
    } else {
        Err(TextError::OffsetOutOfBounds { offset, len: seen })
    }
}

pub fn substring_from(text: &str, from: usize) -> Result<&str, TextError> {
    let start = byte_offset(text, from)?;
    Ok(&text[start..])
}

pub fn substring_to(text: &str, to: usize) -> Result<&str, TextError> {
    let end = byte_offset(text, to)?;
    Ok(&text[..end])
}

pub fn substring(text: &str, range: Range<usize>) -> Result<&str, TextError> {
    if range.start > range.end {
        return Err(TextError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }

    let start = byte_offset(text, range.start)?;
    let end = byte_offset(text, range.end)?;
    Ok(&text[start..end])
}

pub fn substring_len(text: &str, start: usize, length: usize) -> Result<&str, TextError> {
    let end = start.checked_add(length).ok_or(TextError::OffsetOutOfBounds {
        offset: usize::MAX,
        len: char_count(text),
    })?;
    substring(text, start..end)
}

pub fn char_at(text: &str, offset: usize) -> Result<&str, TextError> {
    let mut len = 0;
    for (i, grapheme) in text.graphemes(true).enumerate() {
        if i == offset {
            return Ok(grapheme);
        }
        len += 1;
    }
    Err(TextError::OffsetOutOfBounds { offset, len })
}
