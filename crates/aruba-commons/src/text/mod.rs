//! Extension methods on `str`.
//!
//! [`TextExt`] gathers the text helpers in one trait so they read as
//! methods at the call site:
//!
//! ```rust
//! use aruba_commons::TextExt;
//!
//! assert_eq!("hello".first_uppercased(), "Hello");
//! assert_eq!("yes".to_bool(), Some(true));
//! assert_eq!("naïve".substring(2..5).unwrap(), "ïve");
//! assert!("1.2.840.113549".is_valid_policy_oid());
//! ```
//!
//! Character offsets count grapheme clusters. Offsets past the end of the
//! text are reported as [`TextError`] rather than panicking.

mod convert;
mod slice;

use std::ops::Range;

use chrono::{DateTime, Utc};

use crate::date::{DateOptions, DatePattern};
use crate::error::TextError;
use crate::localize::{self, Bundle, BundleOwner, Localizer};

pub use convert::{URL_HOST_ENCODE_SET, url_encode_utf16};

/// Text helpers for `str`.
pub trait TextExt {
    /// Returns the number of characters (grapheme clusters).
    fn char_count(&self) -> usize;

    /// Returns the suffix starting at character offset `from`.
    ///
    /// Requires `from <= char_count()`.
    fn substring_from(&self, from: usize) -> Result<&str, TextError>;

    /// Returns the prefix ending before character offset `to`.
    ///
    /// Requires `to <= char_count()`.
    fn substring_to(&self, to: usize) -> Result<&str, TextError>;

    /// Returns the characters in `range`.
    ///
    /// Both bounds must lie in `0..=char_count()` and `start <= end`.
    fn substring(&self, range: Range<usize>) -> Result<&str, TextError>;

    /// Returns `length` characters beginning at `start`.
    fn substring_len(&self, start: usize, length: usize) -> Result<&str, TextError>;

    /// Returns the character at `offset` as a string slice.
    fn char_at(&self, offset: usize) -> Result<&str, TextError>;

    /// Maps `"True"`, `"true"`, `"yes"`, `"1"` to `true` and `"False"`,
    /// `"false"`, `"no"`, `"0"` to `false`. Matching is case-sensitive;
    /// anything else is `None`.
    fn to_bool(&self) -> Option<bool>;

    /// Uppercases the first character and leaves the rest unchanged.
    fn first_uppercased(&self) -> String;

    /// Strips leading and trailing whitespace, newlines included.
    fn trimmed(&self) -> &str;

    /// Percent-encodes everything outside the URL host allowed set.
    ///
    /// A `str` is always valid Unicode, so this returns `Some`. Use
    /// [`url_encode_utf16`] for input that may hold unpaired surrogates.
    fn url_encode(&self) -> Option<String>;

    /// Decodes `%XX` sequences. `None` if the result is not valid UTF-8.
    fn url_decode(&self) -> Option<String>;

    /// Returns true if the whole text is a dotted OID such as `1.2.3`, or
    /// is empty.
    fn is_valid_policy_oid(&self) -> bool;

    /// Parses the text as a date using a Unicode date pattern such as
    /// `dd/MM/yyyy HH:mm`.
    ///
    /// Returns `None` if the pattern is unsupported or the text does not
    /// match it.
    fn date(&self, format: &str, options: &DateOptions) -> Option<DateTime<Utc>>;

    /// Looks the text up as a key in the default table of the main bundle.
    fn localized(&self) -> String;

    /// Looks the text up as a key in `table` (default table if `None`) of
    /// `bundle`, falling back to the key itself.
    ///
    /// `comment` is context for translators and is not used in the lookup.
    fn localized_in<L: Localizer + ?Sized>(
        &self,
        table: Option<&str>,
        bundle: &L,
        comment: &str,
    ) -> String;

    /// Looks the text up in the bundle owned by `T`.
    fn localized_for<T: BundleOwner>(&self) -> String;
}

impl TextExt for str {
    fn char_count(&self) -> usize {
        slice::char_count(self)
    }

    fn substring_from(&self, from: usize) -> Result<&str, TextError> {
        slice::substring_from(self, from)
    }

    fn substring_to(&self, to: usize) -> Result<&str, TextError> {
        slice::substring_to(self, to)
    }

    fn substring(&self, range: Range<usize>) -> Result<&str, TextError> {
        slice::substring(self, range)
    }

    fn substring_len(&self, start: usize, length: usize) -> Result<&str, TextError> {
        slice::substring_len(self, start, length)
    }

    fn char_at(&self, offset: usize) -> Result<&str, TextError> {
        slice::char_at(self, offset)
    }

    fn to_bool(&self) -> Option<bool> {
        convert::to_bool(self)
    }

    fn first_uppercased(&self) -> String {
        convert::first_uppercased(self)
    }

    fn trimmed(&self) -> &str {
        self.trim()
    }

    fn url_encode(&self) -> Option<String> {
        Some(convert::url_encode(self))
    }

    fn url_decode(&self) -> Option<String> {
        convert::url_decode(self)
    }

    fn is_valid_policy_oid(&self) -> bool {
        convert::is_valid_policy_oid(self)
    }

    fn date(&self, format: &str, options: &DateOptions) -> Option<DateTime<Utc>> {
        let pattern = match DatePattern::compile(format) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::trace!(format, %err, "rejected date pattern");
                return None;
            }
        };
        pattern.parse(self, options)
    }

    fn localized(&self) -> String {
        localize::localized_string(self, None, Bundle::main())
    }

    fn localized_in<L: Localizer + ?Sized>(
        &self,
        table: Option<&str>,
        bundle: &L,
        _comment: &str,
    ) -> String {
        localize::localized_string(self, table, bundle)
    }

    fn localized_for<T: BundleOwner>(&self) -> String {
        localize::localized_string(self, None, T::bundle())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use unicode_segmentation::UnicodeSegmentation;

    use super::*;

    #[test]
    fn test_substring_from() {
        assert_eq!("hello".substring_from(0).unwrap(), "hello");
        assert_eq!("hello".substring_from(2).unwrap(), "llo");
        assert_eq!("hello".substring_from(5).unwrap(), "");
        assert_eq!(
            "hello".substring_from(6),
            Err(TextError::OffsetOutOfBounds { offset: 6, len: 5 })
        );
    }

    #[test]
    fn test_substring_to() {
        assert_eq!("hello".substring_to(0).unwrap(), "");
        assert_eq!("hello".substring_to(3).unwrap(), "hel");
        assert_eq!("hello".substring_to(5).unwrap(), "hello");
        assert!("hello".substring_to(9).is_err());
    }

    #[test]
    fn test_substring_range() {
        assert_eq!("hello world".substring(6..11).unwrap(), "world");
        assert_eq!("hello".substring(2..2).unwrap(), "");
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = "hello".substring(3..1);
        assert_eq!(reversed, Err(TextError::InvalidRange { start: 3, end: 1 }));
        assert!("hello".substring(1..6).is_err());
    }

    #[test]
    fn test_substring_len() {
        assert_eq!("abcdef".substring_len(1, 3).unwrap(), "bcd");
        assert_eq!("abcdef".substring_len(0, 6).unwrap(), "abcdef");
        assert_eq!("abcdef".substring_len(6, 0).unwrap(), "");
        assert!("abcdef".substring_len(4, 3).is_err());
    }

    #[test]
    fn test_char_at() {
        assert_eq!("abc".char_at(0).unwrap(), "a");
        assert_eq!("abc".char_at(2).unwrap(), "c");
        assert_eq!(
            "abc".char_at(3),
            Err(TextError::OffsetOutOfBounds { offset: 3, len: 3 })
        );
        // Flag emoji: two regional indicators, one character.
        assert_eq!("🇮🇹!".char_at(0).unwrap(), "🇮🇹");
        assert_eq!("🇮🇹!".char_at(1).unwrap(), "!");
    }

    #[test]
    fn test_to_bool() {
        for literal in ["True", "true", "yes", "1"] {
            assert_eq!(literal.to_bool(), Some(true), "{literal}");
        }
        for literal in ["False", "false", "no", "0"] {
            assert_eq!(literal.to_bool(), Some(false), "{literal}");
        }
        assert_eq!("maybe".to_bool(), None);
    }

    #[test]
    fn test_first_uppercased() {
        assert_eq!("".first_uppercased(), "");
        assert_eq!("hello".first_uppercased(), "Hello");
        assert_eq!("Hello world".first_uppercased(), "Hello world");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!("  a b \t".trimmed(), "a b");
        assert_eq!("\n\tline\r\n".trimmed(), "line");
        assert_eq!("   ".trimmed(), "");
    }

    #[test]
    fn test_url_encode_always_some_for_str() {
        assert_eq!("a b".url_encode().as_deref(), Some("a%20b"));
        assert_eq!("".url_encode().as_deref(), Some(""));
    }

    #[test]
    fn test_date_rejects_bad_pattern() {
        let options = DateOptions::utc();
        assert!("2024".date("yyyy", &options).is_some());
        assert_eq!("2024".date("yyyy'", &options), None);
        assert_eq!("2024".date("qqqq", &options), None);
    }

    proptest! {
        #[test]
        fn prop_substring_from_is_suffix(text in "\\PC{0,24}", pick in 0usize..=24) {
            let len = text.char_count();
            let from = pick.min(len);
            let suffix = text.substring_from(from).unwrap();
            let expected: String = text.graphemes(true).skip(from).collect();
            prop_assert_eq!(suffix, expected.as_str());
            prop_assert_eq!(suffix.char_count(), len - from);
        }

        #[test]
        fn prop_full_length_substring_is_identity(text in "\\PC{0,24}") {
            let len = text.char_count();
            prop_assert_eq!(text.substring_len(0, len).unwrap(), text.as_str());
        }

        #[test]
        fn prop_trimmed_is_idempotent(text in "[ \t\n]{0,3}\\PC{0,16}[ \t\r\n]{0,3}") {
            let once = text.trimmed();
            prop_assert_eq!(once.trimmed(), once);
        }
    }
}
