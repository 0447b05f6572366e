//! Coercions and encodings over whole text values.

use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Bytes left untouched by [`url_encode`]: the URL host allowed set.
///
/// Everything outside `A-Z a-z 0-9 ! $ & ' ( ) * + , - . : ; = [ ] _ ~` is
/// percent-encoded, including every non-ASCII byte.
pub const URL_HOST_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'[')
    .remove(b']')
    .remove(b'_')
    .remove(b'~');

lazy_static! {
    // Anchored form of `(\d+\.\d+(\.\d+)*)?`; the empty string matches.
    static ref POLICY_OID: Regex = Regex::new(r"^(?:\d+\.\d+(?:\.\d+)*)?$").unwrap();
}

pub fn to_bool(text: &str) -> Option<bool> {
    match text {
        "True" | "true" | "yes" | "1" => Some(true),
        "False" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub fn first_uppercased(text: &str) -> String {
    let Some(first) = text.graphemes(true).next() else {
        return String::new();
    };

    let mut out = first.to_uppercase();
    out.push_str(&text[first.len()..]);
    out
}

pub fn url_encode(text: &str) -> String {
    utf8_percent_encode(text, URL_HOST_ENCODE_SET).to_string()
}

/// Percent-encodes UTF-16 code units with the URL host allowed set.
///
/// Returns `None` if `units` contains an unpaired surrogate, since such
/// input has no UTF-8 form to encode.
pub fn url_encode_utf16(units: &[u16]) -> Option<String> {
    let text: String = char::decode_utf16(units.iter().copied())
        .collect::<Result<_, _>>()
        .ok()?;
    Some(url_encode(&text))
}

pub fn url_decode(text: &str) -> Option<String> {
    percent_decode_str(text)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

pub fn is_valid_policy_oid(text: &str) -> bool {
    POLICY_OID.is_match(text)
}
