//! Parser for Apple `.strings` translation tables.
//!
//! ```text
//! /* Greeting on the home screen */
//! "home.greeting" = "Ciao, %@!";
//! // Unquoted keys are allowed
//! ok_button = "OK";
//! "same.as.key";
//! ```
//!
//! An entry without a value maps the key to itself. Sources are UTF-8, or
//! UTF-16 when they start with a byte order mark.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::StringsParseError;

/// Decodes raw file bytes, honoring a UTF-8 or UTF-16 byte order mark.
pub fn decode_strings_source(bytes: &[u8]) -> Result<String, StringsParseError> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8(rest),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => decode_utf8(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, StringsParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| StringsParseError::InvalidUtf8)
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, StringsParseError> {
    if bytes.len() % 2 != 0 {
        return Err(StringsParseError::InvalidUtf16);
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| StringsParseError::InvalidUtf16)
}

/// Parses a `.strings` source into `(key, value)` pairs in file order.
pub fn parse_strings(source: &str) -> Result<Vec<(String, String)>, StringsParseError> {
    let mut reader = Reader::new(source);
    let mut entries = Vec::new();

    loop {
        reader.skip_trivia()?;
        if reader.peek().is_none() {
            break;
        }

        let key = reader.read_token("key")?;
        reader.skip_trivia()?;

        let value = if reader.peek() == Some(';') {
            key.clone()
        } else {
            reader.expect('=', "'='")?;
            reader.skip_trivia()?;
            reader.read_token("value")?
        };

        reader.skip_trivia()?;
        reader.expect(';', "';'")?;
        entries.push((key, value));
    }

    Ok(entries)
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':' | '/' | '-')
}

/// Character reader that tracks the current line for error reporting.
struct Reader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn next_or_eof(&mut self, context: &'static str) -> Result<char, StringsParseError> {
        self.next().ok_or(StringsParseError::UnexpectedEof {
            line: self.line,
            context,
        })
    }

    fn expect(&mut self, expected: char, context: &'static str) -> Result<(), StringsParseError> {
        let line = self.line;
        match self.next_or_eof(context)? {
            c if c == expected => Ok(()),
            found => Err(StringsParseError::UnexpectedChar {
                line,
                found,
                context,
            }),
        }
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), StringsParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.next();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some('/') => self.skip_line_comment(),
                        Some('*') => self.skip_block_comment()?,
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.next() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), StringsParseError> {
        // Opening "/*"
        self.next();
        self.next();
        loop {
            if self.next_or_eof("comment")? == '*' && self.peek() == Some('/') {
                self.next();
                return Ok(());
            }
        }
    }

    fn read_token(&mut self, context: &'static str) -> Result<String, StringsParseError> {
        match self.peek() {
            Some('"') => {
                self.next();
                self.read_quoted(context)
            }
            Some(c) if is_bare_char(c) => {
                let mut token = String::new();
                while let Some(c) = self.peek().filter(|c| is_bare_char(*c)) {
                    token.push(c);
                    self.next();
                }
                Ok(token)
            }
            Some(found) => Err(StringsParseError::UnexpectedChar {
                line: self.line,
                found,
                context,
            }),
            None => Err(StringsParseError::UnexpectedEof {
                line: self.line,
                context,
            }),
        }
    }

    fn read_quoted(&mut self, context: &'static str) -> Result<String, StringsParseError> {
        let mut out = String::new();
        loop {
            match self.next_or_eof(context)? {
                '"' => return Ok(out),
                '\\' => out.push(self.read_escape(context)?),
                c => out.push(c),
            }
        }
    }

    fn read_escape(&mut self, context: &'static str) -> Result<char, StringsParseError> {
        let c = self.next_or_eof(context)?;
        let escaped = match c {
            '"' => '"',
            '\\' => '\\',
            '\'' => '\'',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'u' | 'U' => return self.read_unicode_escape(c, context),
            other => {
                return Err(StringsParseError::InvalidEscape {
                    line: self.line,
                    escape: format!("\\{other}"),
                });
            }
        };
        Ok(escaped)
    }

    /// Reads `XXXX` after `\u`, joining a following `\uXXXX` low surrogate.
    fn read_unicode_escape(
        &mut self,
        marker: char,
        context: &'static str,
    ) -> Result<char, StringsParseError> {
        let high = self.read_hex4(marker, context)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.invalid_escape(marker, high));
        }

        let line = self.line;
        let low = match (self.next_or_eof(context)?, self.next_or_eof(context)?) {
            ('\\', 'u' | 'U') => self.read_hex4(marker, context)?,
            _ => {
                return Err(StringsParseError::InvalidEscape {
                    line,
                    escape: format!("\\{marker}{high:04X}"),
                });
            }
        };

        char::decode_utf16([high as u16, low as u16])
            .next()
            .and_then(Result::ok)
            .ok_or_else(|| self.invalid_escape(marker, low))
    }

    fn read_hex4(&mut self, marker: char, context: &'static str) -> Result<u32, StringsParseError> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            digits.push(self.next_or_eof(context)?);
        }
        u32::from_str_radix(&digits, 16).map_err(|_| StringsParseError::InvalidEscape {
            line: self.line,
            escape: format!("\\{marker}{digits}"),
        })
    }

    fn invalid_escape(&self, marker: char, value: u32) -> StringsParseError {
        StringsParseError::InvalidEscape {
            line: self.line,
            escape: format!("\\{marker}{value:04X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_entries_and_comments() {
        let source = r#"
/* Home screen */
"home.title" = "Benvenuto";
// Buttons
"button.ok" = "OK"; "button.cancel"="Annulla";
"#;
        assert_eq!(
            parse_strings(source).unwrap(),
            pairs(&[
                ("home.title", "Benvenuto"),
                ("button.ok", "OK"),
                ("button.cancel", "Annulla"),
            ])
        );
    }

    #[test]
    fn test_parse_bare_words_and_key_only() {
        let source = "ok_button = OK;\n\"same.key\";\n";
        assert_eq!(
            parse_strings(source).unwrap(),
            pairs(&[("ok_button", "OK"), ("same.key", "same.key")])
        );
    }

    #[test]
    fn test_parse_escapes() {
        let source = r#""quote" = "say \"hi\"\n\ttab \\ \U00E8 \UD83D\UDE00";"#;
        let entries = parse_strings(source).unwrap();
        assert_eq!(entries[0].1, "say \"hi\"\n\ttab \\ è 😀");
    }

    #[test]
    fn test_parse_empty_and_comment_only() {
        assert!(parse_strings("").unwrap().is_empty());
        assert!(parse_strings("/* nothing */\n// here\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors_report_line() {
        assert_eq!(
            parse_strings("\"a\" = \"b\";\n\"c\" \"d\";"),
            Err(StringsParseError::UnexpectedChar {
                line: 2,
                found: '"',
                context: "'='",
            })
        );
        assert_eq!(
            parse_strings("\"a\" = \"b\""),
            Err(StringsParseError::UnexpectedEof {
                line: 1,
                context: "';'",
            })
        );
        assert_eq!(
            parse_strings("\"a\" = \"unterminated;\n"),
            Err(StringsParseError::UnexpectedEof {
                line: 2,
                context: "value",
            })
        );
        assert!(matches!(
            parse_strings(r#""a" = "\q";"#),
            Err(StringsParseError::InvalidEscape { line: 1, .. })
        ));
        assert!(matches!(
            parse_strings("/* open"),
            Err(StringsParseError::UnexpectedEof { context: "comment", .. })
        ));
    }

    #[test]
    fn test_decode_sources() {
        assert_eq!(decode_strings_source(b"\xEF\xBB\xBFabc").unwrap(), "abc");
        assert_eq!(decode_strings_source(b"abc").unwrap(), "abc");

        let mut le = vec![0xFF, 0xFE];
        le.extend("città".encode_utf16().flat_map(u16::to_le_bytes));
        assert_eq!(decode_strings_source(&le).unwrap(), "città");

        let mut be = vec![0xFE, 0xFF];
        be.extend("città".encode_utf16().flat_map(u16::to_be_bytes));
        assert_eq!(decode_strings_source(&be).unwrap(), "città");

        assert_eq!(
            decode_strings_source(&[0xFF, 0xFE, 0x61]),
            Err(StringsParseError::InvalidUtf16)
        );
        assert_eq!(
            decode_strings_source(&[0xC3, 0x28]),
            Err(StringsParseError::InvalidUtf8)
        );
    }
}
