//! Aruba Commons: string and color helpers for application code.
//!
//! This crate collects small, independent utilities that application and
//! UI code tends to rewrite in every project.
//!
//! # Overview
//!
//! - **Text**: grapheme-aware slicing, boolean coercion, trimming, URL
//!   percent-encoding and OID validation, all as methods on `str` through
//!   [`TextExt`]
//! - **Dates**: parsing with Unicode date patterns under an explicit locale
//!   and time zone
//! - **Localization**: `.strings` translation tables grouped in bundles
//! - **Colors**: checked construction from 8-bit channels
//!
//! # Quick Start
//!
//! ```rust
//! use aruba_commons::{Color, DateOptions, TextExt};
//! use aruba_commons::localize::Bundle;
//!
//! // Character offsets count user-perceived characters
//! assert_eq!("città vecchia".substring_to(5).unwrap(), "città");
//! assert_eq!("maybe".to_bool(), None);
//!
//! // Dates parse against a pattern
//! let date = "15/03/2024".date("dd/MM/yyyy", &DateOptions::utc()).unwrap();
//! assert_eq!(date.to_rfc3339(), "2024-03-15T00:00:00+00:00");
//!
//! // Missing translations fall back to the key
//! let bundle = Bundle::new("app").with_table("Localizable", [("ok", "Va bene")]);
//! assert_eq!("ok".localized_in(None, &bundle, "confirm button"), "Va bene");
//!
//! // Out-of-range channels are errors, never clamped
//! assert!(Color::from_rgb(255, 0, 0).is_ok());
//! assert!(Color::from_rgb(256, 0, 0).is_err());
//! ```
//!
//! # Modules
//!
//! - [`text`]: the [`TextExt`] trait
//! - [`date`]: date patterns, [`Locale`], [`TimeZone`]
//! - [`localize`]: [`Bundle`], `.strings` parsing, table lookup
//! - [`color`]: [`Color`]
//! - [`error`]: Error types
//!
//! # Error Handling
//!
//! Operations whose input may simply not conform (date parsing, boolean
//! coercion, URL decoding) return `Option`. Offsets outside the text and
//! invalid color components return a `Result` with a descriptive error;
//! nothing in this crate panics on bad input.

pub mod color;
pub mod date;
pub mod error;
pub mod localize;
pub mod text;

// Re-export commonly used types at crate root
pub use color::{Channel, Color};
pub use date::{DateOptions, DatePattern, Locale, TimeZone};
pub use error::{BundleError, ColorError, PatternError, StringsParseError, TextError};
pub use localize::{Bundle, BundleOwner, Localizer, Table, lookup};
pub use text::{TextExt, url_encode_utf16};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
