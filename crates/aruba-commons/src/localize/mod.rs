//! Localization tables and lookup.
//!
//! A [`Bundle`] holds named tables of translations, usually loaded from the
//! `.strings` files of one `<language>.lproj` directory. Lookups fall back
//! to the key itself when no translation exists.
//!
//! ```rust
//! use aruba_commons::localize::{Bundle, Table};
//! use aruba_commons::TextExt;
//!
//! let bundle = Bundle::new("app")
//!     .with_table("Localizable", [("hello", "Ciao")])
//!     .with_table("Errors", [("network", "Rete non disponibile")]);
//!
//! assert_eq!("hello".localized_in(None, &bundle, ""), "Ciao");
//! assert_eq!("missing".localized_in(None, &bundle, ""), "missing");
//! assert_eq!(Table::new("Errors", &bundle) >> "network", "Rete non disponibile");
//! ```

mod strings;

use std::collections::HashMap;
use std::fs;
use std::ops::Shr;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use once_cell::sync::OnceCell;

use crate::error::{BundleError, StringsParseError};

pub use strings::{decode_strings_source, parse_strings};

/// Table consulted when no table name is given.
pub const DEFAULT_TABLE: &str = "Localizable";

/// Name of the application bundle returned by [`Bundle::main`].
pub const MAIN_BUNDLE_NAME: &str = "main";

/// File extension of translation tables.
pub const STRINGS_EXTENSION: &str = "strings";

static MAIN_BUNDLE: OnceCell<Bundle> = OnceCell::new();

lazy_static! {
    static ref EMPTY_MAIN_BUNDLE: Bundle = Bundle::new(MAIN_BUNDLE_NAME);
}

/// Source of translations.
pub trait Localizer {
    /// Returns the translation of `key` in `table`, or in
    /// [`DEFAULT_TABLE`] when `table` is `None`.
    fn lookup(&self, key: &str, table: Option<&str>) -> Option<&str>;
}

/// Types that ship their own bundle, such as reusable components.
pub trait BundleOwner {
    fn bundle() -> &'static Bundle;
}

/// A named collection of translation tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    /// Reads the tables of `<dir>/<language>.lproj` into a new bundle.
    pub fn from_dir(
        name: impl Into<String>,
        dir: impl AsRef<Path>,
        language: &str,
    ) -> Result<Self, BundleError> {
        let mut bundle = Self::new(name);
        bundle.load_dir(dir, language)?;
        Ok(bundle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds or replaces one translation.
    pub fn insert(&mut self, table: &str, key: impl Into<String>, value: impl Into<String>) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Adds entries to `table`, replacing existing keys.
    pub fn with_table<I, K, V>(mut self, table: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.insert(table, key, value);
        }
        self
    }

    /// Returns the table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of translations across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a `.strings` source into `table` and returns the entry count.
    ///
    /// Later duplicates of a key replace earlier ones.
    pub fn load_strings(&mut self, table: &str, source: &str) -> Result<usize, StringsParseError> {
        let entries = parse_strings(source)?;
        let count = entries.len();
        for (key, value) in entries {
            self.insert(table, key, value);
        }
        tracing::debug!(bundle = %self.name, table, entries = count, "loaded strings table");
        Ok(count)
    }

    /// Loads every `*.strings` file in `<dir>/<language>.lproj`, one table
    /// per file named after the file stem. Returns the number of tables.
    ///
    /// Every file is read and parsed before any table is added, so on error
    /// the bundle is left unchanged. Files whose stem is not UTF-8 are
    /// skipped and not counted.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>, language: &str) -> Result<usize, BundleError> {
        let lproj = dir.as_ref().join(format!("{language}.lproj"));
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| BundleError::Io { path, source }
        };

        let mut files: Vec<PathBuf> = fs::read_dir(&lproj)
            .map_err(io_error(lproj.as_path()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(io_error(lproj.as_path()))?;
        files.retain(|path| path.extension().is_some_and(|ext| ext == STRINGS_EXTENSION));
        files.sort();

        let mut staged: Vec<(&str, Vec<(String, String)>)> = Vec::with_capacity(files.len());
        for path in &files {
            let Some(table) = path.file_stem().and_then(|stem| stem.to_str()) else {
                tracing::debug!(path = %path.display(), "skipping strings file with non-UTF-8 name");
                continue;
            };
            let bytes = fs::read(path).map_err(io_error(path.as_path()))?;
            let parse_error = |source| BundleError::Parse {
                path: path.clone(),
                source,
            };
            let source = decode_strings_source(&bytes).map_err(parse_error)?;
            staged.push((table, parse_strings(&source).map_err(parse_error)?));
        }

        let loaded = staged.len();
        for (table, entries) in staged {
            let count = entries.len();
            for (key, value) in entries {
                self.insert(table, key, value);
            }
            tracing::debug!(bundle = %self.name, table, entries = count, "loaded strings table");
        }

        Ok(loaded)
    }

    /// Returns the application bundle.
    ///
    /// Until [`Bundle::install_main`] is called this is an empty bundle, so
    /// every lookup falls back to its key.
    pub fn main() -> &'static Bundle {
        MAIN_BUNDLE.get().unwrap_or(&*EMPTY_MAIN_BUNDLE)
    }

    /// Installs the application bundle. Succeeds once; later calls return
    /// the rejected bundle.
    pub fn install_main(bundle: Bundle) -> Result<(), Bundle> {
        let name = bundle.name.clone();
        let entries = bundle.len();
        MAIN_BUNDLE.set(bundle)?;
        tracing::debug!(bundle = %name, entries, "installed main bundle");
        Ok(())
    }
}

impl Localizer for Bundle {
    fn lookup(&self, key: &str, table: Option<&str>) -> Option<&str> {
        self.tables
            .get(table.unwrap_or(DEFAULT_TABLE))?
            .get(key)
            .map(String::as_str)
    }
}

/// Returns the translation of `key`, or `key` itself when there is none.
pub(crate) fn localized_string<L: Localizer + ?Sized>(
    key: &str,
    table: Option<&str>,
    localizer: &L,
) -> String {
    match localizer.lookup(key, table) {
        Some(value) => value.to_string(),
        None => {
            tracing::trace!(key, table = table.unwrap_or(DEFAULT_TABLE), "missing translation");
            key.to_string()
        }
    }
}

/// A table of a bundle, looked up with `table >> key`.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    name: &'a str,
    bundle: &'a Bundle,
}

impl<'a> Table<'a> {
    pub fn new(name: &'a str, bundle: &'a Bundle) -> Self {
        Self { name, bundle }
    }

    /// The table `name` of the main bundle.
    pub fn main(name: &'a str) -> Self {
        Self::new(name, Bundle::main())
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn get(&self, key: &str) -> String {
        localized_string(key, Some(self.name), self.bundle)
    }
}

impl Shr<&str> for Table<'_> {
    type Output = String;

    fn shr(self, key: &str) -> String {
        self.get(key)
    }
}

/// Looks up `key` in `table` of the main bundle.
pub fn lookup(table: &str, key: &str) -> String {
    Table::main(table) >> key
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::TextExt;

    fn sample() -> Bundle {
        Bundle::new("sample")
            .with_table(DEFAULT_TABLE, [("greeting", "Ciao"), ("empty", "")])
            .with_table("Errors", [("network", "Rete non disponibile")])
    }

    struct Widget;

    lazy_static! {
        static ref WIDGET_BUNDLE: Bundle =
            Bundle::new("widget").with_table(DEFAULT_TABLE, [("widget.title", "Selettore")]);
    }

    impl BundleOwner for Widget {
        fn bundle() -> &'static Bundle {
            &WIDGET_BUNDLE
        }
    }

    #[test]
    fn test_lookup_default_and_named_tables() {
        let bundle = sample();
        assert_eq!(bundle.lookup("greeting", None), Some("Ciao"));
        assert_eq!(bundle.lookup("greeting", Some(DEFAULT_TABLE)), Some("Ciao"));
        assert_eq!(bundle.lookup("network", Some("Errors")), Some("Rete non disponibile"));
        assert_eq!(bundle.lookup("network", None), None);
        assert_eq!(bundle.lookup("greeting", Some("Missing")), None);
    }

    #[test]
    fn test_localized_falls_back_to_key() {
        let bundle = sample();
        assert_eq!("greeting".localized_in(None, &bundle, "home title"), "Ciao");
        assert_eq!("unknown.key".localized_in(None, &bundle, ""), "unknown.key");
        assert_eq!("network".localized_in(Some("Errors"), &bundle, ""), "Rete non disponibile");
        // An existing empty translation is returned as is.
        assert_eq!("empty".localized_in(None, &bundle, ""), "");
    }

    #[test]
    fn test_table_operator() {
        let bundle = sample();
        let errors = Table::new("Errors", &bundle);
        assert_eq!(errors >> "network", "Rete non disponibile");
        assert_eq!(errors >> "timeout", "timeout");
        assert_eq!(errors.name(), "Errors");
        assert_eq!(errors >> "network", "network".localized_in(Some("Errors"), &bundle, ""));
    }

    #[test]
    fn test_localized_for_owner() {
        assert_eq!("widget.title".localized_for::<Widget>(), "Selettore");
        assert_eq!("widget.other".localized_for::<Widget>(), "widget.other");
    }

    #[test]
    fn test_bundle_counts() {
        let bundle = sample();
        assert_eq!(bundle.len(), 3);
        assert!(!bundle.is_empty());
        assert_eq!(bundle.table_names(), vec!["Errors", DEFAULT_TABLE]);
        assert!(Bundle::new("none").is_empty());
    }

    #[test]
    fn test_load_strings_later_duplicate_wins() {
        let mut bundle = Bundle::new("dup");
        let count = bundle
            .load_strings("Localizable", "\"a\" = \"1\";\n\"a\" = \"2\";")
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(bundle.lookup("a", None), Some("2"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let lproj = dir.path().join("it.lproj");
        fs::create_dir(&lproj).unwrap();
        fs::write(lproj.join("Localizable.strings"), "\"hello\" = \"Ciao\";").unwrap();

        let mut utf16 = vec![0xFF, 0xFE];
        utf16.extend(
            "\"network\" = \"Rete\";"
                .encode_utf16()
                .flat_map(u16::to_le_bytes),
        );
        fs::write(lproj.join("Errors.strings"), utf16).unwrap();
        fs::write(lproj.join("notes.txt"), "ignored").unwrap();

        let bundle = Bundle::from_dir("app", dir.path(), "it").unwrap();
        assert_eq!(bundle.name(), "app");
        assert_eq!(bundle.table_names(), vec!["Errors", "Localizable"]);
        assert_eq!(bundle.lookup("hello", None), Some("Ciao"));
        assert_eq!(bundle.lookup("network", Some("Errors")), Some("Rete"));
    }

    #[test]
    fn test_load_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Bundle::from_dir("app", dir.path(), "fr"),
            Err(BundleError::Io { .. })
        ));

        let lproj = dir.path().join("fr.lproj");
        fs::create_dir(&lproj).unwrap();
        fs::write(lproj.join("Broken.strings"), "\"a\" = ").unwrap();
        let err = Bundle::from_dir("app", dir.path(), "fr").unwrap_err();
        match err {
            BundleError::Parse { path, source } => {
                assert!(path.ends_with("Broken.strings"));
                assert!(matches!(source, StringsParseError::UnexpectedEof { .. }));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_load_dir_leaves_bundle_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let lproj = dir.path().join("it.lproj");
        fs::create_dir(&lproj).unwrap();
        fs::write(lproj.join("A.strings"), "\"a\" = \"1\";").unwrap();
        fs::write(lproj.join("B.strings"), "\"b\" = ").unwrap();

        let mut bundle = sample();
        let before = bundle.clone();
        assert!(matches!(
            bundle.load_dir(dir.path(), "it"),
            Err(BundleError::Parse { .. })
        ));
        assert_eq!(bundle.table_names(), before.table_names());
        assert_eq!(bundle, before);
        assert_eq!(bundle.lookup("a", Some("A")), None);
    }

    #[test]
    fn test_load_dir_returns_table_count() {
        let dir = tempfile::tempdir().unwrap();
        let lproj = dir.path().join("es.lproj");
        fs::create_dir(&lproj).unwrap();
        fs::write(lproj.join("A.strings"), "\"a\" = \"1\";").unwrap();
        fs::write(lproj.join("B.strings"), "\"b\" = \"2\";").unwrap();
        fs::write(lproj.join("readme.txt"), "ignored").unwrap();

        let mut bundle = Bundle::new("app");
        assert_eq!(bundle.load_dir(dir.path(), "es").unwrap(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_load_dir_skips_non_utf8_names_in_count() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let lproj = dir.path().join("de.lproj");
        fs::create_dir(&lproj).unwrap();
        fs::write(lproj.join("Valid.strings"), "\"a\" = \"1\";").unwrap();
        fs::write(
            lproj.join(OsStr::from_bytes(b"bad\xFFname.strings")),
            "\"b\" = \"2\";",
        )
        .unwrap();

        let mut bundle = Bundle::new("app");
        assert_eq!(bundle.load_dir(dir.path(), "de").unwrap(), 1);
        assert_eq!(bundle.table_names(), vec!["Valid"]);
    }

    #[test]
    fn test_main_bundle_install_once() {
        let main = Bundle::new("app").with_table(DEFAULT_TABLE, [("main.only.key", "Principale")]);
        assert!(Bundle::install_main(main).is_ok());

        assert_eq!(Bundle::main().name(), "app");
        assert_eq!("main.only.key".localized(), "Principale");
        assert_eq!(lookup(DEFAULT_TABLE, "main.only.key"), "Principale");
        assert_eq!(lookup("Other", "main.only.key"), "main.only.key");

        let rejected = Bundle::install_main(Bundle::new("late")).unwrap_err();
        assert_eq!(rejected.name(), "late");
    }
}
