//! Locale symbols used when parsing month names, weekdays and AM/PM markers.

use std::env;

/// Month, weekday and day-period names for one language.
///
/// Weekday arrays start on Sunday.
#[derive(Debug, PartialEq, Eq)]
pub struct Symbols {
    pub months: [&'static str; 12],
    pub short_months: [&'static str; 12],
    pub weekdays: [&'static str; 7],
    pub short_weekdays: [&'static str; 7],
    pub am: &'static str,
    pub pm: &'static str,
}

static ENGLISH: Symbols = Symbols {
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    short_months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ],
    short_weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    am: "AM",
    pm: "PM",
};

static ITALIAN: Symbols = Symbols {
    months: [
        "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
        "settembre", "ottobre", "novembre", "dicembre",
    ],
    short_months: [
        "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
    ],
    weekdays: [
        "domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato",
    ],
    short_weekdays: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
    am: "AM",
    pm: "PM",
};

static FRENCH: Symbols = Symbols {
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    short_months: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    weekdays: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    short_weekdays: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    am: "AM",
    pm: "PM",
};

static GERMAN: Symbols = Symbols {
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    short_months: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays: [
        "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
    ],
    short_weekdays: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    am: "AM",
    pm: "PM",
};

static SPANISH: Symbols = Symbols {
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
        "septiembre", "octubre", "noviembre", "diciembre",
    ],
    short_months: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays: [
        "domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado",
    ],
    short_weekdays: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    am: "a. m.",
    pm: "p. m.",
};

/// Identifier used when no locale is configured in the environment.
pub const POSIX_IDENTIFIER: &str = "en_US_POSIX";

/// A locale identifier paired with the symbols used to parse dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    identifier: String,
    symbols: &'static Symbols,
}

impl Locale {
    pub fn english() -> Self {
        Self::from_identifier(POSIX_IDENTIFIER)
    }

    pub fn italian() -> Self {
        Self::from_identifier("it_IT")
    }

    pub fn french() -> Self {
        Self::from_identifier("fr_FR")
    }

    pub fn german() -> Self {
        Self::from_identifier("de_DE")
    }

    pub fn spanish() -> Self {
        Self::from_identifier("es_ES")
    }

    /// Creates a locale from an identifier such as `it_IT` or `fr-CA`.
    ///
    /// Symbols are chosen by language code. Unknown languages get English
    /// symbols but keep their identifier.
    pub fn from_identifier(identifier: &str) -> Self {
        let language = identifier
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let symbols = match language.as_str() {
            "it" => &ITALIAN,
            "fr" => &FRENCH,
            "de" => &GERMAN,
            "es" => &SPANISH,
            _ => &ENGLISH,
        };

        Self {
            identifier: identifier.to_string(),
            symbols,
        }
    }

    /// Returns the locale configured for the process.
    ///
    /// Reads `LC_ALL`, `LC_TIME` and `LANG` in that order. Encoding and
    /// modifier suffixes (`.UTF-8`, `@euro`) are dropped. `C`, `POSIX` or no
    /// setting at all yield `en_US_POSIX`.
    pub fn current() -> Self {
        let configured = ["LC_ALL", "LC_TIME", "LANG"]
            .into_iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty());

        match configured {
            Some(value) => Self::from_posix_value(&value),
            None => Self::english(),
        }
    }

    fn from_posix_value(value: &str) -> Self {
        let identifier = value
            .split(['.', '@'])
            .next()
            .unwrap_or_default();

        match identifier {
            "" | "C" | "POSIX" => Self::english(),
            id => Self::from_identifier(id),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn symbols(&self) -> &'static Symbols {
        self.symbols
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}
