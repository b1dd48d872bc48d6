// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale definitions and the built-in string catalog.
//!
//! The page only ever speaks two languages. English is the primary locale
//! and the fallback for everything; Spanish is the secondary one. Page copy
//! itself lives on the content nodes (see [`super::LocalizedText`]); this
//! catalog only holds the strings the controller and the CLI emit on their
//! own, such as the countdown's terminal message.
//!
//! ## Adding a new key
//!
//! 1. Add the English entry to `EN`
//! 2. Add the Spanish entry to `ES` (missing keys fall back to English)

use serde::{Deserialize, Serialize};

/// Supported page locales.
///
/// Each variant maps to the ISO 639-1 code that is persisted under
/// `preferredLanguage` and used to pick the variant of every dual-language
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
}

impl Locale {
    /// ISO 639-1 two-letter code for this locale.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Parse a persisted code. Case-sensitive, like the stored values.
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    /// All supported locales, in selector order.
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Es]
    }

    /// Theme class applied to the document root and the gate overlay.
    pub fn default_theme(&self) -> &'static str {
        match self {
            Locale::En => "usa-theme",
            Locale::Es => "mexico-theme",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─── Translation Lookup ─────────────────────────────────────────────

/// Look up a catalog key in the given locale.
///
/// Falls back to English when the key is missing in Spanish, and to the
/// empty string when it is missing everywhere.
pub fn t(locale: Locale, key: &str) -> &'static str {
    if let Some(value) = lookup(catalog_for(locale), key) {
        return value;
    }
    if locale != Locale::En {
        if let Some(value) = lookup(EN, key) {
            return value;
        }
    }
    ""
}

fn lookup(catalog: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
}

fn catalog_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Es => ES,
    }
}

// ─── English ────────────────────────────────────────────────────────

const EN: &[(&str, &str)] = &[
    ("countdown.finished", "We're Married!"),
    ("status.title", "Page state"),
    ("status.locale", "Language"),
    ("status.gate", "Gate"),
    ("status.section", "Section"),
    ("status.countdown", "Countdown"),
    ("gate.locked", "locked"),
    ("gate.unlocked", "unlocked"),
    ("gate.rejected", "Wrong password, try again"),
    ("countdown.days", "days"),
    ("countdown.hours", "hours"),
    ("countdown.minutes", "minutes"),
    ("countdown.seconds", "seconds"),
];

// ─── Spanish ────────────────────────────────────────────────────────

const ES: &[(&str, &str)] = &[
    ("countdown.finished", "¡Ya estamos casados!"),
    ("status.title", "Estado de la página"),
    ("status.locale", "Idioma"),
    ("status.gate", "Acceso"),
    ("status.section", "Sección"),
    ("status.countdown", "Cuenta regresiva"),
    ("gate.locked", "bloqueado"),
    ("gate.unlocked", "desbloqueado"),
    ("gate.rejected", "Contraseña incorrecta, inténtalo de nuevo"),
    ("countdown.days", "días"),
    ("countdown.hours", "horas"),
    ("countdown.minutes", "minutos"),
    ("countdown.seconds", "segundos"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_keys_all_resolve() {
        for &(key, _) in EN {
            assert!(!t(Locale::En, key).is_empty(), "EN key '{}' should resolve", key);
        }
    }

    #[test]
    fn terminal_messages_match_page_copy() {
        assert_eq!(t(Locale::En, "countdown.finished"), "We're Married!");
        assert_eq!(t(Locale::Es, "countdown.finished"), "¡Ya estamos casados!");
    }

    #[test]
    fn unknown_key_returns_empty() {
        assert_eq!(t(Locale::Es, "nonexistent.key"), "");
    }

    #[test]
    fn locale_codes_roundtrip() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_code(locale.code()), Some(*locale));
        }
        assert_eq!(Locale::from_code("EN"), None);
        assert_eq!(Locale::from_code("fr"), None);
    }

    #[test]
    fn themes_differ_per_locale() {
        assert_eq!(Locale::En.default_theme(), "usa-theme");
        assert_eq!(Locale::Es.default_theme(), "mexico-theme");
    }

    #[test]
    fn catalogs_have_same_key_count() {
        assert_eq!(ES.len(), EN.len(), "ES catalog key count mismatch");
    }
}
