// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-node text variants.

use super::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The text variants attached to one dual-language content node.
///
/// A node may carry a variant for only one locale; resolving the other one
/// yields `None` and the node keeps whatever it currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText {
    variants: BTreeMap<Locale, String>,
}

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both variants at once, the common case for page copy.
    pub fn pair(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self::new().with(Locale::En, en).with(Locale::Es, es)
    }

    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.variants.insert(locale, text.into());
        self
    }

    /// Variant for `locale`. Empty strings count as missing.
    pub fn resolve(&self, locale: Locale) -> Option<&str> {
        self.variants
            .get(&locale)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Variant for `locale`, falling back to English.
    pub fn resolve_or_primary(&self, locale: Locale) -> Option<&str> {
        self.resolve(locale).or_else(|| self.resolve(Locale::En))
    }

    /// `true` when a variant is attached for `locale`, even an empty one.
    pub fn has_variant(&self, locale: Locale) -> bool {
        self.variants.contains_key(&locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_each_variant() {
        let text = LocalizedText::pair("Schedule", "Horario");
        assert_eq!(text.resolve(Locale::En), Some("Schedule"));
        assert_eq!(text.resolve(Locale::Es), Some("Horario"));
    }

    #[test]
    fn missing_and_empty_variants_resolve_to_none() {
        let text = LocalizedText::new().with(Locale::En, "Home").with(Locale::Es, "");
        assert_eq!(text.resolve(Locale::Es), None);
        assert!(text.has_variant(Locale::Es));
        assert_eq!(text.resolve_or_primary(Locale::Es), Some("Home"));
    }

    #[test]
    fn deserializes_from_code_keyed_map() {
        let text: LocalizedText =
            serde_json::from_str(r#"{"en":"Travel","es":"Viaje"}"#).expect("valid json");
        assert_eq!(text, LocalizedText::pair("Travel", "Viaje"));
    }
}
