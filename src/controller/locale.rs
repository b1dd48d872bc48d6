// SPDX-License-Identifier: PMPL-1.0-or-later

use super::PageController;
use crate::clock::Clock;
use crate::document::Document;
use crate::i18n::Locale;
use crate::storage::{Store, KEY_LANGUAGE};
use tracing::{debug, warn};

impl<D: Document, S: Store, C: Clock> PageController<D, S, C> {
    /// Show the page in `locale` and remember the choice.
    ///
    /// Updates every dual-language node and gallery caption that has a
    /// variant for `locale`, applies the locale's theme to the root and the
    /// gate overlay, and marks the matching button of each selector pair.
    pub fn set_locale(&mut self, locale: Locale) {
        self.state.locale = locale;

        let active = self.config.states.active.as_str();
        for pair in &self.config.selector_groups {
            if !(self.document.contains(&pair.en) && self.document.contains(&pair.es)) {
                continue;
            }
            for candidate in Locale::all() {
                self.document
                    .toggle_class(pair.button(*candidate), active, *candidate == locale);
            }
        }

        for id in self.document.select_localized() {
            let variant = self
                .document
                .localized(&id)
                .and_then(|text| text.resolve(locale).map(str::to_owned));
            if let Some(text) = variant {
                self.document.set_text(&id, &text);
            }
        }

        let elements = &self.config.elements;
        for item in self.document.select_class(&elements.photo_class) {
            let caption = self.document.child_with_class(&item, &elements.caption_class);
            let variant = self
                .document
                .localized(&item)
                .and_then(|text| text.resolve(locale).map(str::to_owned));
            if let (Some(caption), Some(text)) = (caption, variant) {
                self.document.set_text(&caption, &text);
            }
        }

        self.apply_theme(locale);
        self.persist(KEY_LANGUAGE, locale.code());
        debug!(%locale, "locale applied");
    }

    /// Apply the persisted locale, English when absent or unrecognised.
    pub fn restore_locale(&mut self) {
        let stored = self.store.get(KEY_LANGUAGE);
        let locale = match stored.as_deref() {
            Some(code) => Locale::from_code(code).unwrap_or_else(|| {
                warn!(code, "unrecognised persisted locale, using default");
                Locale::default()
            }),
            None => Locale::default(),
        };
        self.set_locale(locale);
    }

    fn apply_theme(&mut self, locale: Locale) {
        let theme = self.config.theme(locale).to_string();
        let root = self.document.root();
        self.document.replace_classes(&root, &[theme.as_str()]);

        let Some(overlay) = self.overlay() else {
            return;
        };
        let lock_class = self.config.elements.lock_screen_class.as_str();
        for other in Locale::all() {
            let other_theme = self.config.theme(*other);
            if other_theme != theme {
                self.document.toggle_class(&overlay, other_theme, false);
            }
        }
        self.document.toggle_class(&overlay, lock_class, true);
        self.document.toggle_class(&overlay, &theme, true);
    }
}
