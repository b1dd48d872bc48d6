// SPDX-License-Identifier: PMPL-1.0-or-later

use super::PageController;
use crate::clock::Clock;
use crate::document::Document;
use crate::storage::{Store, KEY_SECTION};
use tracing::debug;

impl<D: Document, S: Store, C: Clock> PageController<D, S, C> {
    /// Make `section` the only visible section and highlight its nav link.
    ///
    /// An unknown section leaves every section hidden, but is still
    /// recorded and persisted.
    pub fn show_section(&mut self, section: &str) {
        let elements = &self.config.elements;
        let active = self.config.states.active.as_str();

        for page in self.document.select_class(&elements.page_class) {
            self.document.toggle_class(&page, active, false);
        }
        let target = self.config.section_id(section);
        if self.document.contains(&target) {
            self.document.toggle_class(&target, active, true);
        } else {
            debug!(section, "no such section, nothing shown");
        }

        for link in self.document.select_within(&elements.nav_links_class) {
            self.document.toggle_class(&link, active, false);
        }
        let nav = self.config.nav_id(section);
        if self.document.contains(&nav) {
            self.document.toggle_class(&nav, active, true);
        }

        self.state.section = section.to_string();
        self.persist(KEY_SECTION, section);
    }

    /// Show the persisted section, or the home section when nothing was
    /// persisted or the persisted one no longer exists.
    pub fn restore_section(&mut self) {
        let home = self.config.home_section.clone();
        let section = match self.store.get(KEY_SECTION) {
            Some(saved) if self.document.contains(&self.config.section_id(&saved)) => saved,
            Some(saved) => {
                debug!(section = %saved, "persisted section missing, falling back to home");
                home
            }
            None => home,
        };
        self.show_section(&section);
    }

    pub fn current_section(&self) -> &str {
        &self.state.section
    }
}
