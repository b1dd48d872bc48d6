// SPDX-License-Identifier: PMPL-1.0-or-later

//! User-triggered page events and the actions they are bound to.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};

/// Something the visitor did to an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    Click { target: String },
    KeyPress { target: String, key: String },
}

impl PageEvent {
    pub fn click(target: impl Into<String>) -> Self {
        PageEvent::Click {
            target: target.into(),
        }
    }

    pub fn key_press(target: impl Into<String>, key: impl Into<String>) -> Self {
        PageEvent::KeyPress {
            target: target.into(),
            key: key.into(),
        }
    }

    pub fn target(&self) -> &str {
        match self {
            PageEvent::Click { target } | PageEvent::KeyPress { target, .. } => target,
        }
    }
}

/// Which handler an element was wired to at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Locale button or name trigger.
    SetLocale(Locale),
    /// Submit control: read the secret field and submit it.
    SubmitSecret,
    /// Secret field: submit on `Enter`.
    SubmitOnEnter,
    /// Navigation link: show the section named by the link id.
    Navigate,
}

impl Action {
    /// Whether `event` triggers this action.
    pub fn accepts(&self, event: &PageEvent) -> bool {
        match (self, event) {
            (
                Action::SetLocale(_) | Action::SubmitSecret | Action::Navigate,
                PageEvent::Click { .. },
            ) => true,
            (Action::SubmitOnEnter, PageEvent::KeyPress { key, .. }) => key == "Enter",
            _ => false,
        }
    }
}
