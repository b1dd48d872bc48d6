// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed page configuration.
//!
//! Defaults reproduce the live page exactly; a YAML or JSON file can
//! override any subset of fields. Nothing here is persisted or changed at
//! runtime.

use crate::i18n::{t, Locale, LocalizedText};
use anyhow::{ensure, Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound for every configured delay and period: one day.
pub const MAX_DELAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Shared gate password, compared by exact, case-sensitive equality.
    pub secret: String,
    /// Local wall time the countdown runs to.
    pub countdown_target: NaiveDateTime,
    /// Shown in place of the countdown once the target has passed.
    pub terminal_messages: LocalizedText,
    /// Class applied to the root and the gate overlay per locale.
    pub themes: LocalizedText,
    pub hide_delay_ms: u64,
    pub error_clear_ms: u64,
    pub tick_period_ms: u64,
    /// Section shown when nothing (valid) was persisted.
    pub home_section: String,
    pub elements: ElementIds,
    pub states: StateClasses,
    /// Locale buttons, updated pairwise.
    pub selector_groups: Vec<SelectorPair>,
    /// Elements that force one locale when clicked.
    pub name_triggers: Vec<NameTrigger>,
}

/// Ids and structural classes of the page elements the controller drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub lock_screen_class: String,
    pub lock_error_class: String,
    pub password_input: String,
    pub unlock_button: String,
    pub page_class: String,
    pub page_prefix: String,
    pub nav_links_class: String,
    pub nav_prefix: String,
    pub photo_class: String,
    pub caption_class: String,
    pub countdown: String,
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Classes toggled to express state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateClasses {
    pub active: String,
    pub hidden: String,
    pub error: String,
    pub show: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPair {
    pub en: String,
    pub es: String,
}

impl SelectorPair {
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            es: es.into(),
        }
    }

    pub fn button(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTrigger {
    pub id: String,
    pub locale: Locale,
}

impl Default for PageConfig {
    fn default() -> Self {
        let mut terminal_messages = LocalizedText::new();
        let mut themes = LocalizedText::new();
        for locale in Locale::all() {
            terminal_messages = terminal_messages.with(*locale, t(*locale, "countdown.finished"));
            themes = themes.with(*locale, locale.default_theme());
        }
        Self {
            secret: "password".to_string(),
            countdown_target: default_target(),
            terminal_messages,
            themes,
            hide_delay_ms: 500,
            error_clear_ms: 2000,
            tick_period_ms: 1000,
            home_section: "home".to_string(),
            elements: ElementIds::default(),
            states: StateClasses::default(),
            selector_groups: vec![
                SelectorPair::new("btnEnglish", "btnSpanish"),
                SelectorPair::new("lockBtnEnglish", "lockBtnSpanish"),
            ],
            name_triggers: vec![
                NameTrigger {
                    id: "nameLily".to_string(),
                    locale: Locale::Es,
                },
                NameTrigger {
                    id: "nameJames".to_string(),
                    locale: Locale::En,
                },
            ],
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            lock_screen_class: "jl-lock-screen".to_string(),
            lock_error_class: "jl-lock-error".to_string(),
            password_input: "lockPassword".to_string(),
            unlock_button: "unlockBtn".to_string(),
            page_class: "jl-page".to_string(),
            page_prefix: "page-".to_string(),
            nav_links_class: "jl-nav-links".to_string(),
            nav_prefix: "nav-".to_string(),
            photo_class: "jl-simple-photo".to_string(),
            caption_class: "jl-simple-caption".to_string(),
            countdown: "jlCountdown".to_string(),
            days: "jlDays".to_string(),
            hours: "jlHours".to_string(),
            minutes: "jlMins".to_string(),
            seconds: "jlSecs".to_string(),
        }
    }
}

impl Default for StateClasses {
    fn default() -> Self {
        Self {
            active: "active".to_string(),
            hidden: "hidden".to_string(),
            error: "error".to_string(),
            show: "show".to_string(),
        }
    }
}

/// Saturates at [`Duration::MAX`] for values `validate` would reject.
fn millis(ms: u64) -> Duration {
    i64::try_from(ms)
        .ok()
        .and_then(Duration::try_milliseconds)
        .unwrap_or(Duration::MAX)
}

fn default_target() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 4)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

impl PageConfig {
    /// Load overrides from `path`; `.yaml`/`.yml` as YAML, otherwise JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading page config {}", path.display()))?;
        let config: PageConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml page config {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("parsing json page config {}", path.display()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_period_ms > 0, "tick_period_ms must be positive");
        for (name, value) in [
            ("hide_delay_ms", self.hide_delay_ms),
            ("error_clear_ms", self.error_clear_ms),
            ("tick_period_ms", self.tick_period_ms),
        ] {
            ensure!(
                value <= MAX_DELAY_MS,
                "{} must be at most {} ms, got {}",
                name,
                MAX_DELAY_MS,
                value
            );
        }
        ensure!(!self.home_section.is_empty(), "home_section cannot be empty");
        for locale in Locale::all() {
            ensure!(
                self.themes.resolve(*locale).is_some(),
                "missing theme for locale '{}'",
                locale
            );
            ensure!(
                self.terminal_messages.resolve(*locale).is_some(),
                "missing terminal message for locale '{}'",
                locale
            );
        }
        Ok(())
    }

    pub fn hide_delay(&self) -> Duration {
        millis(self.hide_delay_ms)
    }

    pub fn error_clear_delay(&self) -> Duration {
        millis(self.error_clear_ms)
    }

    pub fn tick_period(&self) -> Duration {
        millis(self.tick_period_ms)
    }

    pub fn theme(&self, locale: Locale) -> &str {
        self.themes
            .resolve(locale)
            .unwrap_or_else(|| locale.default_theme())
    }

    pub fn terminal_message(&self, locale: Locale) -> &str {
        self.terminal_messages
            .resolve_or_primary(locale)
            .unwrap_or_else(|| t(locale, "countdown.finished"))
    }

    pub fn section_id(&self, section: &str) -> String {
        format!("{}{}", self.elements.page_prefix, section)
    }

    pub fn nav_id(&self, section: &str) -> String {
        format!("{}{}", self.elements.nav_prefix, section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_live_page() {
        let config = PageConfig::default();
        assert_eq!(config.secret, "password");
        assert_eq!(config.countdown_target.to_string(), "2026-10-04 00:00:00");
        assert_eq!(config.theme(Locale::Es), "mexico-theme");
        assert_eq!(config.terminal_message(Locale::En), "We're Married!");
        assert_eq!(config.hide_delay(), Duration::milliseconds(500));
        assert_eq!(config.error_clear_delay(), Duration::seconds(2));
        assert_eq!(config.section_id("home"), "page-home");
        assert_eq!(config.nav_id("travel"), "nav-travel");
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn zero_tick_period_is_rejected() {
        let config = PageConfig {
            tick_period_ms: 0,
            ..PageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_delays_saturate_instead_of_wrapping() {
        let config = PageConfig {
            hide_delay_ms: u64::MAX,
            ..PageConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.hide_delay(), Duration::MAX);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: PageConfig =
            serde_json::from_str(r#"{"secret":"s3cret","elements":{"days":"d"}}"#)
                .expect("partial config parses");
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.elements.days, "d");
        assert_eq!(config.elements.hours, "jlHours");
        assert_eq!(config.selector_groups.len(), 2);
    }
}
