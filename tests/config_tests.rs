// SPDX-License-Identifier: PMPL-1.0-or-later

//! Loading page configuration and page manifests from disk

use chrono::{Duration, NaiveDate};
use page_gate::clock::ManualClock;
use page_gate::config::PageConfig;
use page_gate::document::{Document, MemoryDocument};
use page_gate::i18n::Locale;
use page_gate::storage::MemoryStore;
use page_gate::PageController;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_yaml_config_overrides_selected_fields() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page.yaml");
    fs::write(
        &path,
        "secret: open-sesame\ncountdown_target: \"2027-01-01T18:30:00\"\nerror_clear_ms: 500\n",
    )
    .expect("write config");

    let config = PageConfig::load(&path).expect("yaml config loads");
    assert_eq!(config.secret, "open-sesame");
    assert_eq!(
        config.countdown_target,
        NaiveDate::from_ymd_opt(2027, 1, 1)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .expect("valid date")
    );
    assert_eq!(config.error_clear_delay(), Duration::milliseconds(500));
    assert_eq!(config.hide_delay_ms, 500);
    assert_eq!(config.terminal_message(Locale::Es), "¡Ya estamos casados!");
}

#[test]
fn test_json_config_with_custom_messages() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page.json");
    fs::write(
        &path,
        r#"{"terminal_messages":{"en":"Just married","es":"Recién casados"}}"#,
    )
    .expect("write config");

    let config = PageConfig::load(&path).expect("json config loads");
    assert_eq!(config.terminal_message(Locale::En), "Just married");
    assert_eq!(config.terminal_message(Locale::Es), "Recién casados");
}

#[test]
fn test_config_missing_a_theme_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page.json");
    fs::write(&path, r#"{"themes":{"en":"light"}}"#).expect("write config");
    let err = PageConfig::load(&path).expect_err("missing theme must fail");
    assert!(err.to_string().contains("theme"), "got {err}");
}

#[test]
fn test_config_with_oversized_delay_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    for field in ["tick_period_ms", "hide_delay_ms", "error_clear_ms"] {
        let path = dir.path().join(format!("{field}.json"));
        fs::write(&path, format!(r#"{{"{field}": 10000000000000000}}"#)).expect("write config");
        let err = PageConfig::load(&path).expect_err("oversized delay must fail");
        assert!(err.to_string().contains(field), "got {err}");
    }
}

#[test]
fn test_unvalidated_huge_delays_never_panic() {
    let config = PageConfig {
        tick_period_ms: 10_000_000_000_000_000,
        hide_delay_ms: 10_000_000_000_000_000,
        ..PageConfig::default()
    };
    let clock = ManualClock::new(
        NaiveDate::from_ymd_opt(2026, 10, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid date"),
    );
    let mut controller = PageController::new(
        page_gate::document::standard_page(),
        MemoryStore::new(),
        clock,
        config,
    );
    controller.start();
    controller.submit("password");
    assert!(controller.is_unlocked());
    assert_eq!(controller.run_due_timers(), 0);
}

#[test]
fn test_unreadable_config_reports_path() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.yaml");
    let err = PageConfig::load(&path).expect_err("missing file must fail");
    assert!(format!("{err:#}").contains("absent.yaml"));
}

#[test]
fn test_manifest_page_drives_controller() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page.yaml");
    fs::write(
        &path,
        r#"
root: body
nodes:
  - id: welcome
    localized: { en: Welcome, es: Bienvenidos }
    text: Welcome
  - id: page-home
    classes: [jl-page]
  - id: page-rsvp
    classes: [jl-page]
  - id: links
    classes: [jl-nav-links]
  - id: nav-home
    parent: links
  - id: nav-rsvp
    parent: links
"#,
    )
    .expect("write manifest");

    let document = MemoryDocument::load(&path).expect("manifest loads");
    assert!(document.contains("body"));

    let clock = ManualClock::new(
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date"),
    );
    let mut controller =
        PageController::new(document, MemoryStore::new(), clock, PageConfig::default());
    controller.start();
    controller.set_locale(Locale::Es);
    controller.show_section("rsvp");

    let doc = controller.document();
    assert_eq!(doc.text("welcome").as_deref(), Some("Bienvenidos"));
    assert!(doc.has_class("page-rsvp", "active"));
    assert!(!doc.has_class("page-home", "active"));
    assert!(doc.has_class("nav-rsvp", "active"));
}
