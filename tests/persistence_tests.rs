// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reload behaviour: state written by one page load is restored by the next

use chrono::{NaiveDate, NaiveDateTime};
use page_gate::clock::ManualClock;
use page_gate::config::PageConfig;
use page_gate::document::{standard_page, Document, MemoryDocument};
use page_gate::i18n::Locale;
use page_gate::storage::{FileStore, MemoryStore, Store, KEY_LANGUAGE, KEY_UNLOCKED};
use page_gate::PageController;
use std::fs;
use tempfile::TempDir;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 9, 1)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .expect("valid date")
}

fn load<S: Store>(store: S) -> PageController<MemoryDocument, S, ManualClock> {
    let mut controller = PageController::new(
        standard_page(),
        store,
        ManualClock::new(now()),
        PageConfig::default(),
    );
    controller.start();
    controller
}

#[test]
fn test_reload_restores_locale_gate_and_section() {
    let mut first = load(MemoryStore::new());
    first.set_locale(Locale::Es);
    first.submit("password");
    first.show_section("schedule");
    let store = first.store().clone();
    drop(first);

    let second = load(store);
    let state = second.state();
    assert_eq!(state.locale, Locale::Es);
    assert!(state.gate.is_unlocked());
    assert_eq!(state.section, "schedule");
    assert!(!second.document().is_displayed("lockScreen"));
    assert_eq!(
        second.document().text("page-schedule-title").as_deref(),
        Some("Horario")
    );
}

#[test]
fn test_unlock_survives_any_number_of_reloads() {
    let mut controller = load(MemoryStore::new());
    controller.submit("password");
    let mut store = controller.store().clone();
    drop(controller);

    for _ in 0..3 {
        let mut reloaded = load(store);
        reloaded.submit("wrong");
        assert!(reloaded.is_unlocked());
        store = reloaded.store().clone();
    }
    assert_eq!(store.get(KEY_UNLOCKED).as_deref(), Some("true"));
}

#[test]
fn test_file_store_carries_state_between_loads() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page-state.json");

    {
        let mut controller = load(FileStore::open(&path).expect("open store"));
        controller.set_locale(Locale::Es);
        controller.submit("password");
    }

    let content = fs::read_to_string(&path).expect("state file written");
    assert!(content.contains("\"isUnlocked\": \"true\""));

    let controller = load(FileStore::open(&path).expect("reopen store"));
    assert_eq!(controller.state().locale, Locale::Es);
    assert!(controller.is_unlocked());
    assert_eq!(controller.store().get(KEY_LANGUAGE).as_deref(), Some("es"));
}

#[test]
fn test_cleared_file_store_locks_again() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page-state.json");
    {
        let mut controller = load(FileStore::open(&path).expect("open store"));
        controller.submit("password");
    }

    let mut store = FileStore::open(&path).expect("reopen store");
    store.clear().expect("clear store");

    let controller = load(FileStore::open(&path).expect("reopen cleared store"));
    assert!(!controller.is_unlocked());
    assert!(controller.document().is_displayed("lockScreen"));
}
