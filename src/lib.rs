// SPDX-License-Identifier: PMPL-1.0-or-later

//! Page-Gate: state controller for a bilingual, password-gated event page.
//!
//! The crate drives a single static page with four behaviours:
//!
//! 1. **Locale**: every dual-language node, the theme and the language
//!    selectors follow one of two locales, persisted across reloads.
//! 2. **Gate**: an overlay hides the page until the shared password is
//!    entered once; the unlock is persisted.
//! 3. **Navigation**: exactly one content section is visible at a time and
//!    the last one shown is restored on reload.
//! 4. **Countdown**: the time left until the event is re-rendered every
//!    second and replaced by a celebration message once it has passed.
//!
//! The page itself, its preference store and the wall clock are reached
//! through the [`document::Document`], [`storage::Store`] and
//! [`clock::Clock`] traits, so the [`controller::PageController`] runs the
//! same against a browser binding, the in-memory tree used by the CLI, or a
//! test fixture.

pub mod clock;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod document;
pub mod events;
pub mod gate;
pub mod i18n;
pub mod storage;
pub mod timers;

pub use controller::{PageController, PageState};
