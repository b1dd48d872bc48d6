// SPDX-License-Identifier: PMPL-1.0-or-later

//! Bilingual text support for the page.
//!
//! ## Supported locales
//!
//! | Code | Locale  | Role      | Theme          |
//! |------|---------|-----------|----------------|
//! | en   | English | primary   | `usa-theme`    |
//! | es   | Spanish | secondary | `mexico-theme` |
//!
//! ## Design
//!
//! Page copy is attached to the content nodes themselves as a
//! [`LocalizedText`] map, so switching locale is a pure lookup per node.
//! Strings the controller produces on its own (the countdown's terminal
//! message, CLI labels) come from a small compile-time catalog queried
//! through [`t`], which falls back to English and never panics.

mod catalog;
mod localized;

pub use catalog::{t, Locale};
pub use localized::LocalizedText;
