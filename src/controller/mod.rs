// SPDX-License-Identifier: PMPL-1.0-or-later

//! The page-state controller.
//!
//! [`PageController`] owns everything the page script used to keep in
//! globals: the current locale, the gate state and the active section, plus
//! the document it renders into, the preference store, the clock and every
//! pending timer. Operations are split by concern:
//!
//! - `locale`: switch text, theme and selector highlighting
//! - `gate`: password submission and overlay teardown
//! - `navigator`: one visible section at a time
//! - `countdown`: periodic remaining-time rendering
//!
//! All operations are total. Missing elements are skipped, unknown
//! persisted values fall back to defaults, and a failed store write is
//! logged without interrupting the operation.

mod countdown;
mod gate;
mod locale;
mod navigator;

use crate::clock::Clock;
use crate::config::PageConfig;
use crate::document::Document;
use crate::events::{Action, PageEvent};
use crate::gate::GateState;
use crate::i18n::Locale;
use crate::storage::Store;
use crate::timers::{TimerHandle, TimerQueue};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Observable controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub locale: Locale,
    pub gate: GateState,
    pub section: String,
    pub countdown_finished: bool,
}

/// Deferred work the controller schedules on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    /// Remove the faded-out overlay from layout.
    HideOverlay,
    /// Reset the secret field after a rejected attempt.
    ClearGateError,
    CountdownTick,
}

pub struct PageController<D: Document, S: Store, C: Clock> {
    document: D,
    store: S,
    clock: C,
    config: PageConfig,
    state: PageState,
    timers: TimerQueue<TimerTask>,
    countdown_timer: Option<TimerHandle>,
    bindings: BTreeMap<String, Action>,
    started: bool,
}

impl<D: Document, S: Store, C: Clock> PageController<D, S, C> {
    pub fn new(document: D, store: S, clock: C, config: PageConfig) -> Self {
        let state = PageState {
            locale: Locale::default(),
            gate: GateState::default(),
            section: config.home_section.clone(),
            countdown_finished: false,
        };
        Self {
            document,
            store,
            clock,
            config,
            state,
            timers: TimerQueue::new(),
            countdown_timer: None,
            bindings: BTreeMap::new(),
            started: false,
        }
    }

    /// Page load: resolve the gate, wire controls, restore locale and
    /// section, then render the countdown and start its timer.
    ///
    /// Only the first call does anything.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.restore_gate();
        self.bind_events();
        self.restore_locale();
        self.restore_section();
        self.start_countdown();
        debug!(
            locale = %self.state.locale,
            gate = ?self.state.gate,
            section = %self.state.section,
            "page started"
        );
    }

    /// Route a user event to the handler bound to its target, if any.
    pub fn dispatch(&mut self, event: &PageEvent) {
        let Some(action) = self.bindings.get(event.target()).copied() else {
            trace!(target_id = event.target(), "event on unbound element ignored");
            return;
        };
        if !action.accepts(event) {
            return;
        }
        match action {
            Action::SetLocale(locale) => self.set_locale(locale),
            Action::SubmitSecret | Action::SubmitOnEnter => self.submit_from_input(),
            Action::Navigate => {
                let section = event
                    .target()
                    .strip_prefix(self.config.elements.nav_prefix.as_str())
                    .unwrap_or(event.target())
                    .to_string();
                self.show_section(&section);
            }
        }
    }

    /// Fire every timer due at the clock's current time. Returns how many
    /// tasks ran.
    pub fn run_due_timers(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((handle, task)) = self.timers.pop_due(now) {
            trace!(?handle, ?task, "timer fired");
            fired += 1;
            match task {
                TimerTask::HideOverlay => self.remove_overlay(),
                TimerTask::ClearGateError => self.clear_gate_error(),
                TimerTask::CountdownTick => self.tick(),
            }
        }
        fired
    }

    /// Cancel every pending timer. Returns how many were pending.
    pub fn shutdown(&mut self) -> usize {
        self.countdown_timer = None;
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "controller timers cancelled");
        }
        cancelled
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the next gate timer (overlay removal or error reset).
    pub fn next_one_shot_deadline(&self) -> Option<NaiveDateTime> {
        self.timers.next_one_shot_deadline()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown_timer
            .map(|handle| self.timers.is_pending(handle))
            .unwrap_or(false)
    }

    pub fn binding(&self, id: &str) -> Option<Action> {
        self.bindings.get(id).copied()
    }

    fn bind_events(&mut self) {
        let mut bindings = BTreeMap::new();
        for pair in &self.config.selector_groups {
            for locale in Locale::all() {
                let id = pair.button(*locale);
                if self.document.contains(id) {
                    bindings.insert(id.to_string(), Action::SetLocale(*locale));
                }
            }
        }
        for trigger in &self.config.name_triggers {
            if self.document.contains(&trigger.id) {
                bindings.insert(trigger.id.clone(), Action::SetLocale(trigger.locale));
            }
        }
        let elements = &self.config.elements;
        if self.document.contains(&elements.unlock_button) {
            bindings.insert(elements.unlock_button.clone(), Action::SubmitSecret);
        }
        if self.document.contains(&elements.password_input) {
            bindings.insert(elements.password_input.clone(), Action::SubmitOnEnter);
        }
        for id in self.document.select_within(&elements.nav_links_class) {
            if id.starts_with(elements.nav_prefix.as_str()) {
                bindings.insert(id, Action::Navigate);
            }
        }
        debug!(count = bindings.len(), "event bindings registered");
        self.bindings = bindings;
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, error = %err, "failed to persist page preference");
        }
    }

    fn first_with_class(&self, class: &str) -> Option<String> {
        self.document.select_class(class).into_iter().next()
    }

    fn overlay(&self) -> Option<String> {
        self.first_with_class(&self.config.elements.lock_screen_class)
    }
}

impl<D: Document, S: Store, C: Clock> Drop for PageController<D, S, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
