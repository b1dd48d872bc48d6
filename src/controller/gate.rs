// SPDX-License-Identifier: PMPL-1.0-or-later

use super::{PageController, TimerTask};
use crate::clock::Clock;
use crate::document::Document;
use crate::gate::{GateState, GateTransition, UNLOCKED_MARKER};
use crate::storage::{Store, KEY_UNLOCKED};
use tracing::{debug, info};

impl<D: Document, S: Store, C: Clock> PageController<D, S, C> {
    /// Try to open the gate with `attempt`.
    ///
    /// On success the unlock is persisted, the overlay starts fading and is
    /// removed from layout after the hide delay. On failure the secret
    /// field and error message are flagged and reset after the error delay.
    /// Submissions after the gate has opened do nothing.
    pub fn submit(&mut self, attempt: &str) {
        match self.state.gate.submit(attempt, &self.config.secret) {
            GateTransition::Opened => {
                info!("gate unlocked");
                self.persist(KEY_UNLOCKED, UNLOCKED_MARKER);
                if let Some(overlay) = self.overlay() {
                    let hidden = self.config.states.hidden.as_str();
                    self.document.toggle_class(&overlay, hidden, true);
                    let now = self.clock.now();
                    self.timers
                        .schedule_once(now, self.config.hide_delay(), TimerTask::HideOverlay);
                }
                self.set_gate_error(false);
            }
            GateTransition::Rejected => {
                debug!("gate rejected submission");
                self.set_gate_error(true);
                let now = self.clock.now();
                self.timers.schedule_once(
                    now,
                    self.config.error_clear_delay(),
                    TimerTask::ClearGateError,
                );
            }
            GateTransition::Ignored => {
                debug!("gate already unlocked, submission ignored");
            }
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.state.gate.is_unlocked()
    }

    /// Current contents of the secret field, submitted as-is.
    pub(super) fn submit_from_input(&mut self) {
        let attempt = self
            .document
            .value(&self.config.elements.password_input)
            .unwrap_or_default();
        self.submit(&attempt);
    }

    /// Resolve the initial gate state. A persisted unlock hides the overlay
    /// at once, without the fade.
    pub(super) fn restore_gate(&mut self) {
        let persisted = self.store.get(KEY_UNLOCKED);
        self.state.gate = GateState::from_persisted(persisted.as_deref());
        if self.state.gate.is_unlocked() {
            if let Some(overlay) = self.overlay() {
                self.document.set_displayed(&overlay, false);
            }
        }
    }

    pub(super) fn remove_overlay(&mut self) {
        if let Some(overlay) = self.overlay() {
            self.document.set_displayed(&overlay, false);
            debug!("gate overlay removed from layout");
        }
    }

    pub(super) fn clear_gate_error(&mut self) {
        let input = self.config.elements.password_input.clone();
        self.document.set_value(&input, "");
        self.set_gate_error(false);
    }

    fn set_gate_error(&mut self, on: bool) {
        let input = self.config.elements.password_input.as_str();
        let error = self.config.states.error.as_str();
        self.document.toggle_class(input, error, on);

        if let Some(message) = self.first_with_class(&self.config.elements.lock_error_class) {
            let show = self.config.states.show.as_str();
            self.document.toggle_class(&message, show, on);
        }
    }
}
