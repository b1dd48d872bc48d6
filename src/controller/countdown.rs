// SPDX-License-Identifier: PMPL-1.0-or-later

use super::{PageController, TimerTask};
use crate::clock::Clock;
use crate::countdown::{has_elapsed, terminal_markup, Remaining};
use crate::document::Document;
use crate::storage::Store;
use tracing::{info, trace};

impl<D: Document, S: Store, C: Clock> PageController<D, S, C> {
    /// Render the time left until the countdown target.
    ///
    /// The four digit fields are written only when all of them exist. From
    /// the target instant on, the countdown region is replaced with the
    /// celebration message in the current locale; later ticks render the
    /// same content again.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let target = self.config.countdown_target;
        let remaining = Remaining::until(target, now);
        trace!(%remaining, "countdown tick");

        let elements = &self.config.elements;
        let fields = [
            &elements.days,
            &elements.hours,
            &elements.minutes,
            &elements.seconds,
        ];
        if fields.iter().all(|id| self.document.contains(id)) {
            for (id, text) in fields.iter().zip(remaining.padded()) {
                self.document.set_text(id, &text);
            }
        }

        if has_elapsed(target, now) {
            if !self.state.countdown_finished {
                info!(%target, "countdown reached its target");
            }
            self.state.countdown_finished = true;
            let message = self.config.terminal_message(self.state.locale);
            let container = self.config.elements.countdown.as_str();
            if self.document.contains(container) {
                self.document
                    .replace_markup(container, &terminal_markup(message));
            }
        }
    }

    /// Time left at the clock's current time.
    pub fn remaining(&self) -> Remaining {
        Remaining::until(self.config.countdown_target, self.clock.now())
    }

    /// Render once now, then on every tick period.
    pub(super) fn start_countdown(&mut self) {
        self.tick();
        let now = self.clock.now();
        let handle =
            self.timers
                .schedule_repeating(now, self.config.tick_period(), TimerTask::CountdownTick);
        self.countdown_timer = Some(handle);
    }
}
