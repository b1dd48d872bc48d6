// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wall-clock sources.
//!
//! The countdown target is a local calendar time, so clocks report naive
//! local date-times rather than UTC instants.

use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the controller owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn manual_clock_clones_share_time() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let clock = ManualClock::new(start);
        let handle = clock.clone();
        handle.advance(Duration::seconds(90));
        assert_eq!(clock.now(), start + Duration::seconds(90));
    }
}
