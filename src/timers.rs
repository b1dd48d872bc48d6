// SPDX-License-Identifier: PMPL-1.0-or-later

//! Deferred work owned by the controller.
//!
//! Timers never run on their own. The owner polls [`TimerQueue::pop_due`]
//! with the current time and executes whatever task comes back, which keeps
//! everything on one logical thread and makes time fully controllable in
//! tests. Every timer is addressed by a [`TimerHandle`] and can be
//! cancelled; dropping the queue drops all pending work.

use chrono::{Duration, NaiveDateTime};
use tracing::warn;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    handle: TimerHandle,
    task: T,
    deadline: NaiveDateTime,
    period: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Run `task` once, `delay` after `now`.
    ///
    /// A deadline past the representable calendar is never reached; the
    /// timer is dropped and the returned handle is not pending.
    pub fn schedule_once(&mut self, now: NaiveDateTime, delay: Duration, task: T) -> TimerHandle {
        self.insert(now.checked_add_signed(delay), None, task)
    }

    /// Run `task` every `period`, first at `now + period`.
    ///
    /// Periods are truncated to whole milliseconds, with a minimum of one.
    pub fn schedule_repeating(
        &mut self,
        now: NaiveDateTime,
        period: Duration,
        task: T,
    ) -> TimerHandle {
        let period = Duration::milliseconds(period.num_milliseconds().max(1));
        self.insert(now.checked_add_signed(period), Some(period), task)
    }

    /// Returns `false` when the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    /// Cancel everything; returns how many timers were pending.
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.timers.len();
        self.timers.clear();
        pending
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest deadline among one-shot timers.
    pub fn next_one_shot_deadline(&self) -> Option<NaiveDateTime> {
        self.timers
            .iter()
            .filter(|timer| timer.period.is_none())
            .map(|timer| timer.deadline)
            .min()
    }

    /// Take the most overdue task whose deadline is at or before `now`.
    ///
    /// One-shot timers are removed. Repeating timers move to their next
    /// deadline strictly after `now`; missed periods are skipped, not
    /// replayed.
    pub fn pop_due(&mut self, now: NaiveDateTime) -> Option<(TimerHandle, T)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.handle))
            .map(|(index, _)| index)?;

        let timer = &self.timers[index];
        let next = timer
            .period
            .and_then(|period| next_after(timer.deadline, period, now));
        match next {
            Some(deadline) => {
                let timer = &mut self.timers[index];
                timer.deadline = deadline;
                Some((timer.handle, timer.task.clone()))
            }
            None => {
                let timer = self.timers.remove(index);
                if timer.period.is_some() {
                    warn!(
                        handle = timer.handle.0,
                        "repeating timer ran past the calendar; dropped"
                    );
                }
                Some((timer.handle, timer.task))
            }
        }
    }

    fn insert(
        &mut self,
        deadline: Option<NaiveDateTime>,
        period: Option<Duration>,
        task: T,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        match deadline {
            Some(deadline) => self.timers.push(Timer {
                handle,
                task,
                deadline,
                period,
            }),
            None => warn!(handle = handle.0, "timer deadline out of range; not scheduled"),
        }
        handle
    }
}

/// First `deadline + k * period` strictly after `now`, for whole-millisecond
/// periods and `deadline <= now`.
fn next_after(
    deadline: NaiveDateTime,
    period: Duration,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let period_ms = period.num_milliseconds().max(1);
    let behind_ms = (now - deadline).num_milliseconds();
    let steps = behind_ms / period_ms + 1;
    let advance = Duration::try_milliseconds(steps.checked_mul(period_ms)?)?;
    deadline.checked_add_signed(advance)
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
