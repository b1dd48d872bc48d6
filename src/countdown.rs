// SPDX-License-Identifier: PMPL-1.0-or-later

//! Time remaining until the countdown target.
//!
//! Everything here is a pure function of `(target, now)`. No state carries
//! over between ticks, so a late or skipped tick is corrected by the next.

use chrono::NaiveDateTime;
use serde::Serialize;

const SECS_PER_DAY: u64 = 24 * 60 * 60;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_MINUTE: u64 = 60;

/// Calendar-agnostic split of a whole number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Remaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    /// Whole seconds left before `target`, floored, never negative.
    pub fn until(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let millis = (target - now).num_milliseconds().max(0) as u64;
        Self::from_seconds(millis / 1000)
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// Display strings: days to at least three digits, the rest to two.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:03}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [d, h, m, s] = self.padded();
        write!(f, "{d}d {h}h {m}m {s}s")
    }
}

/// `true` from the exact target instant onwards, at millisecond precision.
pub fn has_elapsed(target: NaiveDateTime, now: NaiveDateTime) -> bool {
    (target - now).num_milliseconds() <= 0
}

/// Replacement content for the countdown region once the target has passed.
pub fn terminal_markup(message: &str) -> String {
    format!(
        "<div class=\"jl-c\" style=\"min-width:260px;\"><span>🎉</span><em>{}</em></div>",
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn target() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 4)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn decomposes_one_of_each_unit() {
        let remaining = Remaining::from_seconds(90061);
        assert_eq!(
            remaining,
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(remaining.padded(), ["001", "01", "01", "01"]);
    }

    #[test]
    fn partial_seconds_are_floored() {
        let now = target() - Duration::milliseconds(1999);
        assert_eq!(Remaining::until(target(), now).total_seconds(), 1);
    }

    #[test]
    fn past_target_clamps_to_zero() {
        let now = target() + Duration::days(3);
        assert_eq!(Remaining::until(target(), now), Remaining::default());
        assert_eq!(Remaining::default().padded(), ["000", "00", "00", "00"]);
    }

    #[test]
    fn elapsed_includes_exact_target() {
        assert!(!has_elapsed(target(), target() - Duration::milliseconds(1)));
        assert!(has_elapsed(target(), target()));
        assert!(has_elapsed(target(), target() + Duration::seconds(1)));
    }

    #[test]
    fn large_day_counts_are_not_truncated() {
        assert_eq!(Remaining::from_seconds(1234 * SECS_PER_DAY).padded()[0], "1234");
    }

    #[test]
    fn terminal_markup_wraps_message() {
        let markup = terminal_markup("We're Married!");
        assert!(markup.contains("<em>We're Married!</em>"));
        assert!(markup.contains("🎉"));
        assert!(terminal_markup("<b>").contains("&lt;b&gt;"));
    }
}
