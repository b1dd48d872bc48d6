// SPDX-License-Identifier: PMPL-1.0-or-later

//! Property tests for countdown arithmetic and section exclusivity

use chrono::{Duration, NaiveDate, NaiveDateTime};
use page_gate::clock::ManualClock;
use page_gate::config::PageConfig;
use page_gate::countdown::Remaining;
use page_gate::document::{standard_page, Document, STANDARD_SECTIONS};
use page_gate::storage::MemoryStore;
use page_gate::PageController;
use proptest::prelude::*;

fn target() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 4)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

proptest! {
    #[test]
    fn decomposition_recomposes(total in 0u64..10_000_000_000) {
        let remaining = Remaining::from_seconds(total);
        prop_assert!(remaining.hours < 24);
        prop_assert!(remaining.minutes < 60);
        prop_assert!(remaining.seconds < 60);
        prop_assert_eq!(remaining.total_seconds(), total);
    }

    #[test]
    fn padded_fields_have_minimum_width(total in 0u64..100_000_000) {
        let [d, h, m, s] = Remaining::from_seconds(total).padded();
        prop_assert!(d.len() >= 3);
        prop_assert_eq!(h.len(), 2);
        prop_assert_eq!(m.len(), 2);
        prop_assert_eq!(s.len(), 2);
    }

    #[test]
    fn remaining_never_exceeds_time_left(offset_ms in -1_000_000_000i64..1_000_000_000) {
        let now = target() - Duration::milliseconds(offset_ms);
        let remaining = Remaining::until(target(), now).total_seconds();
        let expected = if offset_ms > 0 { (offset_ms / 1000) as u64 } else { 0 };
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn at_most_one_section_is_ever_active(
        picks in proptest::collection::vec(
            prop_oneof![
                (0..STANDARD_SECTIONS.len()).prop_map(|i| STANDARD_SECTIONS[i].0.to_string()),
                "[a-z]{1,8}",
            ],
            1..12,
        )
    ) {
        let clock = ManualClock::new(target() - Duration::days(10));
        let mut controller =
            PageController::new(standard_page(), MemoryStore::new(), clock, PageConfig::default());
        controller.start();
        for pick in &picks {
            controller.show_section(pick);
            let doc = controller.document();
            let active: Vec<String> = doc
                .select_class("jl-page")
                .into_iter()
                .filter(|id| doc.has_class(id, "active"))
                .collect();
            let expected_id = format!("page-{pick}");
            if doc.contains(&expected_id) {
                prop_assert_eq!(active, vec![expected_id]);
            } else {
                prop_assert!(active.is_empty());
            }
        }
    }
}
