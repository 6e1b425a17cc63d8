//! Property tests for the interval math and pricing: any sequence of
//! successful adds leaves pairwise non-overlapping intervals, coverage and
//! quoting always agree, and per-guest pricing scales linearly.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use bookstay::domain::accommodation::{AccommodationId, PricingMode};
use bookstay::domain::availability::{
    self, Availability, AvailabilityId, DateRange,
};
use bookstay::domain::pricing;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn day(offset: u32) -> NaiveDate {
    base() + Duration::days(i64::from(offset))
}

/// Replays the add-interval operation: a candidate lands only if it strictly
/// overlaps nothing already stored.
fn simulate_adds(candidates: &[(u32, u32, f64)]) -> Vec<Availability> {
    let mut stored: Vec<Availability> = Vec::new();
    for (i, (start, len, price)) in candidates.iter().enumerate() {
        let period = DateRange {
            from: day(*start),
            to: day(start + len),
        };
        if availability::find_conflict(&stored, &period).is_none() {
            stored.push(Availability {
                id: AvailabilityId(i as u64 + 1),
                accommodation_id: AccommodationId(1),
                period,
                nightly_price: *price,
            });
        }
    }
    stored
}

fn arb_candidates() -> impl Strategy<Value = Vec<(u32, u32, f64)>> {
    prop::collection::vec((0u32..60, 1u32..15, 1.0f64..500.0), 0..30)
}

proptest! {
    #[test]
    fn stored_intervals_never_overlap(candidates in arb_candidates()) {
        let stored = simulate_adds(&candidates);
        for (i, a) in stored.iter().enumerate() {
            for b in &stored[i + 1..] {
                prop_assert!(
                    !a.period.overlaps(&b.period),
                    "{} overlaps {}",
                    a.period,
                    b.period
                );
            }
        }
    }

    #[test]
    fn re_adding_a_stored_interval_always_conflicts(candidates in arb_candidates()) {
        let stored = simulate_adds(&candidates);
        for interval in &stored {
            prop_assert!(availability::find_conflict(&stored, &interval.period).is_some());
        }
    }

    #[test]
    fn quote_exists_iff_range_is_covered(
        candidates in arb_candidates(),
        start in 0u32..70,
        len in 1u32..20,
    ) {
        let stored = simulate_adds(&candidates);
        let range = DateRange { from: day(start), to: day(start + len) };
        let covered = availability::is_covered(&stored, &range);
        let quoted = pricing::quote(PricingMode::PerUnit, &stored, &range, 1);
        prop_assert_eq!(covered, quoted.is_some());
    }

    #[test]
    fn quote_equals_manual_segment_sum(
        candidates in arb_candidates(),
        start in 0u32..70,
        len in 1u32..20,
    ) {
        let stored = simulate_adds(&candidates);
        let range = DateRange { from: day(start), to: day(start + len) };
        if let Some(total) = pricing::quote(PricingMode::PerUnit, &stored, &range, 1) {
            let manual: f64 = availability::segments_overlapping(&stored, &range)
                .iter()
                .map(|s| f64::from(s.period.nights()) * s.nightly_price)
                .sum();
            prop_assert!((total - manual).abs() < 1e-6);
        }
    }

    #[test]
    fn per_guest_pricing_scales_linearly(
        candidates in arb_candidates(),
        start in 0u32..70,
        len in 1u32..20,
        guests in 1u32..6,
    ) {
        let stored = simulate_adds(&candidates);
        let range = DateRange { from: day(start), to: day(start + len) };
        let per_unit = pricing::quote(PricingMode::PerUnit, &stored, &range, guests);
        let per_guest = pricing::quote(PricingMode::PerGuest, &stored, &range, guests);
        match (per_unit, per_guest) {
            (Some(unit), Some(scaled)) => {
                prop_assert!((scaled - unit * f64::from(guests)).abs() < 1e-6);
            }
            (None, None) => {}
            other => prop_assert!(false, "coverage disagreed: {other:?}"),
        }
    }

    #[test]
    fn clipped_segments_stay_inside_the_range(
        candidates in arb_candidates(),
        start in 0u32..70,
        len in 1u32..20,
    ) {
        let stored = simulate_adds(&candidates);
        let range = DateRange { from: day(start), to: day(start + len) };
        let segments = availability::segments_overlapping(&stored, &range);
        let mut nights = 0u32;
        let mut previous_end = range.from;
        for segment in &segments {
            prop_assert!(segment.period.from >= range.from);
            prop_assert!(segment.period.to <= range.to);
            // Ordered and disjoint because the stored set is disjoint.
            prop_assert!(segment.period.from >= previous_end);
            previous_end = segment.period.to;
            nights += segment.period.nights();
        }
        prop_assert!(nights <= range.nights());
    }
}
