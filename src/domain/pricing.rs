//! Price computation over availability segments. Pure and side-effect-free:
//! the same routine backs direct quotes, the search pipeline's price
//! filtering, and revenue reports.

use crate::domain::accommodation::PricingMode;
use crate::domain::availability::{self, Availability, DateRange};

fn guest_multiplier(mode: PricingMode, guests: u32) -> f64 {
    match mode {
        PricingMode::PerUnit => 1.0,
        PricingMode::PerGuest => f64::from(guests),
    }
}

/// Total price for a stay over `range`, or `None` when the intervals do not
/// fully cover it.
pub fn quote(
    mode: PricingMode,
    intervals: &[Availability],
    range: &DateRange,
    guests: u32,
) -> Option<f64> {
    if !availability::is_covered(intervals, range) {
        return None;
    }
    Some(segments_total(mode, intervals, range, guests))
}

/// Sum of `nights × nightly price (× guests)` over the interval slices that
/// intersect `range`. No coverage requirement; reports use this to price a
/// reservation over whatever still overlaps.
pub fn segments_total(
    mode: PricingMode,
    intervals: &[Availability],
    range: &DateRange,
    guests: u32,
) -> f64 {
    availability::segments_overlapping(intervals, range)
        .iter()
        .map(|s| f64::from(s.period.nights()) * s.nightly_price)
        .sum::<f64>()
        * guest_multiplier(mode, guests)
}
