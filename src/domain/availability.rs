use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::accommodation::AccommodationId;
use crate::error::{EngineError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct AvailabilityId(pub u64);

impl std::fmt::Display for AvailabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open date range `[from, to)`: `from` is the check-in day, `to` the
/// check-out day. `to` must be strictly after `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if to <= from {
            return Err(EngineError::InvalidInput {
                reason: format!("date range end {to} must be after start {from}"),
            });
        }
        Ok(Self { from, to })
    }

    /// Number of whole night-units in the range.
    pub fn nights(&self) -> u32 {
        u32::try_from(self.to.signed_duration_since(self.from).num_days()).unwrap_or(0)
    }

    /// Strict half-open overlap test.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from < other.to && self.to > other.from
    }

    /// Intersection of two ranges, if non-empty.
    pub fn clip(&self, other: &DateRange) -> Option<DateRange> {
        let from = self.from.max(other.from);
        let to = self.to.min(other.to);
        (from < to).then_some(DateRange { from, to })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// A priced window during which an accommodation can be booked. Owned by
/// exactly one accommodation; windows of the same accommodation never
/// overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub accommodation_id: AccommodationId,
    pub period: DateRange,
    pub nightly_price: f64,
}

/// A slice of an availability window clipped to a query range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub period: DateRange,
    pub nightly_price: f64,
}

/// First stored interval that strictly overlaps `range`, if any.
pub fn find_conflict<'a>(intervals: &'a [Availability], range: &DateRange) -> Option<&'a Availability> {
    intervals.iter().find(|a| a.period.overlaps(range))
}

/// Interval slices intersecting `range`, clipped to it and ordered by start
/// date.
pub fn segments_overlapping(intervals: &[Availability], range: &DateRange) -> Vec<Segment> {
    let mut segments: Vec<Segment> = intervals
        .iter()
        .filter_map(|a| {
            a.period.clip(range).map(|period| Segment {
                period,
                nightly_price: a.nightly_price,
            })
        })
        .collect();
    segments.sort_by_key(|s| s.period.from);
    segments
}

/// True iff `range` is fully contained in the union of the intervals, with
/// no gaps. Supports ranges spanning multiple adjacent intervals.
pub fn is_covered(intervals: &[Availability], range: &DateRange) -> bool {
    let mut cursor = range.from;
    for segment in segments_overlapping(intervals, range) {
        if segment.period.from > cursor {
            return false;
        }
        cursor = cursor.max(segment.period.to);
    }
    cursor >= range.to
}

/// The nightly price floor across all windows, for search cards.
pub fn min_nightly_price(intervals: &[Availability]) -> Option<f64> {
    intervals
        .iter()
        .map(|a| a.nightly_price)
        .reduce(f64::min)
}
