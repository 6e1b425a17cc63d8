use chrono::{DateTime, Utc};

/// Wall-clock seam so time-windowed rules (review eligibility, not-yet-ended
/// queries) are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
