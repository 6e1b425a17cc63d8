use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    /// Days before check-in until which a guest may still cancel, applied to
    /// newly created accommodations.
    #[serde(default = "default_cancellation_deadline_days")]
    pub default_cancellation_deadline_days: u32,
    /// How long after check-out a stay remains reviewable.
    #[serde(default = "default_review_window_days")]
    pub review_window_days: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_cancellation_deadline_days: default_cancellation_deadline_days(),
            review_window_days: default_review_window_days(),
        }
    }
}

fn default_cancellation_deadline_days() -> u32 {
    1
}

fn default_review_window_days() -> i64 {
    7
}
