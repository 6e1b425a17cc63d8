#![allow(clippy::cast_precision_loss)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;
use crate::domain::accommodation::AccommodationId;
use crate::error::{EngineError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ReviewId(pub u64);

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Accepted,
    Declined,
}

/// What a review is attached to. The two kinds share one record shape and
/// one eligibility machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewSubject {
    Accommodation(AccommodationId),
    Host(AccountId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub guest_id: AccountId,
    pub subject: ReviewSubject,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub status: ReviewStatus,
}

/// Guest input for a new review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(EngineError::InvalidInput {
                reason: format!("rating {} is out of range 1-5", self.rating),
            });
        }
        Ok(())
    }
}

/// A pending review with enough subject context for the moderation queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReview {
    pub review: Review,
    pub subject_label: String,
}

/// Average rating and count over the published (accepted) reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: u32,
}

impl RatingSummary {
    pub fn of(reviews: &[Review]) -> Self {
        let ratings: Vec<f64> = reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Accepted)
            .map(|r| f64::from(r.rating))
            .collect();
        if ratings.is_empty() {
            return Self::default();
        }
        Self {
            average: Some(ratings.iter().sum::<f64>() / ratings.len() as f64),
            count: u32::try_from(ratings.len()).unwrap_or(u32::MAX),
        }
    }
}
