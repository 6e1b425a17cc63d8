use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;
use crate::domain::availability::Availability;
use crate::domain::review::{RatingSummary, Review};
use crate::error::{EngineError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct AccommodationId(pub u64);

impl std::fmt::Display for AccommodationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccommodationStatus {
    Pending,
    Accepted,
    Declined,
}

/// How an availability window's nightly price is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingMode {
    /// Flat nightly price for the whole unit.
    PerUnit,
    /// Nightly price scaled by the guest count.
    PerGuest,
}

/// One canonical representation; views over it are pure projections below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: AccommodationId,
    pub host_id: AccountId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub min_guests: u32,
    pub max_guests: u32,
    pub kind: String,
    pub benefits: Vec<String>,
    pub status: AccommodationStatus,
    pub pricing_mode: PricingMode,
    pub cancellation_deadline_days: u32,
}

impl Accommodation {
    pub fn fits_guests(&self, guests: u32) -> bool {
        self.min_guests <= guests && guests <= self.max_guests
    }
}

/// Host input for creating a new accommodation. Status and cancellation
/// deadline are assigned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccommodationDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub min_guests: u32,
    pub max_guests: u32,
    pub kind: String,
    pub benefits: Vec<String>,
    pub pricing_mode: PricingMode,
}

impl AccommodationDraft {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(EngineError::InvalidInput {
                reason: "title is required".into(),
            });
        }
        if self.location.trim().is_empty() {
            return Err(EngineError::InvalidInput {
                reason: "location is required".into(),
            });
        }
        if self.min_guests == 0 || self.min_guests > self.max_guests {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "guest capacity range [{}, {}] is invalid",
                    self.min_guests, self.max_guests
                ),
            });
        }
        Ok(())
    }
}

/// Structural fields a host may edit after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccommodationUpdate {
    pub id: AccommodationId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub min_guests: u32,
    pub max_guests: u32,
    pub kind: String,
    pub benefits: Vec<String>,
}

/// Search/list card. `min_nightly_price` is the nightly floor across the
/// accommodation's windows; `total_price` is the priced stay total when the
/// search carried a concrete date range. Exactly one of the two is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationCard {
    pub id: AccommodationId,
    pub title: String,
    pub location: String,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub min_guests: u32,
    pub max_guests: u32,
    pub min_nightly_price: Option<f64>,
    pub total_price: Option<f64>,
}

impl AccommodationCard {
    pub fn with_min_price(
        accommodation: &Accommodation,
        min_nightly_price: Option<f64>,
        rating: &RatingSummary,
    ) -> Self {
        Self {
            id: accommodation.id,
            title: accommodation.title.clone(),
            location: accommodation.location.clone(),
            rating: rating.average,
            review_count: rating.count,
            min_guests: accommodation.min_guests,
            max_guests: accommodation.max_guests,
            min_nightly_price,
            total_price: None,
        }
    }

    pub fn with_total_price(
        accommodation: &Accommodation,
        total_price: f64,
        rating: &RatingSummary,
    ) -> Self {
        Self {
            id: accommodation.id,
            title: accommodation.title.clone(),
            location: accommodation.location.clone(),
            rating: rating.average,
            review_count: rating.count,
            min_guests: accommodation.min_guests,
            max_guests: accommodation.max_guests,
            min_nightly_price: None,
            total_price: Some(total_price),
        }
    }
}

impl std::fmt::Display for AccommodationCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.location)?;
        if let Some(rating) = self.rating {
            write!(f, " ({rating:.1}*, {} reviews)", self.review_count)?;
        }
        if let Some(price) = self.min_nightly_price {
            write!(f, " from {price:.0}/night")?;
        }
        if let Some(total) = self.total_price {
            write!(f, " | total {total:.0}")?;
        }
        Ok(())
    }
}

/// Full accommodation view: the record plus its availability windows and
/// published reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccommodationDetails {
    pub accommodation: Accommodation,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub availabilities: Vec<Availability>,
    pub reviews: Vec<Review>,
}

impl AccommodationDetails {
    pub fn project(
        accommodation: Accommodation,
        availabilities: Vec<Availability>,
        reviews: Vec<Review>,
    ) -> Self {
        let rating = RatingSummary::of(&reviews);
        Self {
            accommodation,
            rating: rating.average,
            review_count: rating.count,
            availabilities,
            reviews,
        }
    }
}

/// The booking-relevant slice a host edits separately from the listing copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub accommodation_id: AccommodationId,
    pub cancellation_deadline_days: u32,
    pub pricing_mode: PricingMode,
    pub availabilities: Vec<Availability>,
}

impl BookingDetails {
    pub fn project(accommodation: &Accommodation, availabilities: Vec<Availability>) -> Self {
        Self {
            accommodation_id: accommodation.id,
            cancellation_deadline_days: accommodation.cancellation_deadline_days,
            pricing_mode: accommodation.pricing_mode,
            availabilities,
        }
    }
}
