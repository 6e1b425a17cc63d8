use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::accommodation::Accommodation;
use crate::domain::availability::DateRange;
use crate::error::{EngineError, Result};

/// Catalog search filters. Text fields are substring matches; a date range
/// or price range changes how cards are priced (see the engine pipeline).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub location: Option<String>,
    pub guests: Option<u32>,
    pub kind: Option<String>,
    pub benefits: Vec<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
}

impl SearchFilter {
    pub fn validate(&self) -> Result<()> {
        match (self.available_from, self.available_to) {
            (Some(from), Some(to)) if to <= from => {
                return Err(EngineError::InvalidInput {
                    reason: "available_to must be after available_from".into(),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(EngineError::InvalidInput {
                    reason: "both available_from and available_to must be provided together"
                        .into(),
                });
            }
            _ => {}
        }
        match (self.price_from, self.price_to) {
            (Some(from), Some(to)) if from > to => {
                return Err(EngineError::InvalidInput {
                    reason: "price_from cannot be greater than price_to".into(),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(EngineError::InvalidInput {
                    reason: "both price_from and price_to must be provided together".into(),
                });
            }
            _ => {}
        }
        if self.guests == Some(0) {
            return Err(EngineError::InvalidInput {
                reason: "guest count must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn date_range(&self) -> Option<DateRange> {
        match (self.available_from, self.available_to) {
            (Some(from), Some(to)) if from < to => Some(DateRange { from, to }),
            _ => None,
        }
    }

    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.price_from.zip(self.price_to)
    }

    /// Structural stage of the pipeline: text, capacity, type, and benefit
    /// matching. Date and price stages live in the engine.
    pub fn matches(&self, accommodation: &Accommodation) -> bool {
        if let Some(ref title) = self.title
            && !contains_ignore_case(&accommodation.title, title)
        {
            return false;
        }
        if let Some(ref location) = self.location
            && !contains_ignore_case(&accommodation.location, location)
        {
            return false;
        }
        if let Some(guests) = self.guests
            && !accommodation.fits_guests(guests)
        {
            return false;
        }
        if let Some(ref kind) = self.kind
            && !accommodation.kind.eq_ignore_ascii_case(kind)
        {
            return false;
        }
        self.benefits.iter().all(|wanted| {
            accommodation
                .benefits
                .iter()
                .any(|b| b.eq_ignore_ascii_case(wanted))
        })
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
