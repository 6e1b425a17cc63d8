//! Time-windowed rules gating review creation. The counting rule (one
//! review per completed stay) bounds abuse without a per-reservation
//! review link.

use std::collections::HashSet;

use chrono::Duration;

use crate::domain::account::AccountId;
use crate::domain::accommodation::AccommodationId;
use crate::domain::reservation::ReservationStatus;
use crate::domain::review::ReviewSubject;
use crate::error::{EngineError, Result};

use super::Engine;

impl Engine {
    /// A guest may review an accommodation only with a completed
    /// (non-pending, non-cancelled) stay that ended within the review
    /// window, and only while they have reviewed fewer times than they have
    /// completed stays there.
    pub(crate) async fn ensure_can_review_accommodation(
        &self,
        guest: AccountId,
        accommodation_id: AccommodationId,
    ) -> Result<()> {
        let today = self.today();
        let window_start = today - Duration::days(self.config.booking.review_window_days);

        let stays: Vec<_> = self
            .reservations
            .list_by_guest(guest)
            .await?
            .into_iter()
            .filter(|r| {
                r.accommodation_id == accommodation_id
                    && r.status != ReservationStatus::Pending
                    && r.status != ReservationStatus::Cancelled
            })
            .collect();

        let recent = stays
            .iter()
            .filter(|r| r.period.to > window_start && r.period.to < today)
            .count();
        if recent == 0 {
            return Err(EngineError::NoEligibleStay { guest });
        }

        let completed = stays.iter().filter(|r| r.period.to < today).count();
        let written = self
            .reviews
            .list_by_subject(ReviewSubject::Accommodation(accommodation_id))
            .await?
            .iter()
            .filter(|r| r.guest_id == guest)
            .count();
        if written >= completed {
            return Err(EngineError::ReviewBudgetExhausted { guest });
        }
        Ok(())
    }

    /// Host reviews have no recency window: any past non-cancelled stay at
    /// any of the host's accommodations earns one review of the host.
    pub(crate) async fn ensure_can_review_host(
        &self,
        guest: AccountId,
        host_id: AccountId,
    ) -> Result<()> {
        let today = self.today();
        let owned: HashSet<AccommodationId> = self
            .accommodations
            .list_by_host(host_id)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let completed = self
            .reservations
            .list_by_guest(guest)
            .await?
            .into_iter()
            .filter(|r| {
                owned.contains(&r.accommodation_id)
                    && r.status != ReservationStatus::Cancelled
                    && r.period.to < today
            })
            .count();
        if completed == 0 {
            return Err(EngineError::NoEligibleStay { guest });
        }

        let written = self
            .reviews
            .list_by_subject(ReviewSubject::Host(host_id))
            .await?
            .iter()
            .filter(|r| r.guest_id == guest)
            .count();
        if written >= completed {
            return Err(EngineError::ReviewBudgetExhausted { guest });
        }
        Ok(())
    }
}
