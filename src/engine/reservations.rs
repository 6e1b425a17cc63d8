use crate::domain::account::{AccountId, Caller, Role};
use crate::domain::accommodation::AccommodationId;
use crate::domain::availability::DateRange;
use crate::domain::reservation::{
    self, Reservation, ReservationId, ReservationStatus,
};
use crate::error::{EngineError, Result};

use super::Engine;

impl Engine {
    /// Books a stay. The reservation always starts Pending. Overlap against
    /// other reservations is not checked at create time; availability
    /// removal is the only place that counts active reservations.
    pub async fn create_reservation(
        &self,
        caller: &Caller,
        accommodation_id: AccommodationId,
        period: DateRange,
        guest_count: u32,
    ) -> Result<Reservation> {
        Self::require_role(caller, Role::Guest)?;
        if guest_count == 0 {
            return Err(EngineError::InvalidInput {
                reason: "guest count must be at least 1".into(),
            });
        }
        self.require_accommodation(accommodation_id).await?;
        let stored = self
            .reservations
            .insert(Reservation {
                id: ReservationId::default(),
                guest_id: caller.id,
                accommodation_id,
                period,
                guest_count,
                status: ReservationStatus::Pending,
            })
            .await?;
        tracing::info!(
            reservation = stored.id.0,
            accommodation = accommodation_id.0,
            guest = caller.id.0,
            "reservation created"
        );
        Ok(stored)
    }

    /// Applies a status transition under the role gate. Serialized with the
    /// interval operations of the same accommodation.
    pub async fn set_reservation_status(
        &self,
        caller: &Caller,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        reservation::check_status_change(caller.role, status)?;
        let mut reservation = self.require_reservation(id).await?;
        let lock = self.locks.handle(reservation.accommodation_id);
        let _guard = lock.lock().await;
        reservation.status = status;
        self.reservations.update(&reservation).await?;
        tracing::info!(reservation = id.0, ?status, "reservation status changed");
        Ok(reservation)
    }

    /// Only the reserving guest may delete their reservation.
    pub async fn delete_reservation(&self, caller: &Caller, id: ReservationId) -> Result<()> {
        let reservation = self.require_reservation(id).await?;
        if caller.id != reservation.guest_id {
            return Err(EngineError::NotReservationOwner);
        }
        let lock = self.locks.handle(reservation.accommodation_id);
        let _guard = lock.lock().await;
        self.reservations.delete(id).await?;
        tracing::info!(reservation = id.0, "reservation deleted");
        Ok(())
    }

    pub async fn reservations_by_accommodation(
        &self,
        id: AccommodationId,
    ) -> Result<Vec<Reservation>> {
        self.require_accommodation(id).await?;
        self.reservations.list_by_accommodation(id).await
    }

    pub async fn reservations_by_guest(&self, guest_id: AccountId) -> Result<Vec<Reservation>> {
        self.reservations.list_by_guest(guest_id).await
    }

    /// A guest's accepted stays that have not ended yet, most recent start
    /// first.
    pub async fn guest_current_reservations(
        &self,
        guest_id: AccountId,
    ) -> Result<Vec<Reservation>> {
        let today = self.today();
        let mut current: Vec<Reservation> = self
            .reservations
            .list_by_guest(guest_id)
            .await?
            .into_iter()
            .filter(|r| r.status == ReservationStatus::Accepted && r.period.to > today)
            .collect();
        current.sort_by(|a, b| b.period.from.cmp(&a.period.from));
        Ok(current)
    }

    /// The host-side view: accepted, not yet ended reservations across all
    /// of the host's accommodations, most recent start first.
    pub async fn host_current_reservations(
        &self,
        host_id: AccountId,
    ) -> Result<Vec<Reservation>> {
        let today = self.today();
        let mut current = Vec::new();
        for accommodation in self.accommodations.list_by_host(host_id).await? {
            current.extend(
                self.reservations
                    .list_by_accommodation(accommodation.id)
                    .await?
                    .into_iter()
                    .filter(|r| r.status == ReservationStatus::Accepted && r.period.to > today),
            );
        }
        current.sort_by(|a, b| b.period.from.cmp(&a.period.from));
        Ok(current)
    }
}
