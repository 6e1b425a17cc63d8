//! Persistence boundary. The engine only ever sees these traits; adapters
//! own the tables. Ids are assigned by the store on insert (any id on the
//! inserted value is ignored). Cascade rules live in the store layer, so a
//! cascading delete is one atomic operation.

use async_trait::async_trait;

use crate::domain::account::AccountId;
use crate::domain::accommodation::{Accommodation, AccommodationId, AccommodationStatus};
use crate::domain::availability::{Availability, AvailabilityId, DateRange};
use crate::domain::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::domain::review::{Review, ReviewId, ReviewStatus, ReviewSubject};
use crate::error::Result;

#[async_trait]
pub trait AccommodationRepository: Send + Sync {
    async fn insert(&self, accommodation: Accommodation) -> Result<Accommodation>;
    async fn update(&self, accommodation: &Accommodation) -> Result<()>;
    async fn find(&self, id: AccommodationId) -> Result<Option<Accommodation>>;
    async fn list(&self) -> Result<Vec<Accommodation>>;
    async fn list_by_status(&self, status: AccommodationStatus) -> Result<Vec<Accommodation>>;
    async fn list_by_host(&self, host_id: AccountId) -> Result<Vec<Accommodation>>;
    /// Removes the accommodation together with its availabilities, its
    /// reservations, and the reviews attached to it, atomically.
    async fn delete_cascade(&self, id: AccommodationId) -> Result<()>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn insert(&self, availability: Availability) -> Result<Availability>;
    async fn find(&self, id: AvailabilityId) -> Result<Option<Availability>>;
    /// Windows of one accommodation, ordered by start date.
    async fn list_by_accommodation(&self, id: AccommodationId) -> Result<Vec<Availability>>;
    /// Returns whether the interval existed.
    async fn delete(&self, id: AvailabilityId) -> Result<bool>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert(&self, reservation: Reservation) -> Result<Reservation>;
    async fn update(&self, reservation: &Reservation) -> Result<()>;
    async fn find(&self, id: ReservationId) -> Result<Option<Reservation>>;
    /// Returns whether the reservation existed.
    async fn delete(&self, id: ReservationId) -> Result<bool>;
    async fn list_by_accommodation(&self, id: AccommodationId) -> Result<Vec<Reservation>>;
    async fn list_by_guest(&self, guest_id: AccountId) -> Result<Vec<Reservation>>;
    /// Reservations on the accommodation whose period intersects `range`
    /// and whose status is one of `statuses`.
    async fn count_overlapping(
        &self,
        accommodation_id: AccommodationId,
        range: &DateRange,
        statuses: &[ReservationStatus],
    ) -> Result<u64>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: Review) -> Result<Review>;
    async fn update(&self, review: &Review) -> Result<()>;
    async fn find(&self, id: ReviewId) -> Result<Option<Review>>;
    async fn list_by_subject(&self, subject: ReviewSubject) -> Result<Vec<Review>>;
    async fn list_by_status(&self, status: ReviewStatus) -> Result<Vec<Review>>;
}
