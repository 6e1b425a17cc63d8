//! Arena-style in-memory store: one table per entity keyed by id, explicit
//! foreign-key fields, a single id sequence. One `RwLock` guards all tables,
//! so every mutation (including the cascade delete) applies atomically and
//! readers always observe a consistent snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::account::AccountId;
use crate::domain::accommodation::{Accommodation, AccommodationId, AccommodationStatus};
use crate::domain::availability::{Availability, AvailabilityId, DateRange};
use crate::domain::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::domain::review::{Review, ReviewId, ReviewStatus, ReviewSubject};
use crate::error::{EngineError, Result};
use crate::ports::repository::{
    AccommodationRepository, AvailabilityRepository, ReservationRepository, ReviewRepository,
};

#[derive(Default)]
struct Inner {
    seq: u64,
    accommodations: HashMap<AccommodationId, Accommodation>,
    availabilities: HashMap<AvailabilityId, Availability>,
    reservations: HashMap<ReservationId, Reservation>,
    reviews: HashMap<ReviewId, Review>,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccommodationRepository for MemoryStore {
    async fn insert(&self, mut accommodation: Accommodation) -> Result<Accommodation> {
        let mut inner = self.inner.write();
        accommodation.id = AccommodationId(inner.next_id());
        inner
            .accommodations
            .insert(accommodation.id, accommodation.clone());
        Ok(accommodation)
    }

    async fn update(&self, accommodation: &Accommodation) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.accommodations.contains_key(&accommodation.id) {
            return Err(EngineError::AccommodationNotFound {
                id: accommodation.id,
            });
        }
        inner
            .accommodations
            .insert(accommodation.id, accommodation.clone());
        Ok(())
    }

    async fn find(&self, id: AccommodationId) -> Result<Option<Accommodation>> {
        Ok(self.inner.read().accommodations.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Accommodation>> {
        let inner = self.inner.read();
        let mut all: Vec<Accommodation> = inner.accommodations.values().cloned().collect();
        all.sort_by_key(|a| a.id);
        Ok(all)
    }

    async fn list_by_status(&self, status: AccommodationStatus) -> Result<Vec<Accommodation>> {
        let inner = self.inner.read();
        let mut matching: Vec<Accommodation> = inner
            .accommodations
            .values()
            .filter(|a| a.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.id);
        Ok(matching)
    }

    async fn list_by_host(&self, host_id: AccountId) -> Result<Vec<Accommodation>> {
        let inner = self.inner.read();
        let mut matching: Vec<Accommodation> = inner
            .accommodations
            .values()
            .filter(|a| a.host_id == host_id)
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.id);
        Ok(matching)
    }

    async fn delete_cascade(&self, id: AccommodationId) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.accommodations.remove(&id).is_none() {
            return Err(EngineError::AccommodationNotFound { id });
        }
        inner.availabilities.retain(|_, a| a.accommodation_id != id);
        inner.reservations.retain(|_, r| r.accommodation_id != id);
        inner
            .reviews
            .retain(|_, r| r.subject != ReviewSubject::Accommodation(id));
        Ok(())
    }
}

#[async_trait]
impl AvailabilityRepository for MemoryStore {
    async fn insert(&self, mut availability: Availability) -> Result<Availability> {
        let mut inner = self.inner.write();
        if !inner
            .accommodations
            .contains_key(&availability.accommodation_id)
        {
            return Err(EngineError::Integrity(format!(
                "availability references missing accommodation {}",
                availability.accommodation_id
            )));
        }
        availability.id = AvailabilityId(inner.next_id());
        inner
            .availabilities
            .insert(availability.id, availability.clone());
        Ok(availability)
    }

    async fn find(&self, id: AvailabilityId) -> Result<Option<Availability>> {
        Ok(self.inner.read().availabilities.get(&id).cloned())
    }

    async fn list_by_accommodation(&self, id: AccommodationId) -> Result<Vec<Availability>> {
        let inner = self.inner.read();
        let mut windows: Vec<Availability> = inner
            .availabilities
            .values()
            .filter(|a| a.accommodation_id == id)
            .cloned()
            .collect();
        windows.sort_by_key(|a| a.period.from);
        Ok(windows)
    }

    async fn delete(&self, id: AvailabilityId) -> Result<bool> {
        Ok(self.inner.write().availabilities.remove(&id).is_some())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn insert(&self, mut reservation: Reservation) -> Result<Reservation> {
        let mut inner = self.inner.write();
        if !inner
            .accommodations
            .contains_key(&reservation.accommodation_id)
        {
            return Err(EngineError::Integrity(format!(
                "reservation references missing accommodation {}",
                reservation.accommodation_id
            )));
        }
        reservation.id = ReservationId(inner.next_id());
        inner
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update(&self, reservation: &Reservation) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.reservations.contains_key(&reservation.id) {
            return Err(EngineError::ReservationNotFound { id: reservation.id });
        }
        inner
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.inner.read().reservations.get(&id).cloned())
    }

    async fn delete(&self, id: ReservationId) -> Result<bool> {
        Ok(self.inner.write().reservations.remove(&id).is_some())
    }

    async fn list_by_accommodation(&self, id: AccommodationId) -> Result<Vec<Reservation>> {
        let inner = self.inner.read();
        let mut matching: Vec<Reservation> = inner
            .reservations
            .values()
            .filter(|r| r.accommodation_id == id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.id);
        Ok(matching)
    }

    async fn list_by_guest(&self, guest_id: AccountId) -> Result<Vec<Reservation>> {
        let inner = self.inner.read();
        let mut matching: Vec<Reservation> = inner
            .reservations
            .values()
            .filter(|r| r.guest_id == guest_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.id);
        Ok(matching)
    }

    async fn count_overlapping(
        &self,
        accommodation_id: AccommodationId,
        range: &DateRange,
        statuses: &[ReservationStatus],
    ) -> Result<u64> {
        let inner = self.inner.read();
        let count = inner
            .reservations
            .values()
            .filter(|r| {
                r.accommodation_id == accommodation_id
                    && statuses.contains(&r.status)
                    && r.period.overlaps(range)
            })
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn insert(&self, mut review: Review) -> Result<Review> {
        let mut inner = self.inner.write();
        if let ReviewSubject::Accommodation(id) = review.subject
            && !inner.accommodations.contains_key(&id)
        {
            return Err(EngineError::Integrity(format!(
                "review references missing accommodation {id}"
            )));
        }
        review.id = ReviewId(inner.next_id());
        inner.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, review: &Review) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.reviews.contains_key(&review.id) {
            return Err(EngineError::ReviewNotFound { id: review.id });
        }
        inner.reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn find(&self, id: ReviewId) -> Result<Option<Review>> {
        Ok(self.inner.read().reviews.get(&id).cloned())
    }

    async fn list_by_subject(&self, subject: ReviewSubject) -> Result<Vec<Review>> {
        let inner = self.inner.read();
        let mut matching: Vec<Review> = inner
            .reviews
            .values()
            .filter(|r| r.subject == subject)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.id);
        Ok(matching)
    }

    async fn list_by_status(&self, status: ReviewStatus) -> Result<Vec<Review>> {
        let inner = self.inner.read();
        let mut matching: Vec<Review> = inner
            .reviews
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.id);
        Ok(matching)
    }
}
