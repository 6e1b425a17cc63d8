use crate::domain::account::{AccountId, Caller, Role};
use crate::domain::accommodation::{
    Accommodation, AccommodationCard, AccommodationDetails, AccommodationDraft, AccommodationId,
    AccommodationStatus, AccommodationUpdate, BookingDetails, PricingMode,
};
use crate::domain::availability::{self, Availability, AvailabilityId, DateRange};
use crate::domain::pricing;
use crate::domain::reservation::ReservationStatus;
use crate::domain::review::{RatingSummary, ReviewStatus, ReviewSubject};
use crate::error::{EngineError, Result};

use super::Engine;

impl Engine {
    pub async fn create_accommodation(
        &self,
        caller: &Caller,
        draft: AccommodationDraft,
    ) -> Result<Accommodation> {
        Self::require_role(caller, Role::Host)?;
        draft.validate()?;
        let accommodation = Accommodation {
            id: AccommodationId::default(),
            host_id: caller.id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            min_guests: draft.min_guests,
            max_guests: draft.max_guests,
            kind: draft.kind,
            benefits: draft.benefits,
            status: AccommodationStatus::Pending,
            pricing_mode: draft.pricing_mode,
            cancellation_deadline_days: self.config.booking.default_cancellation_deadline_days,
        };
        let stored = self.accommodations.insert(accommodation).await?;
        tracing::info!(id = stored.id.0, host = caller.id.0, "accommodation created");
        Ok(stored)
    }

    /// Published catalog as cards with each accommodation's nightly floor.
    pub async fn list_accommodations(&self) -> Result<Vec<AccommodationCard>> {
        let mut cards = Vec::new();
        for accommodation in self
            .accommodations
            .list_by_status(AccommodationStatus::Accepted)
            .await?
        {
            cards.push(self.min_price_card(&accommodation).await?);
        }
        Ok(cards)
    }

    pub async fn get_accommodation(&self, id: AccommodationId) -> Result<AccommodationDetails> {
        let accommodation = self.require_accommodation(id).await?;
        let availabilities = self.availabilities.list_by_accommodation(id).await?;
        let reviews = self
            .reviews
            .list_by_subject(ReviewSubject::Accommodation(id))
            .await?
            .into_iter()
            .filter(|r| r.status == ReviewStatus::Accepted)
            .collect();
        Ok(AccommodationDetails::project(
            accommodation,
            availabilities,
            reviews,
        ))
    }

    pub async fn update_accommodation(
        &self,
        caller: &Caller,
        update: AccommodationUpdate,
    ) -> Result<Accommodation> {
        let mut accommodation = self.require_accommodation(update.id).await?;
        Self::require_manager(caller, &accommodation)?;
        accommodation.title = update.title;
        accommodation.description = update.description;
        accommodation.location = update.location;
        accommodation.min_guests = update.min_guests;
        accommodation.max_guests = update.max_guests;
        accommodation.kind = update.kind;
        accommodation.benefits = update.benefits;
        self.accommodations.update(&accommodation).await?;
        Ok(accommodation)
    }

    pub async fn change_accommodation_status(
        &self,
        caller: &Caller,
        id: AccommodationId,
        status: AccommodationStatus,
    ) -> Result<Accommodation> {
        Self::require_admin(caller)?;
        let mut accommodation = self.require_accommodation(id).await?;
        accommodation.status = status;
        self.accommodations.update(&accommodation).await?;
        tracing::info!(id = id.0, ?status, "accommodation status changed");
        Ok(accommodation)
    }

    pub async fn pending_accommodations(&self, caller: &Caller) -> Result<Vec<Accommodation>> {
        Self::require_admin(caller)?;
        self.accommodations
            .list_by_status(AccommodationStatus::Pending)
            .await
    }

    pub async fn host_accommodations(&self, host_id: AccountId) -> Result<Vec<Accommodation>> {
        self.accommodations.list_by_host(host_id).await
    }

    pub async fn delete_accommodation(&self, caller: &Caller, id: AccommodationId) -> Result<()> {
        let accommodation = self.require_accommodation(id).await?;
        Self::require_manager(caller, &accommodation)?;
        let lock = self.locks.handle(id);
        let _guard = lock.lock().await;
        self.accommodations.delete_cascade(id).await?;
        tracing::info!(id = id.0, "accommodation deleted");
        Ok(())
    }

    pub async fn booking_details(
        &self,
        caller: &Caller,
        id: AccommodationId,
    ) -> Result<BookingDetails> {
        let accommodation = self.require_accommodation(id).await?;
        Self::require_manager(caller, &accommodation)?;
        let availabilities = self.availabilities.list_by_accommodation(id).await?;
        Ok(BookingDetails::project(&accommodation, availabilities))
    }

    pub async fn update_booking_details(
        &self,
        caller: &Caller,
        id: AccommodationId,
        cancellation_deadline_days: u32,
        pricing_mode: PricingMode,
    ) -> Result<BookingDetails> {
        let lock = self.locks.handle(id);
        let _guard = lock.lock().await;
        let mut accommodation = self.require_accommodation(id).await?;
        Self::require_manager(caller, &accommodation)?;
        accommodation.cancellation_deadline_days = cancellation_deadline_days;
        accommodation.pricing_mode = pricing_mode;
        self.accommodations.update(&accommodation).await?;
        let availabilities = self.availabilities.list_by_accommodation(id).await?;
        Ok(BookingDetails::project(&accommodation, availabilities))
    }

    /// Adds a priced window. Fails Conflict when the window strictly
    /// overlaps an existing one; the check-then-insert runs under the
    /// aggregate's critical section so concurrent adds cannot both succeed.
    pub async fn add_availability(
        &self,
        caller: &Caller,
        accommodation_id: AccommodationId,
        period: DateRange,
        nightly_price: f64,
    ) -> Result<Availability> {
        if !nightly_price.is_finite() || nightly_price <= 0.0 {
            return Err(EngineError::InvalidInput {
                reason: format!("nightly price {nightly_price} must be positive"),
            });
        }
        let accommodation = self.require_accommodation(accommodation_id).await?;
        Self::require_manager(caller, &accommodation)?;

        let lock = self.locks.handle(accommodation_id);
        let _guard = lock.lock().await;
        let existing = self
            .availabilities
            .list_by_accommodation(accommodation_id)
            .await?;
        if availability::find_conflict(&existing, &period).is_some() {
            tracing::warn!(
                accommodation = accommodation_id.0,
                %period,
                "rejected overlapping availability"
            );
            return Err(EngineError::AvailabilityOverlap {
                accommodation: accommodation_id,
            });
        }
        let stored = self
            .availabilities
            .insert(Availability {
                id: AvailabilityId::default(),
                accommodation_id,
                period,
                nightly_price,
            })
            .await?;
        tracing::info!(
            accommodation = accommodation_id.0,
            availability = stored.id.0,
            %period,
            "availability added"
        );
        Ok(stored)
    }

    /// Detaches a window. Fails Blocked while any pending or accepted
    /// reservation intersects the window's period.
    pub async fn remove_availability(
        &self,
        caller: &Caller,
        accommodation_id: AccommodationId,
        availability_id: AvailabilityId,
    ) -> Result<()> {
        let accommodation = self.require_accommodation(accommodation_id).await?;
        Self::require_manager(caller, &accommodation)?;

        let lock = self.locks.handle(accommodation_id);
        let _guard = lock.lock().await;
        let window = self
            .availabilities
            .find(availability_id)
            .await?
            .filter(|a| a.accommodation_id == accommodation_id)
            .ok_or(EngineError::AvailabilityNotFound {
                id: availability_id,
            })?;

        let active = self
            .reservations
            .count_overlapping(accommodation_id, &window.period, &ReservationStatus::ACTIVE)
            .await?;
        if active > 0 {
            return Err(EngineError::AvailabilityHasReservations { count: active });
        }

        self.availabilities.delete(availability_id).await?;
        tracing::info!(
            accommodation = accommodation_id.0,
            availability = availability_id.0,
            "availability removed"
        );
        Ok(())
    }

    /// Whether `range` is fully covered by the accommodation's windows.
    pub async fn is_available(&self, id: AccommodationId, range: &DateRange) -> Result<bool> {
        self.require_accommodation(id).await?;
        let intervals = self.availabilities.list_by_accommodation(id).await?;
        Ok(availability::is_covered(&intervals, range))
    }

    /// Total price for a stay, per the accommodation's pricing mode.
    pub async fn quote(
        &self,
        id: AccommodationId,
        range: &DateRange,
        guests: u32,
    ) -> Result<f64> {
        if guests == 0 {
            return Err(EngineError::InvalidInput {
                reason: "guest count must be at least 1".into(),
            });
        }
        let accommodation = self.require_accommodation(id).await?;
        let intervals = self.availabilities.list_by_accommodation(id).await?;
        pricing::quote(accommodation.pricing_mode, &intervals, range, guests)
            .ok_or(EngineError::NotAvailable { accommodation: id })
    }

    /// Card with the nightly floor, plus the published-review rating.
    pub(crate) async fn min_price_card(
        &self,
        accommodation: &Accommodation,
    ) -> Result<AccommodationCard> {
        let intervals = self
            .availabilities
            .list_by_accommodation(accommodation.id)
            .await?;
        let rating = self.rating_for(accommodation.id).await?;
        Ok(AccommodationCard::with_min_price(
            accommodation,
            availability::min_nightly_price(&intervals),
            &rating,
        ))
    }

    pub(crate) async fn rating_for(&self, id: AccommodationId) -> Result<RatingSummary> {
        let reviews = self
            .reviews
            .list_by_subject(ReviewSubject::Accommodation(id))
            .await?;
        Ok(RatingSummary::of(&reviews))
    }
}
