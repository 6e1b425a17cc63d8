//! The transport-agnostic operation surface. Each public method is one unit
//! of work: a handful of reads and at most one committed write, applied
//! atomically per accommodation aggregate.

mod accommodations;
mod eligibility;
mod locks;
mod reports;
mod reservations;
mod reviews;
mod search;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::clock::SystemClock;
use crate::adapters::memory::store::MemoryStore;
use crate::adapters::notifier::TracingNotifier;
use crate::config::types::Config;
use crate::domain::account::{Caller, Role};
use crate::domain::accommodation::{Accommodation, AccommodationId};
use crate::domain::reservation::{Reservation, ReservationId};
use crate::error::{EngineError, Result};
use crate::ports::clock::Clock;
use crate::ports::notifier::Notifier;
use crate::ports::repository::{
    AccommodationRepository, AvailabilityRepository, ReservationRepository, ReviewRepository,
};

pub struct Engine {
    accommodations: Arc<dyn AccommodationRepository>,
    availabilities: Arc<dyn AvailabilityRepository>,
    reservations: Arc<dyn ReservationRepository>,
    reviews: Arc<dyn ReviewRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: Config,
    locks: locks::AggregateLocks,
}

impl Engine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        accommodations: Arc<dyn AccommodationRepository>,
        availabilities: Arc<dyn AvailabilityRepository>,
        reservations: Arc<dyn ReservationRepository>,
        reviews: Arc<dyn ReviewRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            accommodations,
            availabilities,
            reservations,
            reviews,
            notifier,
            clock,
            config,
            locks: locks::AggregateLocks::default(),
        }
    }

    /// Engine over a fresh in-memory store, a logging notifier, and the
    /// system clock.
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(TracingNotifier),
            Arc::new(SystemClock),
            config,
        )
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    pub(crate) async fn require_accommodation(
        &self,
        id: AccommodationId,
    ) -> Result<Accommodation> {
        self.accommodations
            .find(id)
            .await?
            .ok_or(EngineError::AccommodationNotFound { id })
    }

    pub(crate) async fn require_reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.reservations
            .find(id)
            .await?
            .ok_or(EngineError::ReservationNotFound { id })
    }

    /// The owning host, or an admin, may manage an accommodation.
    fn require_manager(caller: &Caller, accommodation: &Accommodation) -> Result<()> {
        if caller.is_admin()
            || (caller.role == Role::Host && caller.id == accommodation.host_id)
        {
            Ok(())
        } else {
            Err(EngineError::NotAccommodationOwner)
        }
    }

    fn require_role(caller: &Caller, role: Role) -> Result<()> {
        if caller.role == role {
            return Ok(());
        }
        Err(match role {
            Role::Guest => EngineError::GuestRoleRequired,
            Role::Host => EngineError::HostRoleRequired,
            _ => EngineError::AdminRoleRequired,
        })
    }

    fn require_admin(caller: &Caller) -> Result<()> {
        if caller.is_admin() {
            Ok(())
        } else {
            Err(EngineError::AdminRoleRequired)
        }
    }
}
