use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::adapters::memory::store::MemoryStore;
use crate::config::types::Config;
use crate::domain::account::{AccountId, Caller, Role};
use crate::domain::accommodation::{
    Accommodation, AccommodationId, AccommodationStatus, PricingMode,
};
use crate::domain::availability::{Availability, AvailabilityId, DateRange};
use crate::domain::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::engine::Engine;
use crate::ports::clock::Clock;
use crate::ports::notifier::{Notification, Notifier};

pub struct FixedClock {
    pub now: DateTime<Utc>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

/// Engine over a shared in-memory store, a recording notifier, and a clock
/// pinned to `now`.
pub struct TestHarness {
    pub engine: Engine,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness_at(now: DateTime<Utc>) -> TestHarness {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let engine = Engine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        notifier.clone(),
        Arc::new(FixedClock { now }),
        Config::default(),
    );
    TestHarness {
        engine,
        store,
        notifier,
    }
}

pub fn harness() -> TestHarness {
    harness_at(Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap())
}

// --- Factory functions ---

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn range(from: NaiveDate, to: NaiveDate) -> DateRange {
    DateRange { from, to }
}

pub fn guest(id: u64) -> Caller {
    Caller::new(AccountId(id), Role::Guest)
}

pub fn host(id: u64) -> Caller {
    Caller::new(AccountId(id), Role::Host)
}

pub fn admin(id: u64) -> Caller {
    Caller::new(AccountId(id), Role::Admin)
}

pub fn make_accommodation(host_id: u64) -> Accommodation {
    Accommodation {
        id: AccommodationId(0),
        host_id: AccountId(host_id),
        title: "Cozy Cottage".into(),
        description: "A charming place to relax".into(),
        location: "Green Valley".into(),
        min_guests: 1,
        max_guests: 4,
        kind: "Cottage".into(),
        benefits: vec!["wifi".into()],
        status: AccommodationStatus::Accepted,
        pricing_mode: PricingMode::PerUnit,
        cancellation_deadline_days: 1,
    }
}

pub fn make_availability(
    accommodation_id: AccommodationId,
    from: NaiveDate,
    to: NaiveDate,
    nightly_price: f64,
) -> Availability {
    Availability {
        id: AvailabilityId(0),
        accommodation_id,
        period: DateRange { from, to },
        nightly_price,
    }
}

pub fn make_reservation(
    guest_id: u64,
    accommodation_id: AccommodationId,
    from: NaiveDate,
    to: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: ReservationId(0),
        guest_id: AccountId(guest_id),
        accommodation_id,
        period: DateRange { from, to },
        guest_count: 2,
        status,
    }
}
