//! The four-way search pipeline over a small seeded catalog.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use bookstay::adapters::memory::store::MemoryStore;
use bookstay::adapters::notifier::TracingNotifier;
use bookstay::config::types::Config;
use bookstay::domain::account::{AccountId, Caller, Role};
use bookstay::domain::accommodation::{
    AccommodationDraft, AccommodationId, AccommodationStatus, PricingMode,
};
use bookstay::domain::availability::DateRange;
use bookstay::domain::search::SearchFilter;
use bookstay::engine::Engine;
use bookstay::ports::clock::Clock;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

const HOST: Caller = Caller {
    id: AccountId(10),
    role: Role::Host,
};
const ADMIN: Caller = Caller {
    id: AccountId(1),
    role: Role::Admin,
};

fn engine() -> Engine {
    let store = Arc::new(MemoryStore::new());
    Engine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        Arc::new(TracingNotifier),
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap(),
        )),
        Config::default(),
    )
}

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, day).unwrap()
}

fn r(from: NaiveDate, to: NaiveDate) -> DateRange {
    DateRange { from, to }
}

async fn publish(
    engine: &Engine,
    title: &str,
    location: &str,
    kind: &str,
    max_guests: u32,
    mode: PricingMode,
    windows: &[(NaiveDate, NaiveDate, f64)],
) -> AccommodationId {
    let acc = engine
        .create_accommodation(
            &HOST,
            AccommodationDraft {
                title: title.into(),
                description: String::new(),
                location: location.into(),
                min_guests: 1,
                max_guests,
                kind: kind.into(),
                benefits: vec!["wifi".into()],
                pricing_mode: mode,
            },
        )
        .await
        .unwrap();
    engine
        .change_accommodation_status(&ADMIN, acc.id, AccommodationStatus::Accepted)
        .await
        .unwrap();
    for (from, to, price) in windows {
        engine
            .add_availability(&HOST, acc.id, r(*from, *to), *price)
            .await
            .unwrap();
    }
    acc.id
}

/// Three published listings: a cheap cottage, a pricey loft, and one with
/// no availability at all.
async fn catalog(engine: &Engine) -> (AccommodationId, AccommodationId, AccommodationId) {
    let cottage = publish(
        engine,
        "Cozy Cottage",
        "Green Valley",
        "Cottage",
        4,
        PricingMode::PerUnit,
        &[(d(7, 1), d(7, 10), 80.0), (d(7, 10), d(7, 20), 90.0)],
    )
    .await;
    let loft = publish(
        engine,
        "Modern Loft",
        "City Center",
        "Apartment",
        2,
        PricingMode::PerGuest,
        &[(d(7, 1), d(7, 15), 200.0)],
    )
    .await;
    let empty = publish(
        engine,
        "Bare Barn",
        "Green Valley",
        "Cottage",
        6,
        PricingMode::PerUnit,
        &[],
    )
    .await;
    (cottage, loft, empty)
}

#[tokio::test]
async fn unlisted_accommodations_are_invisible() {
    let engine = engine();
    let (_, _, empty) = catalog(&engine).await;
    // A pending accommodation never shows up either.
    engine
        .create_accommodation(
            &HOST,
            AccommodationDraft {
                title: "Hidden Hut".into(),
                description: String::new(),
                location: "Green Valley".into(),
                min_guests: 1,
                max_guests: 2,
                kind: "Cottage".into(),
                benefits: vec![],
                pricing_mode: PricingMode::PerUnit,
            },
        )
        .await
        .unwrap();

    let cards = engine.search(&SearchFilter::default()).await.unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| c.id != empty));
    assert!(cards.iter().all(|c| c.title != "Hidden Hut"));
}

#[tokio::test]
async fn no_ranges_yields_min_nightly_price_cards() {
    let engine = engine();
    let (cottage, loft, _) = catalog(&engine).await;
    let cards = engine.search(&SearchFilter::default()).await.unwrap();

    let cottage_card = cards.iter().find(|c| c.id == cottage).unwrap();
    assert_eq!(cottage_card.min_nightly_price, Some(80.0));
    assert_eq!(cottage_card.total_price, None);

    let loft_card = cards.iter().find(|c| c.id == loft).unwrap();
    assert_eq!(loft_card.min_nightly_price, Some(200.0));
}

#[tokio::test]
async fn structural_filters_narrow_the_catalog() {
    let engine = engine();
    let (cottage, _, empty) = catalog(&engine).await;

    let by_title = engine
        .search(&SearchFilter {
            title: Some("cozy".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, cottage);

    // The barn matches structurally but has no availability.
    let by_location = engine
        .search(&SearchFilter {
            location: Some("green valley".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_location.len(), 1);
    assert!(by_location.iter().all(|c| c.id != empty));

    let by_guests = engine
        .search(&SearchFilter {
            guests: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_guests.len(), 1);
    assert_eq!(by_guests[0].id, cottage);

    let by_kind = engine
        .search(&SearchFilter {
            kind: Some("Apartment".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_kind.len(), 1);
}

#[tokio::test]
async fn price_range_only_filters_on_nightly_floor() {
    let engine = engine();
    let (cottage, _, _) = catalog(&engine).await;
    let cards = engine
        .search(&SearchFilter {
            price_from: Some(50.0),
            price_to: Some(100.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, cottage);
    assert_eq!(cards[0].min_nightly_price, Some(80.0));
}

#[tokio::test]
async fn date_range_only_attaches_stay_totals() {
    let engine = engine();
    let (cottage, loft, _) = catalog(&engine).await;
    let cards = engine
        .search(&SearchFilter {
            guests: Some(2),
            available_from: Some(d(7, 5)),
            available_to: Some(d(7, 12)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cards.len(), 2);

    // Cottage: 5 nights at 80 plus 2 at 90, per unit.
    let cottage_card = cards.iter().find(|c| c.id == cottage).unwrap();
    assert_eq!(cottage_card.total_price, Some(580.0));
    assert_eq!(cottage_card.min_nightly_price, None);

    // Loft: 7 nights at 200, times 2 guests.
    let loft_card = cards.iter().find(|c| c.id == loft).unwrap();
    assert_eq!(loft_card.total_price, Some(2800.0));
}

#[tokio::test]
async fn uncovered_date_range_excludes_accommodation() {
    let engine = engine();
    let (cottage, _, _) = catalog(&engine).await;
    let cards = engine
        .search(&SearchFilter {
            available_from: Some(d(7, 12)),
            available_to: Some(d(7, 18)),
            ..Default::default()
        })
        .await
        .unwrap();
    // The loft's single window ends on the 15th; only the cottage covers it.
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, cottage);
}

#[tokio::test]
async fn both_ranges_filter_on_stay_total() {
    let engine = engine();
    let (cottage, _, _) = catalog(&engine).await;
    let cards = engine
        .search(&SearchFilter {
            guests: Some(2),
            available_from: Some(d(7, 5)),
            available_to: Some(d(7, 12)),
            price_from: Some(500.0),
            price_to: Some(1000.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, cottage);
    assert_eq!(cards[0].total_price, Some(580.0));
}

#[tokio::test]
async fn cards_serialize_with_stable_field_names() {
    let engine = engine();
    catalog(&engine).await;
    let cards = engine.search(&SearchFilter::default()).await.unwrap();
    let json = serde_json::to_value(&cards[0]).unwrap();
    for field in [
        "id",
        "title",
        "location",
        "rating",
        "review_count",
        "min_guests",
        "max_guests",
        "min_nightly_price",
        "total_price",
    ] {
        assert!(json.get(field).is_some(), "card JSON missing '{field}'");
    }
}

#[tokio::test]
async fn half_specified_ranges_are_rejected() {
    let engine = engine();
    catalog(&engine).await;
    for filter in [
        SearchFilter {
            available_from: Some(d(7, 1)),
            ..Default::default()
        },
        SearchFilter {
            price_to: Some(100.0),
            ..Default::default()
        },
    ] {
        assert!(engine.search(&filter).await.is_err());
    }
}
