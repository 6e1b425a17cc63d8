//! Two writers racing to add overlapping windows on the same accommodation
//! must not both succeed: check-then-insert runs under the aggregate's
//! critical section.

use std::sync::Arc;

use chrono::NaiveDate;

use bookstay::config::types::Config;
use bookstay::domain::account::{AccountId, Caller, Role};
use bookstay::domain::accommodation::{AccommodationDraft, AccommodationStatus, PricingMode};
use bookstay::domain::availability::DateRange;
use bookstay::engine::Engine;

const HOST: Caller = Caller {
    id: AccountId(10),
    role: Role::Host,
};
const ADMIN: Caller = Caller {
    id: AccountId(1),
    role: Role::Admin,
};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_overlapping_adds_admit_exactly_one() {
    let engine = Arc::new(Engine::in_memory(Config::default()));
    let acc = engine
        .create_accommodation(
            &HOST,
            AccommodationDraft {
                title: "Race Cabin".into(),
                description: String::new(),
                location: "Lakeside".into(),
                min_guests: 1,
                max_guests: 4,
                kind: "Cabin".into(),
                benefits: vec![],
                pricing_mode: PricingMode::PerUnit,
            },
        )
        .await
        .unwrap();
    engine
        .change_accommodation_status(&ADMIN, acc.id, AccommodationStatus::Accepted)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        let id = acc.id;
        handles.push(tokio::spawn(async move {
            engine
                .add_availability(
                    &HOST,
                    id,
                    DateRange {
                        from: d(1),
                        to: d(10),
                    },
                    100.0,
                )
                .await
                .is_ok()
        }));
    }
    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);

    let details = engine.booking_details(&HOST, acc.id).await.unwrap();
    assert_eq!(details.availabilities.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_staggered_adds_keep_the_store_disjoint() {
    let engine = Arc::new(Engine::in_memory(Config::default()));
    let acc = engine
        .create_accommodation(
            &HOST,
            AccommodationDraft {
                title: "Race Cabin".into(),
                description: String::new(),
                location: "Lakeside".into(),
                min_guests: 1,
                max_guests: 4,
                kind: "Cabin".into(),
                benefits: vec![],
                pricing_mode: PricingMode::PerUnit,
            },
        )
        .await
        .unwrap();
    engine
        .change_accommodation_status(&ADMIN, acc.id, AccommodationStatus::Accepted)
        .await
        .unwrap();

    // Windows at offsets 1, 4, 7, ... each spanning 5 days overlap their
    // neighbours; whichever subset lands must be pairwise disjoint.
    let mut handles = Vec::new();
    for start in (1..20).step_by(3) {
        let engine = Arc::clone(&engine);
        let id = acc.id;
        handles.push(tokio::spawn(async move {
            let _ = engine
                .add_availability(
                    &HOST,
                    id,
                    DateRange {
                        from: d(start),
                        to: d(start + 5),
                    },
                    100.0,
                )
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let windows = engine
        .booking_details(&HOST, acc.id)
        .await
        .unwrap()
        .availabilities;
    assert!(!windows.is_empty());
    for (i, a) in windows.iter().enumerate() {
        for b in &windows[i + 1..] {
            assert!(
                !a.period.overlaps(&b.period),
                "{} overlaps {}",
                a.period,
                b.period
            );
        }
    }
}
