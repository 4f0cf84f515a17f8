//! End-to-end engine flow tests: evaluation passes driving claim,
//! settlement, and compensation against scripted collaborators.

mod support;

use std::sync::Arc;
use std::time::Duration;

use floorsniper::domain::Price;
use floorsniper::engine::EngineSettings;
use floorsniper::error::PurchaseError;
use floorsniper::port::notifier::Event;
use floorsniper::port::OrderStore;
use floorsniper::testkit::{listing, watch_order, StubMarket, StubSubmitter};
use support::harness;

/// Give spawned settlement tasks time to finish.
async fn settle_grace() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn triggered_order_is_purchased_and_permanently_removed() {
    let order = watch_order("u1", "0.05");
    let h = harness(
        vec![order.clone()],
        StubMarket::always(vec![listing("100", "0.04")]),
        StubSubmitter::succeeding(),
        EngineSettings::default(),
    );

    h.engine.run_pass().await;
    settle_grace().await;

    assert!(h.store.list().await.unwrap().is_empty());
    assert_eq!(h.submitter.submitted().len(), 1);

    let events = h.notifier.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Triggered(ev) if ev.order_id == order.id)));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::ExecutionCompleted(ev) if ev.success)));
}

#[tokio::test]
async fn above_trigger_listing_updates_floor_and_keeps_order() {
    let order = watch_order("u1", "0.05");
    let h = harness(
        vec![order.clone()],
        StubMarket::always(vec![listing("100", "0.06")]),
        StubSubmitter::succeeding(),
        EngineSettings::default(),
    );

    h.engine.run_pass().await;

    let stored = h.store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, order.id);
    assert_eq!(
        stored[0].floor_price,
        Some(Price::from_coin_str("0.06").unwrap())
    );
    assert!(h.submitter.submitted().is_empty());
}

#[tokio::test]
async fn failed_settlement_compensates_before_the_next_tick() {
    let order = watch_order("u1", "0.05");
    let h = harness(
        vec![order.clone()],
        StubMarket::always(vec![listing("100", "0.04")]),
        StubSubmitter::with_outcomes(vec![Err(PurchaseError::ListingGone(
            "already filled".into(),
        ))]),
        EngineSettings::default(),
    );

    h.engine.run_pass().await;
    settle_grace().await;

    let stored = h.store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, order.id);
    assert_eq!(stored[0].filters, order.filters);
    assert_eq!(
        stored[0].floor_price,
        Some(Price::from_coin_str("0.04").unwrap())
    );
}

#[tokio::test]
async fn contended_listing_goes_to_the_first_evaluated_order() {
    let first = watch_order("u1", "0.05");
    let second = watch_order("u2", "0.05");
    let h = harness(
        vec![first.clone(), second.clone()],
        StubMarket::always(vec![listing("100", "0.04")]),
        StubSubmitter::single_copy(),
        EngineSettings::default(),
    );

    h.engine.run_pass().await;
    settle_grace().await;

    // Both orders trigger on the same listing; the first settles, the
    // second observes the listing gone and compensates.
    assert_eq!(h.submitter.submitted().len(), 2);

    let stored = h.store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, second.id);
    assert!(stored.iter().all(|o| o.id != first.id));

    let events = h.notifier.events();
    let successes = events
        .iter()
        .filter(|e| matches!(e, Event::ExecutionCompleted(ev) if ev.success))
        .count();
    let compensated = events
        .iter()
        .filter(|e| matches!(e, Event::ExecutionCompleted(ev) if ev.compensated))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(compensated, 1);
}

#[tokio::test]
async fn defective_order_is_reported_and_left_in_place() {
    let mut defective = watch_order("u1", "0.05");
    defective.filters.breed_count = vec!["many".into()];
    let healthy = watch_order("u2", "0.05");

    let h = harness(
        vec![defective.clone(), healthy.clone()],
        StubMarket::always(vec![listing("100", "0.04")]),
        StubSubmitter::succeeding(),
        EngineSettings::default(),
    );

    h.engine.run_pass().await;
    settle_grace().await;

    // The defective order never queries or claims; the healthy one
    // proceeds normally in the same pass.
    let stored = h.store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, defective.id);

    let events = h.notifier.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::OrderDefect(ev) if ev.order_id == defective.id)));
    assert_eq!(h.submitter.submitted().len(), 1);
}

#[tokio::test]
async fn dry_run_reports_triggers_but_never_buys() {
    let order = watch_order("u1", "0.05");
    let h = harness(
        vec![order.clone()],
        StubMarket::always(vec![listing("100", "0.04")]),
        StubSubmitter::succeeding(),
        EngineSettings {
            dry_run: true,
            ..EngineSettings::default()
        },
    );

    h.engine.run_pass().await;
    settle_grace().await;

    assert!(h.submitter.submitted().is_empty());

    let stored = h.store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, order.id);
    assert!(h
        .notifier
        .events()
        .iter()
        .any(|e| matches!(e, Event::Triggered(_))));
}

#[tokio::test]
async fn interleaved_passes_never_race_one_order_into_two_attempts() {
    let h = harness(
        vec![watch_order("u1", "0.05")],
        StubMarket::always(vec![listing("100", "0.04")]),
        StubSubmitter::succeeding().with_delay(Duration::from_millis(50)),
        EngineSettings::default(),
    );

    let engine = Arc::new(h.engine);
    let mut passes = Vec::new();
    for _ in 0..5 {
        let engine = engine.clone();
        passes.push(tokio::spawn(async move { engine.run_pass().await }));
    }
    for pass in passes {
        pass.await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(
        h.submitter.submitted().len(),
        1,
        "an order id may never be claimed twice"
    );
    assert!(h.submitter.max_in_flight() <= 1);
    assert!(h.store.list().await.unwrap().is_empty());
}
