//! Debounce and coalescing behavior of the engine loop.

mod support;

use std::time::Duration;

use floorsniper::engine::EngineSettings;
use floorsniper::port::ChainHead;
use floorsniper::testkit::{watch_order, StubMarket, StubSubmitter};
use support::harness;
use tokio::sync::mpsc;

fn settings(min_tick_interval: Duration) -> EngineSettings {
    EngineSettings {
        min_tick_interval,
        ..EngineSettings::default()
    }
}

#[tokio::test]
async fn head_burst_collapses_into_one_pass() {
    let h = harness(
        vec![watch_order("u1", "0.05")],
        StubMarket::empty(),
        StubSubmitter::succeeding(),
        settings(Duration::from_millis(200)),
    );
    let market = h.market.clone();

    let (tx, rx) = mpsc::channel(16);
    for n in 0..5 {
        tx.send(ChainHead::new(n)).await.unwrap();
    }
    drop(tx);

    h.engine.run(rx).await;

    // One query per order per pass: five near-simultaneous heads must
    // produce exactly one pass.
    assert_eq!(market.calls(), 1);
}

#[tokio::test]
async fn slow_enough_heads_each_run_a_pass() {
    let h = harness(
        vec![watch_order("u1", "0.05")],
        StubMarket::empty(),
        StubSubmitter::succeeding(),
        settings(Duration::from_millis(20)),
    );
    let market = h.market.clone();

    let (tx, rx) = mpsc::channel(16);
    let engine = tokio::spawn(h.engine.run(rx));

    for n in 0..3 {
        tx.send(ChainHead::new(n)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
    drop(tx);
    engine.await.unwrap();

    assert_eq!(market.calls(), 3);
}

#[tokio::test]
async fn heads_arriving_mid_pass_coalesce_into_one_follow_up() {
    let h = harness(
        vec![watch_order("u1", "0.05")],
        StubMarket::empty().with_delay(Duration::from_millis(150)),
        StubSubmitter::succeeding(),
        settings(Duration::from_millis(1)),
    );
    let market = h.market.clone();

    let (tx, rx) = mpsc::channel(16);
    let engine = tokio::spawn(h.engine.run(rx));

    // First head starts a slow pass.
    tx.send(ChainHead::new(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    // Three more heads arrive while the pass is still running; they are
    // each slow enough for the gate but must collapse into one
    // follow-up pass, not three.
    for n in 2..5 {
        tx.send(ChainHead::new(n)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    drop(tx);
    engine.await.unwrap();

    assert_eq!(market.calls(), 2);
}
