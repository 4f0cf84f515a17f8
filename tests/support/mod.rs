//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use floorsniper::adapter::store::MemoryOrderStore;
use floorsniper::domain::WatchOrder;
use floorsniper::engine::{Engine, EngineSettings};
use floorsniper::port::NotifierRegistry;
use floorsniper::testkit::{CollectingNotifier, StubMarket, StubSubmitter};

/// An engine wired to stubs, with handles kept for assertions.
pub struct Harness {
    pub store: Arc<MemoryOrderStore>,
    pub market: Arc<StubMarket>,
    pub submitter: Arc<StubSubmitter>,
    pub notifier: CollectingNotifier,
    pub engine: Engine,
}

/// Wire an engine over a seeded in-memory store and scripted stubs.
pub fn harness(
    orders: Vec<WatchOrder>,
    market: StubMarket,
    submitter: StubSubmitter,
    settings: EngineSettings,
) -> Harness {
    let store = Arc::new(MemoryOrderStore::with_orders(orders));
    let market = Arc::new(market);
    let submitter = Arc::new(submitter);
    let notifier = CollectingNotifier::new();

    let mut notifiers = NotifierRegistry::new();
    notifiers.register(Box::new(notifier.clone()));

    let engine = Engine::new(
        store.clone(),
        market.clone(),
        submitter.clone(),
        Arc::new(notifiers),
        settings,
    );

    Harness {
        store,
        market,
        submitter,
        notifier,
        engine,
    }
}
