// tests/collector_pipeline.rs
//
// End-to-end pipeline tests over mock connectors and the in-memory
// store: clustering scenario, merge decision, idempotence across runs,
// and the three failure tiers.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use disaster_event_collector::collector::Collector;
use disaster_event_collector::location::Gazetteer;
use disaster_event_collector::sources::SourceConnector;
use disaster_event_collector::store::{
    EventFilter, EventPage, EventStore, MemoryEventStore, PersistedEvent, StoreError,
};
use disaster_event_collector::types::{
    DisasterType, LocationHint, ProcessedEvent, RawDataItem, SourceKind, SourceRecord,
};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// The scenario batch: two earthquake reports near Japan an hour apart,
/// plus an unrelated flood in Thailand.
fn scenario_items() -> Vec<RawDataItem> {
    vec![
        RawDataItem {
            id: Some("a".into()),
            source_kind: SourceKind::Social,
            content: "Strong earthquake tremor reported off the coast of Japan".into(),
            url: None,
            author: Some("QuakeWatch".into()),
            timestamp: t0(),
            location: Some(LocationHint {
                name: Some("Japan".into()),
                latitude: Some(38.32),
                longitude: Some(142.37),
                country: Some("Japan".into()),
                region: None,
            }),
            metadata: HashMap::new(),
            credibility: Some(0.80),
        },
        RawDataItem {
            id: Some("b".into()),
            source_kind: SourceKind::Social,
            content: "Powerful magnitude 6.2 earthquake strikes near Japan, tsunami warnings issued for the coast".into(),
            url: None,
            author: Some("NewsDesk".into()),
            timestamp: t0() + Duration::hours(1),
            location: Some(LocationHint {
                name: Some("Japan".into()),
                latitude: Some(38.30),
                longitude: Some(142.40),
                country: Some("Japan".into()),
                region: None,
            }),
            metadata: HashMap::new(),
            credibility: Some(0.95),
        },
        RawDataItem {
            id: Some("c".into()),
            source_kind: SourceKind::Social,
            content: "Flooding displaces residents across eastern Thailand".into(),
            url: None,
            author: Some("FloodWatch".into()),
            timestamp: t0(),
            location: Some(LocationHint {
                name: Some("Thailand".into()),
                latitude: Some(15.87),
                longitude: Some(100.99),
                country: Some("Thailand".into()),
                region: None,
            }),
            metadata: HashMap::new(),
            credibility: Some(0.70),
        },
    ]
}

struct FixedConnector {
    kind: SourceKind,
    items: Vec<RawDataItem>,
}

#[async_trait]
impl SourceConnector for FixedConnector {
    async fn collect(&self) -> Result<Vec<RawDataItem>> {
        Ok(self.items.clone())
    }
    fn kind(&self) -> SourceKind {
        self.kind
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct FailingConnector;

#[async_trait]
impl SourceConnector for FailingConnector {
    async fn collect(&self) -> Result<Vec<RawDataItem>> {
        Err(anyhow!("feed unavailable"))
    }
    fn kind(&self) -> SourceKind {
        SourceKind::News
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

fn collector_over(store: Arc<dyn EventStore>) -> Collector {
    Collector::new(store, Arc::new(Gazetteer::builtin()))
}

fn boxed(c: impl SourceConnector + 'static) -> Box<dyn SourceConnector> {
    Box::new(c)
}

#[tokio::test]
async fn scenario_clusters_and_creates_two_events() {
    let store = Arc::new(MemoryEventStore::new());
    let collector = collector_over(store.clone());
    let connectors = vec![boxed(FixedConnector {
        kind: SourceKind::Social,
        items: scenario_items(),
    })];

    let results = collector.collect_all(&connectors).await.unwrap();
    assert_eq!(results.len(), 1);

    let r = &results[0];
    assert_eq!(r.source, SourceKind::Social);
    assert_eq!(r.items_collected, 3);
    // Two earthquake reports group; the Thailand flood stays alone.
    assert_eq!(r.items_processed, 2);
    assert_eq!(r.events_created, 2);
    assert_eq!(r.events_updated, 0);
    assert!(r.errors.is_empty());

    let page = store.get_events(&EventFilter::default()).await.unwrap();
    assert_eq!(page.pagination.total, 2);

    // The grouped pair classifies as an earthquake driven by the more
    // credible item, and carries both source records.
    let quake = page
        .events
        .iter()
        .find(|e| e.disaster_type == DisasterType::Earthquake)
        .expect("earthquake event");
    assert_eq!(quake.sources.len(), 2);
    assert_eq!(quake.timestamp, t0() + Duration::hours(1));

    let flood = page
        .events
        .iter()
        .find(|e| e.disaster_type == DisasterType::Flood)
        .expect("flood event");
    assert_eq!(flood.sources.len(), 1);
}

#[tokio::test]
async fn second_run_updates_instead_of_creating() {
    let store = Arc::new(MemoryEventStore::new());
    let collector = collector_over(store.clone());
    let connectors = vec![boxed(FixedConnector {
        kind: SourceKind::Social,
        items: scenario_items(),
    })];

    let first = collector.collect_all(&connectors).await.unwrap();
    assert_eq!(first[0].events_created, 2);

    let second = collector.collect_all(&connectors).await.unwrap();
    assert_eq!(second[0].events_created, 0);
    assert_eq!(second[0].events_updated, 2);

    // No new events; sources doubled on each.
    let page = store.get_events(&EventFilter::default()).await.unwrap();
    assert_eq!(page.pagination.total, 2);
    let quake = page
        .events
        .iter()
        .find(|e| e.disaster_type == DisasterType::Earthquake)
        .unwrap();
    assert_eq!(quake.sources.len(), 4);
}

#[tokio::test]
async fn connector_failure_aborts_the_whole_run() {
    let store = Arc::new(MemoryEventStore::new());
    let collector = collector_over(store.clone());

    // First source succeeds, second fails: the run errors out and no
    // partial result list is returned, but the first source's events
    // are already in the store.
    let connectors = vec![
        boxed(FixedConnector {
            kind: SourceKind::Social,
            items: scenario_items(),
        }),
        boxed(FailingConnector),
    ];

    let err = collector.collect_all(&connectors).await.unwrap_err();
    assert!(format!("{err:#}").contains("feed unavailable"));
    assert_eq!(store.len(), 2);
}

/// Store wrapper that fails every `add_source` call.
struct AppendFailStore {
    inner: MemoryEventStore,
    attempts: AtomicUsize,
}

#[async_trait]
impl EventStore for AppendFailStore {
    async fn create_event(&self, event: &ProcessedEvent) -> Result<PersistedEvent, StoreError> {
        self.inner.create_event(event).await
    }
    async fn get_events(&self, filter: &EventFilter) -> Result<EventPage, StoreError> {
        self.inner.get_events(filter).await
    }
    async fn add_source(
        &self,
        _event_id: &str,
        _source: &SourceRecord,
    ) -> Result<SourceRecord, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Backend("append rejected".into()))
    }
}

#[tokio::test]
async fn append_failures_are_recorded_but_do_not_abort() {
    let store = Arc::new(AppendFailStore {
        inner: MemoryEventStore::new(),
        attempts: AtomicUsize::new(0),
    });
    let collector = collector_over(store.clone());
    let connectors = vec![boxed(FixedConnector {
        kind: SourceKind::Social,
        items: scenario_items(),
    })];

    // First run creates both events (no appends yet).
    collector.collect_all(&connectors).await.unwrap();

    // Second run routes both clusters to appends, all of which fail.
    let results = collector.collect_all(&connectors).await.unwrap();
    let r = &results[0];

    // Every source in both clusters was attempted despite the failures.
    assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(r.errors.len(), 3);
    // The clusters still count as updates.
    assert_eq!(r.events_updated, 2);
    assert_eq!(r.events_created, 0);
}

/// Store wrapper that fails every query.
struct LookupFailStore {
    inner: MemoryEventStore,
}

#[async_trait]
impl EventStore for LookupFailStore {
    async fn create_event(&self, event: &ProcessedEvent) -> Result<PersistedEvent, StoreError> {
        self.inner.create_event(event).await
    }
    async fn get_events(&self, _filter: &EventFilter) -> Result<EventPage, StoreError> {
        Err(StoreError::Backend("query timeout".into()))
    }
    async fn add_source(
        &self,
        event_id: &str,
        source: &SourceRecord,
    ) -> Result<SourceRecord, StoreError> {
        self.inner.add_source(event_id, source).await
    }
}

#[tokio::test]
async fn lookup_failure_skips_cluster_but_continues_the_source() {
    let store = Arc::new(LookupFailStore {
        inner: MemoryEventStore::new(),
    });
    let collector = collector_over(store.clone());
    let connectors = vec![boxed(FixedConnector {
        kind: SourceKind::Social,
        items: scenario_items(),
    })];

    let results = collector.collect_all(&connectors).await.unwrap();
    let r = &results[0];

    // Both clusters hit the failing lookup and were dropped; the run as
    // a whole still completed.
    assert_eq!(r.items_processed, 2);
    assert_eq!(r.errors.len(), 2);
    assert_eq!(r.events_created, 0);
    assert_eq!(r.events_updated, 0);
    assert_eq!(store.inner.len(), 0);
}

/// Store wrapper that fails every create.
struct CreateFailStore {
    inner: MemoryEventStore,
}

#[async_trait]
impl EventStore for CreateFailStore {
    async fn create_event(&self, _event: &ProcessedEvent) -> Result<PersistedEvent, StoreError> {
        Err(StoreError::Validation("rejected".into()))
    }
    async fn get_events(&self, filter: &EventFilter) -> Result<EventPage, StoreError> {
        self.inner.get_events(filter).await
    }
    async fn add_source(
        &self,
        event_id: &str,
        source: &SourceRecord,
    ) -> Result<SourceRecord, StoreError> {
        self.inner.add_source(event_id, source).await
    }
}

#[tokio::test]
async fn create_failure_is_per_cluster_not_fatal() {
    let store = Arc::new(CreateFailStore {
        inner: MemoryEventStore::new(),
    });
    let collector = collector_over(store.clone());
    let connectors = vec![boxed(FixedConnector {
        kind: SourceKind::Social,
        items: scenario_items(),
    })];

    let results = collector.collect_all(&connectors).await.unwrap();
    let r = &results[0];
    assert_eq!(r.errors.len(), 2);
    assert_eq!(r.events_created, 0);
}

#[tokio::test]
async fn default_connectors_merge_across_sources() {
    let store = Arc::new(MemoryEventStore::new());
    let collector = collector_over(store.clone());
    let connectors = disaster_event_collector::sources::default_connectors();

    let results = collector.collect_all(&connectors).await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(
        results.iter().map(|r| r.items_collected).sum::<usize>(),
        9
    );

    // Social creates the first wave of events; the news batch reports
    // the same three disasters nearby and lands as updates.
    assert_eq!(results[0].events_created, 3);
    assert_eq!(results[1].events_updated, 3);
    assert_eq!(results[1].events_created, 0);

    // Weather: new hurricane, new flood (the river basin is >100 km
    // from the first flood), and an update to the existing fire.
    assert_eq!(results[2].events_created, 2);
    assert_eq!(results[2].events_updated, 1);

    let page = store
        .get_events(&EventFilter {
            limit: Some(50),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 5);
}
