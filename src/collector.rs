// src/collector.rs
//! # Collection Orchestrator & Merge Engine
//!
//! Runs the per-source pipeline: connector batch → greedy clustering →
//! per-cluster classification → append-to-similar or create-new against
//! the event store. Sources run sequentially; so do clusters within a
//! source and appends within a cluster.
//!
//! Failure tiers:
//! 1. a single `add_source` call failing is recorded and the remaining
//!    appends still run;
//! 2. a matching query or create failing is recorded and the remaining
//!    clusters still run;
//! 3. a connector failing aborts the whole run.

use anyhow::{Context, Result};
use chrono::Duration;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::classifier::{assess_severity, classify_disaster_type};
use crate::content::{generate_description, generate_title};
use crate::geo::haversine_km;
use crate::grouping::{group_related_items, sort_by_credibility, RELATED_RADIUS_KM};
use crate::location::Gazetteer;
use crate::sources::SourceConnector;
use crate::store::{EventFilter, EventStore, PersistedEvent, StoreError};
use crate::types::{
    CollectionResult, EventStatus, ProcessedEvent, RawDataItem, SourceRecord,
};

/// Events of the same type within this window are merge candidates.
const SIMILAR_WINDOW_HOURS: i64 = 24;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "collector_items_collected_total",
            "Raw items returned by connectors."
        );
        describe_counter!(
            "collector_items_processed_total",
            "Clusters produced from raw items."
        );
        describe_counter!("collector_events_created_total", "New events persisted.");
        describe_counter!(
            "collector_events_updated_total",
            "Existing events that absorbed a cluster."
        );
        describe_counter!(
            "collector_append_errors_total",
            "Failed add-source calls (recovered)."
        );
        describe_counter!(
            "collector_cluster_errors_total",
            "Clusters dropped by a match/create failure."
        );
        describe_counter!("collector_runs_total", "Completed collection runs.");
        describe_gauge!(
            "collector_last_run_ts",
            "Unix ts when a collection run last finished."
        );
    });
}

/// The pipeline, bound to one event store and one gazetteer.
pub struct Collector {
    store: Arc<dyn EventStore>,
    gazetteer: Arc<Gazetteer>,
}

impl Collector {
    pub fn new(store: Arc<dyn EventStore>, gazetteer: Arc<Gazetteer>) -> Self {
        Self { store, gazetteer }
    }

    /// Run the full pipeline over every connector in order, one
    /// `CollectionResult` per connector. A connector or other escaped
    /// failure aborts the remaining sources (tier 3).
    pub async fn collect_all(
        &self,
        connectors: &[Box<dyn SourceConnector>],
    ) -> Result<Vec<CollectionResult>> {
        ensure_metrics_described();
        tracing::info!(connectors = connectors.len(), "starting collection run");

        let mut results = Vec::with_capacity(connectors.len());
        for connector in connectors {
            let result = self.collect_from_source(connector.as_ref()).await?;
            results.push(result);
        }

        counter!("collector_runs_total").increment(1);
        gauge!("collector_last_run_ts").set(chrono::Utc::now().timestamp() as f64);

        Ok(results)
    }

    /// Per-source pipeline: collect, cluster, merge each cluster into
    /// the store.
    async fn collect_from_source(
        &self,
        connector: &dyn SourceConnector,
    ) -> Result<CollectionResult> {
        let mut result = CollectionResult::new(connector.kind());

        let raw = connector
            .collect()
            .await
            .with_context(|| format!("collecting from {}", connector.name()))?;
        result.items_collected = raw.len();
        counter!("collector_items_collected_total").increment(raw.len() as u64);

        let clusters = group_related_items(raw);
        result.items_processed = clusters.len();
        counter!("collector_items_processed_total").increment(clusters.len() as u64);

        tracing::info!(
            source = connector.name(),
            collected = result.items_collected,
            clusters = result.items_processed,
            "grouped raw items"
        );

        for cluster in clusters {
            self.merge_cluster(cluster, &mut result).await;
        }

        Ok(result)
    }

    /// Build the candidate event for one cluster and either append its
    /// sources to a similar stored event or create a new one.
    async fn merge_cluster(&self, mut cluster: Vec<RawDataItem>, result: &mut CollectionResult) {
        sort_by_credibility(&mut cluster);
        let event = self.build_event(&cluster);

        let similar = match self.find_similar_events(&event).await {
            Ok(similar) => similar,
            Err(e) => {
                tracing::warn!(error = %e, title = %event.title, "similar-event lookup failed");
                counter!("collector_cluster_errors_total").increment(1);
                result.errors.push(format!("lookup failed for '{}': {}", event.title, e));
                return;
            }
        };

        if let Some(target) = similar.first() {
            // Append each source independently: one failed append must
            // not abort the rest.
            for source in &event.sources {
                if let Err(e) = self.store.add_source(&target.id, source).await {
                    tracing::warn!(error = %e, event_id = %target.id, "add-source failed");
                    counter!("collector_append_errors_total").increment(1);
                    result
                        .errors
                        .push(format!("append to {} failed: {}", target.id, e));
                }
            }
            result.events_updated += 1;
            counter!("collector_events_updated_total").increment(1);
            tracing::debug!(event_id = %target.id, sources = event.sources.len(), "updated existing event");
        } else {
            match self.store.create_event(&event).await {
                Ok(created) => {
                    result.events_created += 1;
                    counter!("collector_events_created_total").increment(1);
                    tracing::debug!(event_id = %created.id, title = %created.title, "created event");
                }
                Err(e) => {
                    tracing::warn!(error = %e, title = %event.title, "create-event failed");
                    counter!("collector_cluster_errors_total").increment(1);
                    result
                        .errors
                        .push(format!("create failed for '{}': {}", event.title, e));
                }
            }
        }
    }

    /// Classify and describe a credibility-sorted cluster. The first
    /// (most credible) item drives type, severity, location, and the
    /// event timestamp.
    fn build_event(&self, cluster: &[RawDataItem]) -> ProcessedEvent {
        let primary = &cluster[0];

        let disaster_type = classify_disaster_type(&primary.content);
        let location = self
            .gazetteer
            .extract_location(&primary.content, primary.location.as_ref());
        let severity = assess_severity(&primary.content, &primary.metadata);

        let sources: Vec<SourceRecord> = cluster.iter().map(SourceRecord::from).collect();

        let title = generate_title(disaster_type, &location, severity);
        let description = generate_description(&sources, disaster_type, severity);

        ProcessedEvent {
            title,
            description,
            disaster_type,
            severity,
            status: EventStatus::Active,
            timestamp: primary.timestamp,
            location,
            sources,
        }
    }

    /// Stored events matching the candidate on type, ±24 h window, and
    /// 100 km proximity, newest first.
    async fn find_similar_events(
        &self,
        event: &ProcessedEvent,
    ) -> Result<Vec<PersistedEvent>, StoreError> {
        let window = Duration::hours(SIMILAR_WINDOW_HOURS);
        let filter = EventFilter::type_in_window(
            event.disaster_type,
            event.timestamp - window,
            event.timestamp + window,
        );

        let page = self.store.get_events(&filter).await?;
        Ok(page
            .events
            .into_iter()
            .filter(|candidate| {
                haversine_km(
                    event.location.latitude,
                    event.location.longitude,
                    candidate.location.latitude,
                    candidate.location.longitude,
                ) < RELATED_RADIUS_KM
            })
            .collect())
    }
}
