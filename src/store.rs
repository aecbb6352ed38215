// src/store.rs
//! # Event Store
//! Persistence boundary for tracked disaster events: an async trait the
//! merge engine talks to, typed error kinds so callers branch on kind
//! rather than message text, and an in-memory implementation used by the
//! binary and the test suite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

use crate::types::{
    DisasterType, EventStatus, LocationInfo, ProcessedEvent, SeverityLevel, SourceRecord,
};

/// Store failures by kind.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Filter for event queries. The merge engine only sets the type and
/// date window; the remaining fields exist for other store consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disaster_type: Option<DisasterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl EventFilter {
    /// Filter for one disaster type within an inclusive date window.
    pub fn type_in_window(
        disaster_type: DisasterType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            disaster_type: Some(disaster_type),
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }
}

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    pub events: Vec<PersistedEvent>,
    pub pagination: Pagination,
}

/// A stored event: always exactly one location, zero or more sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub disaster_type: DisasterType,
    pub severity: SeverityLevel,
    pub status: EventStatus,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub location: LocationInfo,
    pub sources: Vec<SourceRecord>,
}

/// Async persistence boundary consumed by the merge engine.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a new event with its location and full source list.
    async fn create_event(&self, event: &ProcessedEvent) -> Result<PersistedEvent, StoreError>;

    /// Query events matching `filter`, newest first, paginated.
    async fn get_events(&self, filter: &EventFilter) -> Result<EventPage, StoreError>;

    /// Append one source record to an existing event. Sources only ever
    /// grow; there is no edit or delete.
    async fn add_source(
        &self,
        event_id: &str,
        source: &SourceRecord,
    ) -> Result<SourceRecord, StoreError>;
}

/// Mutex-guarded in-memory store. Good enough for the mock pipeline and
/// deterministic under the single-threaded collection run.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<PersistedEvent>,
    next_id: u64,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events (diagnostics and tests).
    pub fn len(&self) -> usize {
        self.inner.lock().expect("event store mutex poisoned").events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn matches(filter: &EventFilter, event: &PersistedEvent) -> bool {
    if let Some(ty) = filter.disaster_type {
        if event.disaster_type != ty {
            return false;
        }
    }
    if let Some(sev) = filter.severity {
        if event.severity != sev {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if event.status != status {
            return false;
        }
    }
    if let Some(start) = filter.start_date {
        if event.timestamp < start {
            return false;
        }
    }
    if let Some(end) = filter.end_date {
        if event.timestamp > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn create_event(&self, event: &ProcessedEvent) -> Result<PersistedEvent, StoreError> {
        if event.title.trim().is_empty() {
            return Err(StoreError::Validation("event title must not be empty".into()));
        }

        let now = Utc::now();
        let mut inner = self.inner.lock().expect("event store mutex poisoned");
        inner.next_id += 1;
        let persisted = PersistedEvent {
            id: format!("evt-{}", inner.next_id),
            title: event.title.clone(),
            description: event.description.clone(),
            disaster_type: event.disaster_type,
            severity: event.severity,
            status: event.status,
            timestamp: event.timestamp,
            created_at: now,
            updated_at: now,
            location: event.location.clone(),
            sources: event.sources.clone(),
        };
        inner.events.push(persisted.clone());
        Ok(persisted)
    }

    async fn get_events(&self, filter: &EventFilter) -> Result<EventPage, StoreError> {
        let page = filter.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).max(1);

        let inner = self.inner.lock().expect("event store mutex poisoned");
        let mut hits: Vec<PersistedEvent> = inner
            .events
            .iter()
            .filter(|e| matches(filter, e))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total = hits.len();
        let pages = total.div_ceil(limit);
        let events: Vec<PersistedEvent> = hits
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(EventPage {
            events,
            pagination: Pagination {
                total,
                page,
                limit,
                pages,
            },
        })
    }

    async fn add_source(
        &self,
        event_id: &str,
        source: &SourceRecord,
    ) -> Result<SourceRecord, StoreError> {
        let mut inner = self.inner.lock().expect("event store mutex poisoned");
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| StoreError::NotFound(event_id.to_string()))?;
        event.sources.push(source.clone());
        event.updated_at = Utc::now();
        Ok(source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceKind;
    use chrono::{Duration, TimeZone};

    fn processed(ty: DisasterType, hours_offset: i64) -> ProcessedEvent {
        ProcessedEvent {
            title: format!("{} somewhere", ty),
            description: "test event".into(),
            disaster_type: ty,
            severity: SeverityLevel::Moderate,
            status: EventStatus::Active,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
                + Duration::hours(hours_offset),
            location: LocationInfo {
                name: "Japan".into(),
                latitude: 36.2048,
                longitude: 138.2529,
                country: Some("Japan".into()),
                region: None,
                city: None,
            },
            sources: vec![],
        }
    }

    fn record() -> SourceRecord {
        SourceRecord {
            source_kind: SourceKind::News,
            url: None,
            content: "report".into(),
            author: None,
            timestamp: Utc::now(),
            credibility: Some(0.9),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_stores() {
        let store = MemoryEventStore::new();
        let a = store.create_event(&processed(DisasterType::Flood, 0)).await.unwrap();
        let b = store.create_event(&processed(DisasterType::Fire, 1)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let store = MemoryEventStore::new();
        let mut ev = processed(DisasterType::Flood, 0);
        ev.title = "  ".into();
        let err = store.create_event(&ev).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn filter_by_type_and_window() {
        let store = MemoryEventStore::new();
        store.create_event(&processed(DisasterType::Flood, 0)).await.unwrap();
        store.create_event(&processed(DisasterType::Flood, 30)).await.unwrap();
        store.create_event(&processed(DisasterType::Fire, 1)).await.unwrap();

        let start = Utc.with_ymd_and_hms(2025, 5, 31, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let page = store
            .get_events(&EventFilter::type_in_window(DisasterType::Flood, start, end))
            .await
            .unwrap();
        assert_eq!(page.events.len(), 1);
        assert_eq!(page.events[0].disaster_type, DisasterType::Flood);
        assert_eq!(page.pagination.total, 1);
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        let store = MemoryEventStore::new();
        let created = store.create_event(&processed(DisasterType::Flood, 0)).await.unwrap();

        let page = store
            .get_events(&EventFilter::type_in_window(
                DisasterType::Flood,
                created.timestamp,
                created.timestamp,
            ))
            .await
            .unwrap();
        assert_eq!(page.events.len(), 1);
    }

    #[tokio::test]
    async fn results_are_newest_first_and_paginated() {
        let store = MemoryEventStore::new();
        for i in 0..12 {
            store.create_event(&processed(DisasterType::Flood, i)).await.unwrap();
        }

        let page = store.get_events(&EventFilter::default()).await.unwrap();
        assert_eq!(page.events.len(), DEFAULT_LIMIT);
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.pagination.pages, 2);
        assert!(page.events[0].timestamp > page.events[1].timestamp);

        let second = store
            .get_events(&EventFilter {
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.events.len(), 2);
    }

    #[tokio::test]
    async fn add_source_grows_and_touches_updated_at() {
        let store = MemoryEventStore::new();
        let created = store.create_event(&processed(DisasterType::Flood, 0)).await.unwrap();
        store.add_source(&created.id, &record()).await.unwrap();
        store.add_source(&created.id, &record()).await.unwrap();

        let page = store.get_events(&EventFilter::default()).await.unwrap();
        let event = &page.events[0];
        assert_eq!(event.sources.len(), 2);
        assert!(event.updated_at >= event.created_at);
    }

    #[tokio::test]
    async fn add_source_to_missing_event_is_not_found() {
        let store = MemoryEventStore::new();
        let err = store.add_source("evt-999", &record()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
