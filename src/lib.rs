// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classifier;
pub mod collector;
pub mod config;
pub mod content;
pub mod geo;
pub mod grouping;
pub mod location;
pub mod metrics;
pub mod scheduler;
pub mod sources;
pub mod store;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::collector::Collector;
pub use crate::location::Gazetteer;
pub use crate::sources::{default_connectors, SourceConnector};
pub use crate::store::{EventStore, MemoryEventStore, StoreError};
pub use crate::types::{
    CollectionResult, DisasterType, ProcessedEvent, RawDataItem, SeverityLevel, SourceKind,
};
