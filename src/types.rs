// src/types.rs
//! Domain types shared across the collection pipeline: raw observations,
//! resolved locations, processed events, and per-source run counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of feed a raw observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Social,
    News,
    Weather,
    Government,
    Sensor,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Social => "social",
            SourceKind::News => "news",
            SourceKind::Weather => "weather",
            SourceKind::Government => "government",
            SourceKind::Sensor => "sensor",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized disaster categories. Enumeration order matters: the
/// classifier breaks score ties in favor of the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Earthquake,
    Flood,
    Fire,
    Hurricane,
    Tornado,
    Tsunami,
    Volcano,
    Landslide,
    Other,
}

impl DisasterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "earthquake",
            DisasterType::Flood => "flood",
            DisasterType::Fire => "fire",
            DisasterType::Hurricane => "hurricane",
            DisasterType::Tornado => "tornado",
            DisasterType::Tsunami => "tsunami",
            DisasterType::Volcano => "volcano",
            DisasterType::Landslide => "landslide",
            DisasterType::Other => "other",
        }
    }
}

impl std::fmt::Display for DisasterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity buckets, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
            SeverityLevel::Severe => "severe",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a tracked event. The pipeline only ever creates
/// `Active` events; the remaining states exist for the store's callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Monitoring,
    Recovery,
    Resolved,
}

/// Closed value union for the per-item metadata bag (e.g. hurricane
/// category, earthquake magnitude, engagement counts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl MetaValue {
    /// Numeric view used by the severity scorer; strings and bools are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Int(v) => Some(*v as f64),
            MetaValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Str(v.to_string())
    }
}
impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}
impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}
impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

/// Partial location attached to a raw item by its connector. Any subset
/// of fields may be present; coordinates only count when both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl LocationHint {
    /// Coordinates, if the hint carries both halves.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Fully resolved place. Every event owns exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// One unprocessed observation from a source connector. Immutable for the
/// lifetime of a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source_kind: SourceKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationHint>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, MetaValue>,
    /// Source trustworthiness in [0, 1]; missing is treated as 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility: Option<f64>,
}

impl RawDataItem {
    pub fn credibility_or_zero(&self) -> f64 {
        self.credibility.unwrap_or(0.0)
    }
}

/// Provenance record attached to a stored event, one per contributing
/// raw item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub source_kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility: Option<f64>,
}

impl From<&RawDataItem> for SourceRecord {
    fn from(item: &RawDataItem) -> Self {
        Self {
            source_kind: item.source_kind,
            url: item.url.clone(),
            content: item.content.clone(),
            author: item.author.clone(),
            timestamp: item.timestamp,
            credibility: item.credibility,
        }
    }
}

/// In-memory candidate event built from one cluster, prior to the store
/// create/update decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedEvent {
    pub title: String,
    pub description: String,
    pub disaster_type: DisasterType,
    pub severity: SeverityLevel,
    pub status: EventStatus,
    /// Timestamp of the cluster's most credible item.
    pub timestamp: DateTime<Utc>,
    pub location: LocationInfo,
    pub sources: Vec<SourceRecord>,
}

/// Per-source counters for one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
    pub source: SourceKind,
    pub items_collected: usize,
    pub items_processed: usize,
    pub events_created: usize,
    pub events_updated: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl CollectionResult {
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            items_collected: 0,
            items_processed: 0,
            events_created: 0,
            events_updated: 0,
            errors: Vec::new(),
        }
    }
}
