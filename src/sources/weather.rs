// src/sources/weather.rs
//! Mock weather-service connector: alerts and warnings with structured
//! metadata (hurricane category, rainfall, wind) the severity scorer
//! can pick up.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::classifier::META_HURRICANE_CATEGORY;
use crate::types::{LocationHint, MetaValue, RawDataItem, SourceKind};

use super::SourceConnector;

pub struct WeatherConnector;

#[async_trait]
impl SourceConnector for WeatherConnector {
    async fn collect(&self) -> Result<Vec<RawDataItem>> {
        tracing::debug!(connector = self.name(), "collecting mock batch");

        Ok(vec![
            RawDataItem {
                id: Some("weather1".into()),
                source_kind: SourceKind::Weather,
                content: "Hurricane warning issued for the Gulf of Mexico. Category 3 hurricane with wind speeds up to 125 mph moving towards the Florida coast. Expected landfall within 48 hours.".into(),
                author: Some("National Hurricane Center".into()),
                url: Some("https://weather.example/hurricane-warning".into()),
                timestamp: Utc::now() - Duration::hours(4),
                location: Some(LocationHint {
                    name: Some("Gulf of Mexico".into()),
                    latitude: Some(25.83),
                    longitude: Some(-85.17),
                    country: Some("USA".into()),
                    region: Some("Gulf Coast".into()),
                }),
                metadata: HashMap::from([
                    (META_HURRICANE_CATEGORY.to_string(), MetaValue::Int(3)),
                    ("wind_speed".to_string(), MetaValue::from("125 mph")),
                    ("pressure".to_string(), MetaValue::from("952 mb")),
                ]),
                credibility: Some(0.98),
            },
            RawDataItem {
                id: Some("weather2".into()),
                source_kind: SourceKind::Weather,
                content: "Severe flood warning issued for the Chao Phraya River basin. Heavy monsoon rains expected to continue for the next 72 hours, increasing flood risk in low-lying areas.".into(),
                author: Some("Thai Meteorological Department".into()),
                url: Some("https://weather.example/flood-warning-thailand".into()),
                timestamp: Utc::now() - Duration::hours(7),
                location: Some(LocationHint {
                    name: Some("Chao Phraya River Basin".into()),
                    latitude: Some(14.05),
                    longitude: Some(100.48),
                    country: Some("Thailand".into()),
                    region: Some("Central Thailand".into()),
                }),
                metadata: HashMap::from([
                    ("rainfall".to_string(), MetaValue::from("342mm")),
                    ("flood_stage".to_string(), MetaValue::from("Rising")),
                    ("river_level".to_string(), MetaValue::from("4.2m")),
                ]),
                credibility: Some(0.97),
            },
            RawDataItem {
                id: Some("weather3".into()),
                source_kind: SourceKind::Weather,
                content: "Red flag warning issued for Northern California due to high winds and dry conditions. Extreme fire danger present.".into(),
                author: Some("National Weather Service".into()),
                url: Some("https://weather.example/fire-warning-california".into()),
                timestamp: Utc::now() - Duration::hours(12),
                location: Some(LocationHint {
                    name: Some("Northern California".into()),
                    latitude: Some(39.76),
                    longitude: Some(-121.62),
                    country: Some("USA".into()),
                    region: Some("California".into()),
                }),
                metadata: HashMap::from([
                    ("wind_speed".to_string(), MetaValue::from("35 mph")),
                    ("humidity".to_string(), MetaValue::from("15%")),
                    ("temperature".to_string(), MetaValue::from("95F")),
                ]),
                credibility: Some(0.96),
            },
        ])
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Weather
    }

    fn name(&self) -> &'static str {
        "weather"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hurricane_alert_carries_category_metadata() {
        let items = WeatherConnector.collect().await.unwrap();
        assert_eq!(items.len(), 3);
        let category = items[0]
            .metadata
            .get(META_HURRICANE_CATEGORY)
            .and_then(MetaValue::as_f64);
        assert_eq!(category, Some(3.0));
    }
}
