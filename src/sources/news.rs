// src/sources/news.rs
//! Mock news connector returning wire-style articles with higher
//! credibility than the social feed.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::types::{LocationHint, MetaValue, RawDataItem, SourceKind};

use super::SourceConnector;

pub struct NewsConnector;

#[async_trait]
impl SourceConnector for NewsConnector {
    async fn collect(&self) -> Result<Vec<RawDataItem>> {
        tracing::debug!(connector = self.name(), "collecting mock batch");

        Ok(vec![
            RawDataItem {
                id: Some("news1".into()),
                source_kind: SourceKind::News,
                content: "A powerful magnitude 6.2 earthquake struck off the eastern coast of Japan today, prompting tsunami warnings for several coastal prefectures. The Japan Meteorological Agency issued advisories for waves up to 1 meter high. No major damage has been reported so far.".into(),
                author: Some("Japan Times".into()),
                url: Some("https://news.example/japan-earthquake".into()),
                timestamp: Utc::now() - Duration::hours(3),
                location: Some(LocationHint {
                    name: Some("Miyagi Prefecture, Japan".into()),
                    latitude: Some(38.30),
                    longitude: Some(142.40),
                    country: Some("Japan".into()),
                    region: Some("Tohoku".into()),
                }),
                metadata: HashMap::from([
                    ("outlet".to_string(), MetaValue::from("Japan Times")),
                    ("category".to_string(), MetaValue::from("Natural Disaster")),
                ]),
                credibility: Some(0.95),
            },
            RawDataItem {
                id: Some("news2".into()),
                source_kind: SourceKind::News,
                content: "Thailand's eastern provinces face worst flooding in 5 years as monsoon intensifies. Over 5,000 homes have been affected, and authorities have established emergency shelters in local schools and community centers. The Thai Meteorological Department forecasts continued heavy rainfall over the next 48 hours.".into(),
                author: Some("Bangkok Post".into()),
                url: Some("https://news.example/thailand-floods".into()),
                timestamp: Utc::now() - Duration::hours(6),
                location: Some(LocationHint {
                    name: Some("Chanthaburi, Thailand".into()),
                    latitude: Some(12.61),
                    longitude: Some(102.10),
                    country: Some("Thailand".into()),
                    region: Some("Eastern Thailand".into()),
                }),
                metadata: HashMap::from([
                    ("outlet".to_string(), MetaValue::from("Bangkok Post")),
                    ("category".to_string(), MetaValue::from("Natural Disaster")),
                ]),
                credibility: Some(0.92),
            },
            RawDataItem {
                id: Some("news3".into()),
                source_kind: SourceKind::News,
                content: "California wildfire expands to 10,000 acres in just 24 hours, threatening communities in the Sierra Nevada foothills. Cal Fire reports the blaze is only 5% contained as strong winds continue to fuel its rapid expansion. Evacuation orders have been issued for several communities.".into(),
                author: Some("California News Network".into()),
                url: Some("https://news.example/california-wildfire".into()),
                timestamp: Utc::now() - Duration::hours(10),
                location: Some(LocationHint {
                    name: Some("Sierra Nevada, California".into()),
                    latitude: Some(39.76),
                    longitude: Some(-121.62),
                    country: Some("USA".into()),
                    region: Some("California".into()),
                }),
                metadata: HashMap::from([
                    ("outlet".to_string(), MetaValue::from("California News Network")),
                    ("category".to_string(), MetaValue::from("Wildfire")),
                ]),
                credibility: Some(0.88),
            },
        ])
    }

    fn kind(&self) -> SourceKind {
        SourceKind::News
    }

    fn name(&self) -> &'static str {
        "news"
    }
}
