// src/sources/social.rs
//! Mock social-media connector. A real integration would authenticate,
//! search for disaster-related keywords, and map posts to raw items;
//! this one returns a fixed batch with timestamps relative to now.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::types::{LocationHint, MetaValue, RawDataItem, SourceKind};

use super::SourceConnector;

pub struct SocialConnector;

#[async_trait]
impl SourceConnector for SocialConnector {
    async fn collect(&self) -> Result<Vec<RawDataItem>> {
        tracing::debug!(connector = self.name(), "collecting mock batch");

        Ok(vec![
            RawDataItem {
                id: Some("soc1".into()),
                source_kind: SourceKind::Social,
                content: "Breaking: Magnitude 6.2 earthquake reported off the coast of Japan. Tsunami warning issued for coastal areas. #earthquake #japan".into(),
                author: Some("DisasterAlert".into()),
                url: Some("https://social.example/DisasterAlert/status/1234567890".into()),
                timestamp: Utc::now() - Duration::hours(2),
                location: Some(LocationHint {
                    name: Some("Japan".into()),
                    latitude: Some(38.32),
                    longitude: Some(142.37),
                    country: Some("Japan".into()),
                    region: None,
                }),
                metadata: HashMap::from([
                    ("repost_count".to_string(), MetaValue::Int(1245)),
                    ("like_count".to_string(), MetaValue::Int(827)),
                    ("verified".to_string(), MetaValue::Bool(true)),
                ]),
                credibility: Some(0.85),
            },
            RawDataItem {
                id: Some("soc2".into()),
                source_kind: SourceKind::Social,
                content: "Massive flooding in Thailand has displaced thousands. Relief efforts underway. #ThailandFloods #disaster".into(),
                author: Some("WeatherUpdates".into()),
                url: Some("https://social.example/WeatherUpdates/status/1234567891".into()),
                timestamp: Utc::now() - Duration::hours(5),
                location: Some(LocationHint {
                    name: Some("Thailand".into()),
                    latitude: Some(12.61),
                    longitude: Some(102.10),
                    country: Some("Thailand".into()),
                    region: Some("Eastern Thailand".into()),
                }),
                metadata: HashMap::from([
                    ("repost_count".to_string(), MetaValue::Int(892)),
                    ("like_count".to_string(), MetaValue::Int(541)),
                    ("verified".to_string(), MetaValue::Bool(true)),
                ]),
                credibility: Some(0.82),
            },
            RawDataItem {
                id: Some("soc3".into()),
                source_kind: SourceKind::Social,
                content: "Wildfire in Northern California spreading rapidly. Mandatory evacuations in place for several areas. Stay safe! #CaliforniaFires".into(),
                author: Some("CAFireUpdates".into()),
                url: Some("https://social.example/CAFireUpdates/status/1234567892".into()),
                timestamp: Utc::now() - Duration::hours(8),
                location: Some(LocationHint {
                    name: Some("Northern California".into()),
                    latitude: Some(39.76),
                    longitude: Some(-121.62),
                    country: Some("USA".into()),
                    region: Some("California".into()),
                }),
                metadata: HashMap::from([
                    ("repost_count".to_string(), MetaValue::Int(1823)),
                    ("like_count".to_string(), MetaValue::Int(1102)),
                    ("verified".to_string(), MetaValue::Bool(false)),
                ]),
                credibility: Some(0.75),
            },
        ])
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Social
    }

    fn name(&self) -> &'static str {
        "social"
    }
}
