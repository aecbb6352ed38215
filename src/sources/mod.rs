// src/sources/mod.rs
//! Source connectors. Each connector yields one batch of raw items per
//! collection run behind the shared [`SourceConnector`] trait; the
//! orchestrator never sees anything but the trait.
//!
//! The three shipped connectors are mocks returning fixed batches, the
//! stand-ins for real social/news/weather integrations.

pub mod news;
pub mod social;
pub mod weather;

use anyhow::Result;

use crate::types::{RawDataItem, SourceKind};

#[async_trait::async_trait]
pub trait SourceConnector: Send + Sync {
    /// Fetch the latest batch of raw observations. A failure here is
    /// fatal to the whole collection run.
    async fn collect(&self) -> Result<Vec<RawDataItem>>;

    /// Which feed family this connector represents.
    fn kind(&self) -> SourceKind;

    fn name(&self) -> &'static str;
}

/// The default connector set, in collection order: social, news, weather.
pub fn default_connectors() -> Vec<Box<dyn SourceConnector>> {
    vec![
        Box::new(social::SocialConnector),
        Box::new(news::NewsConnector),
        Box::new(weather::WeatherConnector),
    ]
}
