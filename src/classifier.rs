// src/classifier.rs
//! # Classifier
//! Pure keyword-table classification: free text → disaster type, and
//! text + metadata → severity. No I/O, deterministic for fixed tables.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::types::{DisasterType, MetaValue, SeverityLevel};

/// Ordered keyword table. Order is part of the contract: on a score tie
/// the earlier entry wins, so reordering changes classification.
static TYPE_KEYWORDS: Lazy<Vec<(DisasterType, &'static [&'static str])>> = Lazy::new(|| {
    vec![
        (
            DisasterType::Earthquake,
            &["earthquake", "quake", "seismic", "richter", "magnitude", "tremor"][..],
        ),
        (
            DisasterType::Flood,
            &["flood", "flooding", "submerged", "inundation", "water level", "overflow"][..],
        ),
        (
            DisasterType::Fire,
            &["fire", "wildfire", "burning", "flames", "smoke", "blaze"][..],
        ),
        (
            DisasterType::Hurricane,
            &["hurricane", "cyclone", "typhoon", "storm surge", "tropical storm"][..],
        ),
        (
            DisasterType::Tornado,
            &["tornado", "twister", "funnel cloud", "wind damage"][..],
        ),
        (DisasterType::Tsunami, &["tsunami", "tidal wave"][..]),
        (
            DisasterType::Volcano,
            &["volcano", "volcanic", "eruption", "lava", "ash cloud"][..],
        ),
        (
            DisasterType::Landslide,
            &["landslide", "mudslide", "rockslide"][..],
        ),
    ]
});

const SEVERE_INDICATORS: &[&str] = &[
    "catastrophic",
    "devastating",
    "mass casualties",
    "major disaster",
    "emergency",
    "evacuate",
    "evacuation ordered",
    "destroyed",
];

const HIGH_INDICATORS: &[&str] = &[
    "severe",
    "significant",
    "extensive damage",
    "widespread",
    "dangerous",
    "hazardous",
    "warning",
    "multiple",
    "injured",
];

const MODERATE_INDICATORS: &[&str] = &[
    "moderate",
    "affected",
    "alert",
    "caution",
    "advisory",
    "minor damage",
    "localized",
    "monitoring",
];

/// Metadata keys the severity scorer understands.
pub const META_HURRICANE_CATEGORY: &str = "hurricane_category";
pub const META_MAGNITUDE: &str = "magnitude";

fn count_matches(lower_text: &str, terms: &[&str]) -> u32 {
    terms.iter().filter(|t| lower_text.contains(*t)).count() as u32
}

/// Classify the disaster type by counting keyword hits per type.
/// Substring containment only, no fuzzy matching. Returns `Other` when
/// every table entry scores zero.
pub fn classify_disaster_type(text: &str) -> DisasterType {
    let lower = text.to_lowercase();

    let mut best = DisasterType::Other;
    let mut best_score = 0u32;
    for (ty, keywords) in TYPE_KEYWORDS.iter() {
        let score = count_matches(&lower, keywords);
        if score > best_score {
            best_score = score;
            best = *ty;
        }
    }
    best
}

/// Score contributed by structured metadata: hurricane category and
/// earthquake magnitude are checked independently, so both may add.
fn metadata_score(metadata: &HashMap<String, MetaValue>) -> u32 {
    let mut score = 0u32;

    if let Some(category) = metadata.get(META_HURRICANE_CATEGORY).and_then(MetaValue::as_f64) {
        if category >= 3.0 {
            score += 3;
        } else if category >= 1.0 {
            score += 2;
        }
    }

    if let Some(magnitude) = metadata.get(META_MAGNITUDE).and_then(MetaValue::as_f64) {
        if magnitude >= 7.0 {
            score += 3;
        } else if magnitude >= 5.0 {
            score += 2;
        } else if magnitude >= 3.0 {
            score += 1;
        }
    }

    score
}

/// Assess severity from indicator-term counts plus metadata:
/// `3*severe + 2*high + 1*moderate + metadata`, bucketed at >=5 / >=3 / >=1.
pub fn assess_severity(text: &str, metadata: &HashMap<String, MetaValue>) -> SeverityLevel {
    let lower = text.to_lowercase();

    let severe_score = count_matches(&lower, SEVERE_INDICATORS);
    let high_score = count_matches(&lower, HIGH_INDICATORS);
    let moderate_score = count_matches(&lower, MODERATE_INDICATORS);

    let total = severe_score * 3 + high_score * 2 + moderate_score + metadata_score(metadata);

    if total >= 5 {
        SeverityLevel::Severe
    } else if total >= 3 {
        SeverityLevel::High
    } else if total >= 1 {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    }
}
