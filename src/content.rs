// src/content.rs
//! # Content Generator
//! Synthesizes a human-readable title and description for a candidate
//! event from its classified type, severity, and contributing sources.

use crate::types::{DisasterType, LocationInfo, SeverityLevel, SourceRecord};

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `"{modifier}{CapitalizedType} in {location}"`, where Severe gets
/// "Major " and High gets "Significant ".
pub fn generate_title(
    disaster_type: DisasterType,
    location: &LocationInfo,
    severity: SeverityLevel,
) -> String {
    let modifier = match severity {
        SeverityLevel::Severe => "Major ",
        SeverityLevel::High => "Significant ",
        _ => "",
    };
    format!(
        "{}{} in {}",
        modifier,
        capitalize(disaster_type.as_str()),
        location.name
    )
}

/// Description policy: with two or more sources, take the longest
/// content (ties keep the first encountered); with one source, its
/// content verbatim; with none, a generic monitoring sentence.
pub fn generate_description(
    sources: &[SourceRecord],
    disaster_type: DisasterType,
    severity: SeverityLevel,
) -> String {
    if sources.len() > 1 {
        let mut main = &sources[0];
        for source in &sources[1..] {
            if source.content.len() > main.content.len() {
                main = source;
            }
        }
        main.content.clone()
    } else if sources.len() == 1 {
        sources[0].content.clone()
    } else {
        let severity_text = match severity {
            SeverityLevel::Severe => "severe",
            SeverityLevel::High => "significant",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Low => "minor",
        };
        format!(
            "A {} {} has been reported. Monitoring is ongoing and more information will be provided as it becomes available.",
            severity_text, disaster_type
        )
    }
}
