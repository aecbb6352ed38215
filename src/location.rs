// src/location.rs
//! # Location Resolver
//!
//! Maps free text plus an optional structured hint to a concrete named
//! location via a static gazetteer lookup.
//!
//! - A hint carrying both coordinates is returned verbatim.
//! - Otherwise the gazetteer is scanned in order and the first entry
//!   whose name appears in the text wins, so entry order is part of the
//!   contract.
//! - An optional TOML file can replace the built-in seed; file order is
//!   preserved.
//! - No match at all resolves to the `Unknown Location` sentinel at (0, 0).

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::{LocationHint, LocationInfo};

/// One known place: display name, coordinates, and optional admin fields.
#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl GazetteerEntry {
    fn to_location(&self) -> LocationInfo {
        LocationInfo {
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            country: self.country.clone(),
            region: self.region.clone(),
            city: self.city.clone(),
        }
    }
}

fn seed_entry(
    name: &str,
    latitude: f64,
    longitude: f64,
    country: Option<&str>,
    region: Option<&str>,
    city: Option<&str>,
) -> GazetteerEntry {
    GazetteerEntry {
        name: name.to_string(),
        latitude,
        longitude,
        country: country.map(str::to_string),
        region: region.map(str::to_string),
        city: city.map(str::to_string),
    }
}

/// Built-in seed. Broad regions come before their cities on purpose:
/// "Tokyo, Japan" resolves to Japan because Japan is listed first.
static SEED: Lazy<Vec<GazetteerEntry>> = Lazy::new(|| {
    vec![
        seed_entry("Japan", 36.2048, 138.2529, Some("Japan"), None, None),
        seed_entry("Tokyo", 35.6762, 139.6503, Some("Japan"), Some("Kanto"), Some("Tokyo")),
        seed_entry("Thailand", 15.8700, 100.9925, Some("Thailand"), None, None),
        seed_entry(
            "Bangkok",
            13.7563,
            100.5018,
            Some("Thailand"),
            Some("Central Thailand"),
            Some("Bangkok"),
        ),
        seed_entry("California", 36.7783, -119.4179, Some("USA"), Some("California"), None),
        seed_entry(
            "Los Angeles",
            34.0522,
            -118.2437,
            Some("USA"),
            Some("California"),
            Some("Los Angeles"),
        ),
        seed_entry("Gulf of Mexico", 25.5000, -90.0000, Some("USA"), Some("Gulf Coast"), None),
        seed_entry("Florida", 27.6648, -81.5158, Some("USA"), Some("Florida"), None),
        seed_entry("Miami", 25.7617, -80.1918, Some("USA"), Some("Florida"), Some("Miami")),
    ]
});

/// Sentinel for text that resolves nowhere.
pub const UNKNOWN_LOCATION_NAME: &str = "Unknown Location";

/// Ordered list of known places used for text-based resolution.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
}

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    locations: Vec<GazetteerEntry>,
}

impl Gazetteer {
    /// The built-in seed list.
    pub fn builtin() -> Self {
        Self {
            entries: SEED.clone(),
        }
    }

    /// Load entries from a TOML file (`[[locations]]` tables, in file
    /// order). Falls back to the built-in seed on read or parse errors.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => toml::from_str::<GazetteerFile>(&s)
                .map(|f| Self { entries: f.locations })
                .unwrap_or_else(|_| Self::builtin()),
            Err(_) => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a location for `text`, honoring the hint short-circuit.
    ///
    /// A hint with both coordinates is trusted verbatim (name defaults to
    /// "Unknown"); otherwise the first gazetteer entry whose name occurs
    /// in the lower-cased text wins.
    pub fn extract_location(&self, text: &str, hint: Option<&LocationHint>) -> LocationInfo {
        if let Some(hint) = hint {
            if let Some((lat, lon)) = hint.coordinates() {
                return LocationInfo {
                    name: hint.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                    latitude: lat,
                    longitude: lon,
                    country: hint.country.clone(),
                    region: hint.region.clone(),
                    city: None,
                };
            }
        }

        let lower = text.to_lowercase();
        for entry in &self.entries {
            if lower.contains(&entry.name.to_lowercase()) {
                return entry.to_location();
            }
        }

        LocationInfo {
            name: UNKNOWN_LOCATION_NAME.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            country: None,
            region: None,
            city: None,
        }
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::builtin()
    }
}
