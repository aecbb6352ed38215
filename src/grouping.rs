// src/grouping.rs
//! # Grouper
//! Greedy single-pass clustering of raw items that plausibly describe
//! the same real-world disaster.
//!
//! Each cluster is represented by its founding member: an incoming item
//! joins the first cluster (in creation order) whose founder it is
//! related to, or starts a new one. The result is order-dependent —
//! reordering the input changes the grouping — and there is no
//! transitive merge. Both properties are contractual.

use std::collections::HashSet;

use crate::geo::haversine_km;
use crate::types::RawDataItem;

/// Items further apart than this in time are never related.
pub const RELATED_WINDOW_HOURS: i64 = 24;
/// Coordinate pairs within this radius count as the same place.
pub const RELATED_RADIUS_KM: f64 = 100.0;
/// Minimum shared-word ratio for content relatedness.
pub const CONTENT_OVERLAP_MIN: f64 = 0.30;

fn time_related(a: &RawDataItem, b: &RawDataItem) -> bool {
    let diff_ms = (a.timestamp - b.timestamp).num_milliseconds().abs();
    diff_ms < RELATED_WINDOW_HOURS * 60 * 60 * 1000
}

/// Location relation: coordinate proximity when both items carry
/// coordinates, case-insensitive name equality when both carry names,
/// false otherwise.
fn location_related(a: &RawDataItem, b: &RawDataItem) -> bool {
    let (Some(loc_a), Some(loc_b)) = (a.location.as_ref(), b.location.as_ref()) else {
        return false;
    };

    if let (Some((lat_a, lon_a)), Some((lat_b, lon_b))) = (loc_a.coordinates(), loc_b.coordinates())
    {
        return haversine_km(lat_a, lon_a, lat_b, lon_b) < RELATED_RADIUS_KM;
    }

    if let (Some(name_a), Some(name_b)) = (loc_a.name.as_deref(), loc_b.name.as_deref()) {
        return name_a.to_lowercase() == name_b.to_lowercase();
    }

    false
}

/// Shared-word ratio: `|intersection| / min(|words_a|, |words_b|)` over
/// lower-cased whitespace tokens. Duplicate words on the left side each
/// count toward the intersection.
fn content_related(a: &RawDataItem, b: &RawDataItem) -> bool {
    let lower_a = a.content.to_lowercase();
    let lower_b = b.content.to_lowercase();
    let words_a: Vec<&str> = lower_a.split_whitespace().collect();
    let words_b: Vec<&str> = lower_b.split_whitespace().collect();

    let smaller = words_a.len().min(words_b.len());
    if smaller == 0 {
        return false;
    }

    let set_b: HashSet<&str> = words_b.iter().copied().collect();
    let common = words_a.iter().filter(|w| set_b.contains(*w)).count();

    (common as f64) / (smaller as f64) > CONTENT_OVERLAP_MIN
}

/// True iff the items fall in the same time window AND share either a
/// location or enough content vocabulary.
pub fn are_items_related(a: &RawDataItem, b: &RawDataItem) -> bool {
    time_related(a, b) && (location_related(a, b) || content_related(a, b))
}

/// Partition `items` into clusters, preserving input order inside each
/// cluster. O(n * clusters); relatedness is always checked against the
/// cluster's founder, never later members.
pub fn group_related_items(items: Vec<RawDataItem>) -> Vec<Vec<RawDataItem>> {
    let mut groups: Vec<Vec<RawDataItem>> = Vec::new();

    for item in items {
        let mut found = None;
        for (idx, group) in groups.iter().enumerate() {
            let founder = &group[0];
            if are_items_related(founder, &item) {
                found = Some(idx);
                break;
            }
        }
        match found {
            Some(idx) => groups[idx].push(item),
            None => groups.push(vec![item]),
        }
    }

    groups
}

/// Order a cluster by credibility, highest first, so the most credible
/// item becomes the primary. Missing credibility sorts as 0.
pub fn sort_by_credibility(cluster: &mut [RawDataItem]) {
    cluster.sort_by(|a, b| {
        b.credibility_or_zero()
            .partial_cmp(&a.credibility_or_zero())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
