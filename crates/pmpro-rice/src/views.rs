//! Chart-ready projections of the ranked order
//!
//! Presentation code renders these as a bar chart (score comparison) and a
//! radar chart (attribute comparison).

use crate::record::{FeatureRecord, MAX_CRITERION};
use serde::Serialize;

/// Maximum radar label length before truncation
pub const RADAR_LABEL_MAX: usize = 15;

/// One bar-chart row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarRow {
    /// Feature name
    pub name: String,
    /// RICE score
    pub rice_score: f64,
    /// Reach
    pub reach: f64,
    /// Impact
    pub impact: f64,
    /// Confidence
    pub confidence: f64,
    /// Effort
    pub effort: f64,
}

/// One radar-chart row
///
/// Effort is inverted so that "bigger is better" holds for every axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarRow {
    /// Truncated feature label
    pub feature: String,
    /// Reach
    pub reach: f64,
    /// Impact
    pub impact: f64,
    /// Confidence
    pub confidence: f64,
    /// `10 - effort`
    pub effort: f64,
}

/// Bar rows in ranked order
#[must_use]
pub fn bar_rows(records: &[FeatureRecord]) -> Vec<BarRow> {
    records
        .iter()
        .map(|r| BarRow {
            name: r.name().to_string(),
            rice_score: r.rice_score(),
            reach: r.reach(),
            impact: r.impact(),
            confidence: r.confidence(),
            effort: r.effort(),
        })
        .collect()
}

/// Radar rows in ranked order
#[must_use]
pub fn radar_rows(records: &[FeatureRecord]) -> Vec<RadarRow> {
    records
        .iter()
        .map(|r| RadarRow {
            feature: radar_label(r.name()),
            reach: r.reach(),
            impact: r.impact(),
            confidence: r.confidence(),
            effort: MAX_CRITERION - r.effort(),
        })
        .collect()
}

/// Truncate long names to [`RADAR_LABEL_MAX`] characters plus `...`
#[must_use]
pub fn radar_label(name: &str) -> String {
    if name.chars().count() > RADAR_LABEL_MAX {
        let mut label: String = name.chars().take(RADAR_LABEL_MAX).collect();
        label.push_str("...");
        label
    } else {
        name.to_string()
    }
}
