//! Normalised corridor telemetry, the planner's input.

use serde::{Deserialize, Serialize};

/// Route length assumed when telemetry reports none, km.
pub const DEFAULT_ROUTE_KM: f64 = 1.5;

/// Shortest length a corridor is weighted or credited with, km.
pub const MIN_ROUTE_KM: f64 = 0.4;

/// One road segment of a corridor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub id:                String,
    pub average_speed_kmh: f64,
    pub typical_speed_kmh: f64,
    /// Extra traversal time against typical speed, seconds, never negative.
    pub delay_s:           f64,
    pub length_m:          f64,
    pub confidence:        f64,
}

impl RouteSegment {
    /// `max(0, 1 − observed/typical)`.
    ///
    /// Typical speed falls back to the average, then to 1 km/h; a missing
    /// average reads as typical.  A zero typical speed contributes nothing.
    pub fn speed_penalty(&self) -> f64 {
        let typical = nonzero(self.typical_speed_kmh)
            .or_else(|| nonzero(self.average_speed_kmh))
            .unwrap_or(1.0);
        let observed = nonzero(self.average_speed_kmh).unwrap_or(typical);
        (1.0 - observed / typical).max(0.0)
    }
}

/// A named corridor with observed against typical travel times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub id:                    String,
    pub name:                  String,
    #[serde(default)]
    pub length_m:              Option<f64>,
    pub travel_time_s:         f64,
    pub typical_travel_time_s: f64,
    pub delay_s:               f64,
    /// Percentage of the route covered by live data; absent reads as 100.
    #[serde(default)]
    pub completeness:          Option<f64>,
    #[serde(default = "passable_default")]
    pub passable:              bool,
    #[serde(default)]
    pub confidence:            f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area:                  Option<String>,
    #[serde(default)]
    pub segments:              Vec<RouteSegment>,
}

fn passable_default() -> bool {
    true
}

impl RouteDescriptor {
    /// `delay / typical`, or 0 when the typical time is not positive.
    pub fn delay_ratio(&self) -> f64 {
        if self.typical_travel_time_s > 0.0 {
            self.delay_s / self.typical_travel_time_s
        } else {
            0.0
        }
    }

    /// Mean segment delay in seconds, 0 without segments.
    pub fn mean_segment_delay_s(&self) -> f64 {
        mean(self.segments.iter().map(|s| s.delay_s))
    }

    /// Mean [`RouteSegment::speed_penalty`], 0 without segments.
    pub fn mean_speed_penalty(&self) -> f64 {
        mean(self.segments.iter().map(RouteSegment::speed_penalty))
    }

    pub fn completeness_pct(&self) -> f64 {
        self.completeness.unwrap_or(100.0)
    }

    /// Length used for weighting and CO₂ credit: reported length or
    /// [`DEFAULT_ROUTE_KM`], floored at [`MIN_ROUTE_KM`].
    pub fn effective_length_km(&self) -> f64 {
        self.length_m
            .map_or(DEFAULT_ROUTE_KM, |m| m / 1000.0)
            .max(MIN_ROUTE_KM)
    }
}

fn nonzero(v: f64) -> Option<f64> {
    (v != 0.0 && !v.is_nan()).then_some(v)
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}
