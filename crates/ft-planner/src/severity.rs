//! Corridor severity score and tiering.

use std::fmt;

use ft_core::clamp;
use serde::{Deserialize, Serialize};

use crate::RouteDescriptor;

/// Score above which a corridor is [`SeverityTier::High`].
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Score above which a corridor is at least [`SeverityTier::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 0.35;

/// Composite delay score in `[0, 1]`:
///
/// ```text
/// 0.45·delayRatio + 0.25·(meanSegmentDelay/60) + 0.2·meanSpeedPenalty
///   + 0.1·(1 − completeness/100)
/// ```
pub fn severity_score(route: &RouteDescriptor) -> f64 {
    let completeness_penalty = 1.0 - route.completeness_pct() / 100.0;
    let score = 0.45 * route.delay_ratio()
        + 0.25 * (route.mean_segment_delay_s() / 60.0)
        + 0.2 * route.mean_speed_penalty()
        + 0.1 * completeness_penalty;
    clamp(score, 0.0, 1.0)
}

/// Service priority of a corridor.  Ordered `Support < Medium < High`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    Support,
    Medium,
    High,
}

impl SeverityTier {
    pub fn classify(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            SeverityTier::High
        } else if score > MEDIUM_THRESHOLD {
            SeverityTier::Medium
        } else {
            SeverityTier::Support
        }
    }

    /// Constant added to the corridor's allocation weight.
    pub fn min_share(self) -> f64 {
        match self {
            SeverityTier::High    => 0.18,
            SeverityTier::Medium  => 0.12,
            SeverityTier::Support => 0.08,
        }
    }

    /// Floor on the corridor's vehicle count; reconciliation never goes below it.
    pub fn min_vehicles(self) -> u32 {
        match self {
            SeverityTier::High    => 14,
            SeverityTier::Medium  => 9,
            SeverityTier::Support => 5,
        }
    }

    /// Share of the fleet a corridor of this tier is clipped to.
    pub fn max_fleet_share(self) -> f64 {
        match self {
            SeverityTier::High    => 0.28,
            SeverityTier::Medium  => 0.20,
            SeverityTier::Support => 0.14,
        }
    }

    /// `round(fleet · max_fleet_share)`.
    pub fn max_vehicles(self, fleet: u32) -> u32 {
        (fleet as f64 * self.max_fleet_share()).round() as u32
    }

    pub fn coverage_window(self) -> &'static str {
        match self {
            SeverityTier::High    => "07:00 to 09:30 & 16:30 to 19:00",
            SeverityTier::Medium  => "07:00 to 09:00",
            SeverityTier::Support => "Off peak flex",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::High    => "High",
            SeverityTier::Medium  => "Medium",
            SeverityTier::Support => "Support",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
