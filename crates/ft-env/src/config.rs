//! Environment configuration.

/// Added to the raw weighted reward before flooring at zero.
pub const REWARD_OFFSET: f64 = 8.0;

/// Coefficients of the per-tick reward.
///
/// ```text
/// raw    = served·served − unmet·unmet − energy·energy_cost − wait·wait_proxy
/// reward = max(0, raw + REWARD_OFFSET)
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardWeights {
    pub served: f64,
    pub unmet:  f64,
    pub energy: f64,
    pub wait:   f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self { served: 1.0, unmet: 1.5, energy: 0.8, wait: 0.2 }
    }
}

/// Fleet and reward settings for one [`GridEnv`][crate::GridEnv].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    pub fleet_size:           usize,
    /// Starting charge of every vehicle; clamped to the capacity.
    pub initial_battery_kwh:  f64,
    pub battery_capacity_kwh: f64,
    pub weights:              RewardWeights,
}

impl EnvConfig {
    pub fn with_fleet_size(fleet_size: usize) -> Self {
        Self { fleet_size, ..Self::default() }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            fleet_size:           120,
            initial_battery_kwh:  40.0,
            battery_capacity_kwh: 60.0,
            weights:              RewardWeights::default(),
        }
    }
}
