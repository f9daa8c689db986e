//! Episode metrics and per-step detail.
//!
//! Field names serialise in camelCase and figures are rounded to the same
//! precision the evaluation service publishes, so a consumer cannot tell a
//! local answer from a remote one.

use std::fmt;

use ft_core::{TIMELINE_SLOTS, Tick, round_dp};
use ft_env::{Action, StepOutcome};
use ft_policy::PolicyParams;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Tariff above which charging is flagged in the step log, €/kWh.
pub const HIGH_TARIFF: f64 = 0.3;

/// Aggregate result of one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeMetrics {
    #[serde(deserialize_with = "count")]
    pub served:       u64,
    #[serde(deserialize_with = "count")]
    pub unmet:        u64,
    /// €, 2 d.p.
    pub energy_cost:  f64,
    /// 2 d.p.
    pub reward_total: f64,
    /// `reward_total / steps`, 2 d.p.
    pub reward_avg:   f64,
    /// Always [`TIMELINE_SLOTS`] entries.
    pub timeline:     Vec<TimelinePoint>,
    pub params:       PolicyParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps:        Option<Vec<StepInsight>>,
}

/// Average demand and supply for one timeline slot, 1 d.p.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub hour:   u32,
    pub demand: f64,
    pub supply: f64,
}

/// Counts of each action type in one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMix {
    #[serde(rename = "move")]
    pub moves:   u32,
    #[serde(rename = "charge")]
    pub charges: u32,
    #[serde(rename = "idle")]
    pub idles:   u32,
}

impl ActionMix {
    pub fn count(actions: &[Action]) -> Self {
        let mut mix = Self::default();
        for a in actions {
            if a.is_move() {
                mix.moves += 1;
            } else if a.is_charge() {
                mix.charges += 1;
            } else {
                mix.idles += 1;
            }
        }
        mix
    }
}

/// Qualitative flag raised for a tick.
///
/// Notes written by another evaluator keep their text in [`Other`](Self::Other).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepNote {
    #[serde(rename = "Unserved requests remaining")]
    UnservedRequests,
    #[serde(rename = "Charging under higher tariff")]
    HighTariffCharging,
    #[serde(rename = "Repositioning dominated this tick")]
    RepositioningDominated,
    #[serde(untagged)]
    Other(String),
}

impl StepNote {
    pub fn as_str(&self) -> &str {
        match self {
            StepNote::UnservedRequests       => "Unserved requests remaining",
            StepNote::HighTariffCharging     => "Charging under higher tariff",
            StepNote::RepositioningDominated => "Repositioning dominated this tick",
            StepNote::Other(text)            => text,
        }
    }
}

/// Ride counts are integers here but two-decimal floats from the remote
/// service; both round to the nearest whole ride.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value.round() as u64)
    } else {
        Err(D::Error::custom(format!("ride count must be a non-negative number, got {value}")))
    }
}

impl fmt::Display for StepNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detail for one tick of a captured episode.
///
/// `hour` and `minute_of_day` are true time of day of the tick *after* the
/// step, unlike the aggregate timeline which keys on `tick mod 24`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInsight {
    pub index:         usize,
    pub hour:          u32,
    pub minute_of_day: u32,
    #[serde(deserialize_with = "count")]
    pub served:        u64,
    #[serde(deserialize_with = "count")]
    pub unmet:         u64,
    /// 3 d.p.
    pub energy_cost:   f64,
    /// 3 d.p.
    pub reward:        f64,
    pub action_mix:    ActionMix,
    pub notes:         Vec<StepNote>,
}

impl StepInsight {
    pub fn from_step(index: usize, actions: &[Action], outcome: &StepOutcome) -> Self {
        let mix = ActionMix::count(actions);
        let info = &outcome.info;

        let mut notes = Vec::new();
        if info.unmet > 0 {
            notes.push(StepNote::UnservedRequests);
        }
        if mix.charges > 0 && outcome.state.energy_price > HIGH_TARIFF {
            notes.push(StepNote::HighTariffCharging);
        }
        if mix.moves > mix.charges && outcome.reward > 0.0 {
            notes.push(StepNote::RepositioningDominated);
        }

        let tick = outcome.state.tick;
        Self {
            index,
            hour:          tick.hour_of_day(),
            minute_of_day: tick.minute_of_day(),
            served:        info.served,
            unmet:         info.unmet,
            energy_cost:   round_dp(info.energy_cost, 3),
            reward:        round_dp(outcome.reward, 3),
            action_mix:    mix,
            notes,
        }
    }
}

// ── Timeline accumulator ──────────────────────────────────────────────────────

#[derive(Copy, Clone, Default)]
struct Bucket {
    demand: u64,
    supply: u64,
    count:  u32,
}

/// Buckets per-tick demand and supply by [`Tick::timeline_slot`] and
/// averages each slot over its sample count.
pub struct TimelineAccumulator {
    buckets: [Bucket; TIMELINE_SLOTS],
}

impl Default for TimelineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineAccumulator {
    pub fn new() -> Self {
        Self { buckets: [Bucket::default(); TIMELINE_SLOTS] }
    }

    pub fn record(&mut self, tick: Tick, demand: u64, supply: u64) {
        let b = &mut self.buckets[tick.timeline_slot()];
        b.demand = b.demand.saturating_add(demand);
        b.supply = b.supply.saturating_add(supply);
        b.count += 1;
    }

    /// One point per slot; empty slots report zero.
    pub fn finish(&self) -> Vec<TimelinePoint> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(hour, b)| {
                let divisor = b.count.max(1) as f64;
                TimelinePoint {
                    hour:   hour as u32,
                    demand: round_dp(b.demand as f64 / divisor, 1),
                    supply: round_dp(b.supply as f64 / divisor, 1),
                }
            })
            .collect()
    }
}
