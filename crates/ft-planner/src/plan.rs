//! The city-wide operational plan and the planner that builds it.

use ft_core::{TIMELINE_SLOTS, clamp, round_dp};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::allocation::{CorridorDemand, allocate};
use crate::route::mean;
use crate::{PlannerError, PlannerResult, RouteDescriptor, SeverityTier, severity_score};

/// CO₂ avoided per vehicle-km of pooled service, kg.
pub const CO2_KG_PER_KM: f64 = 0.12;

/// Service days credited per week.
pub const SERVICE_DAYS_PER_WEEK: f64 = 5.0;

// ── Output types ──────────────────────────────────────────────────────────────

/// Vehicles staged on one corridor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotAllocation {
    pub corridor:              String,
    pub severity:              SeverityTier,
    pub recommended_avs:       u32,
    pub coverage_window:       String,
    pub notes:                 String,
    pub efficiency_boost_pct:  u32,
    pub time_saved_min:        i64,
    /// 1 d.p.
    pub co2_saved_kg_per_week: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingInstruction {
    pub window:    String,
    pub action:    String,
    pub rationale: String,
}

/// Expected ride demand against available supply for one hour of the day.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemandSupplyPoint {
    pub hour:   u32,
    pub demand: f64,
    pub supply: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationPlan {
    pub recommended_fleet_size: u32,
    /// %, 1 d.p.
    pub service_reliability:    f64,
    /// kWh, 2 d.p.
    pub energy_per_ride_kwh:    f64,
    /// 1 d.p.
    pub grid_stress_index:      f64,
    /// 1 d.p.
    pub reward_score:           f64,
    pub hotspots:               Vec<HotspotAllocation>,
    pub charging_plan:          Vec<ChargingInstruction>,
    /// Always [`TIMELINE_SLOTS`] entries, hour 0 first.
    pub demand_timeline:        Vec<DemandSupplyPoint>,
    /// Allocation mismatch left after reconciliation.  Not published.
    #[serde(skip)]
    pub residual:               i64,
}

impl OrchestrationPlan {
    fn empty(fleet: u32) -> Self {
        Self {
            recommended_fleet_size: fleet,
            service_reliability:    0.0,
            energy_per_ride_kwh:    0.0,
            grid_stress_index:      0.0,
            reward_score:           0.0,
            hotspots:               Vec::new(),
            charging_plan:          Vec::new(),
            demand_timeline:        (0..TIMELINE_SLOTS as u32)
                .map(|hour| DemandSupplyPoint { hour, demand: 0.0, supply: 0.0 })
                .collect(),
            residual:               0,
        }
    }

    pub fn allocated_vehicles(&self) -> u64 {
        self.hotspots.iter().map(|h| h.recommended_avs as u64).sum()
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    pub fleet_target: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { fleet_target: 120 }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.fleet_target == 0 {
            return Err(PlannerError::Config("fleet_target must be at least 1".into()));
        }
        Ok(())
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Stateless: holds only its configuration, so one planner can serve
/// concurrent callers.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Score, tier and allocate `routes`, then derive KPIs, the 24-hour
    /// timeline and the charging schedule.  An empty input yields a zeroed
    /// plan.
    pub fn build_plan(&self, routes: &[RouteDescriptor]) -> OrchestrationPlan {
        let fleet = self.config.fleet_target;
        if routes.is_empty() {
            return OrchestrationPlan::empty(fleet);
        }

        let corridors: Vec<CorridorDemand> = routes
            .iter()
            .map(|r| {
                let score = severity_score(r);
                CorridorDemand { score, tier: SeverityTier::classify(score), length_km: r.effective_length_km() }
            })
            .collect();

        let allocation = allocate(&corridors, fleet);
        if !allocation.is_exact() {
            warn!(
                corridors = corridors.len(),
                fleet,
                residual = allocation.residual,
                passes = allocation.passes,
                "allocation did not reconcile to the fleet target"
            );
        }

        let hotspots: Vec<HotspotAllocation> = routes
            .iter()
            .zip(&corridors)
            .zip(&allocation.vehicles)
            .map(|((route, c), &avs)| hotspot(route, c, avs, fleet))
            .collect();

        // ── KPIs ──────────────────────────────────────────────────────────
        let mean_score = mean(corridors.iter().map(|c| c.score));
        let mean_reliability = mean(corridors.iter().map(|c| 1.0 - c.score));
        let reliability = clamp(65.0 + mean_reliability * 30.0, 65.0, 98.0);
        let energy_per_ride = 9.0 - 2.5 * mean_score;
        let grid_stress = clamp(35.0 + mean_score * 40.0, 20.0, 95.0);
        let reward = reliability - 0.6 * grid_stress - mean_score * 20.0;

        debug!(
            corridors = corridors.len(),
            fleet,
            mean_score,
            reliability,
            grid_stress,
            "plan built"
        );

        OrchestrationPlan {
            recommended_fleet_size: fleet,
            service_reliability:    round_dp(reliability, 1),
            energy_per_ride_kwh:    round_dp(energy_per_ride, 2),
            grid_stress_index:      round_dp(grid_stress, 1),
            reward_score:           round_dp(reward, 1),
            hotspots,
            charging_plan:          charging_schedule(),
            demand_timeline:        demand_timeline(fleet, mean_score, reliability),
            residual:               allocation.residual,
        }
    }
}

/// [`Planner::build_plan`] with the default 120-vehicle fleet.
pub fn build_plan(routes: &[RouteDescriptor]) -> OrchestrationPlan {
    Planner::default().build_plan(routes)
}

// ── Derived figures ───────────────────────────────────────────────────────────

fn hotspot(route: &RouteDescriptor, corridor: &CorridorDemand, avs: u32, fleet: u32) -> HotspotAllocation {
    let boost = clamp(0.15 + corridor.score * 0.2, 0.15, 0.35);
    let boost_pct = (boost * 100.0).round() as u32;
    let time_saved = (route.delay_s * boost / 60.0).round() as i64;
    let co2 = round_dp(corridor.length_km * CO2_KG_PER_KM * avs as f64 * SERVICE_DAYS_PER_WEEK, 1);
    let share_pct = (avs as f64 / fleet as f64 * 100.0).round() as u32;

    HotspotAllocation {
        corridor:              route.name.clone(),
        severity:              corridor.tier,
        recommended_avs:       avs,
        coverage_window:       corridor.tier.coverage_window().to_owned(),
        notes:                 format!(
            "Cut delay ~{boost_pct}% (~{time_saved} min/day). CO₂ ↓ {co2} kg/week. \
             Fleet staging: {avs} AVs (~{share_pct}% of the active pool)."
        ),
        efficiency_boost_pct:  boost_pct,
        time_saved_min:        time_saved,
        co2_saved_kg_per_week: co2,
    }
}

/// Time-of-day demand multiplier: morning and evening peaks, a lunch bump.
pub fn hour_multiplier(hour: u32) -> f64 {
    match hour {
        6..=9   => 1.4,
        16..=19 => 1.5,
        11..=13 => 1.2,
        _       => 0.8,
    }
}

/// Timeline demand uplift `1 + meanScore`.  A city whose corridors all score
/// zero is still planned at double base demand.
fn severity_boost(mean_score: f64) -> f64 {
    if mean_score > 0.0 { 1.0 + mean_score } else { 2.0 }
}

fn demand_timeline(fleet: u32, mean_score: f64, reliability: f64) -> Vec<DemandSupplyPoint> {
    let boost = severity_boost(mean_score);
    (0..TIMELINE_SLOTS as u32)
        .map(|hour| {
            let base = hour_multiplier(hour);
            DemandSupplyPoint {
                hour,
                demand: round_dp(45.0 * base * boost, 1),
                supply: round_dp(fleet as f64 * (reliability / 100.0) * (base / 1.6), 1),
            }
        })
        .collect()
}

/// The fixed depot, midday and vehicle-to-grid windows.
pub fn charging_schedule() -> Vec<ChargingInstruction> {
    let entry = |window: &str, action: &str, rationale: &str| ChargingInstruction {
        window:    window.to_owned(),
        action:    action.to_owned(),
        rationale: rationale.to_owned(),
    };
    vec![
        entry(
            "22:00 to 05:00",
            "Stage 45% of fleet at Nordbahnhof and Audi Forum depots for overnight charging (11 kW mix).",
            "Nighttime tariffs in Bavaria average 0.17 €/kWh; grid load is low.",
        ),
        entry(
            "11:30 to 13:30",
            "Rotate 15% of vehicles through Klinikum micro-depot using 60 kW DC top-up (max 20 min dwell).",
            "Midday solar generation peaks on Ingolstadt rooftops; demand valley enables opportunity charging.",
        ),
        entry(
            "01:00 to 04:00",
            "Offer 2 MW vehicle-to-grid buffer using idle fleet at GVZ Ingolstadt logistics hub.",
            "Supports municipal grid load balancing; vehicles remain above 70% state-of-charge by 05:30.",
        ),
    ]
}
