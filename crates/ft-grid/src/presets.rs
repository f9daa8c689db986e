//! Built-in European city presets.
//!
//! Each preset is a small synthetic grid whose population surface, charger
//! layout, base tariff and daily demand profile loosely follow the named
//! city.  Construction draws the population/charger jitter and the demand
//! noise seed from the caller's [`SimRng`], so the same seed always yields
//! the same city.

use std::fmt;
use std::str::FromStr;

use ft_core::{CellId, SimRng, Tick, hashed_unit};

use crate::{CityCell, DemandModel, GridError, Scenario, ScenarioBuilder};

/// A named scenario generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CityPreset {
    /// 6×6 grid, radial population, 0.25 €/kWh.
    #[default]
    Ingolstadt,
    /// 7×5 grid, waterfront fast chargers, 0.20 €/kWh.
    Oslo,
    /// 8×6 grid, institutional core band, 0.27 €/kWh.
    Brussels,
}

impl CityPreset {
    pub const ALL: [CityPreset; 3] = [CityPreset::Ingolstadt, CityPreset::Oslo, CityPreset::Brussels];

    pub fn as_str(self) -> &'static str {
        match self {
            CityPreset::Ingolstadt => "Ingolstadt",
            CityPreset::Oslo       => "Oslo",
            CityPreset::Brussels   => "Brussels",
        }
    }

    /// Generate the scenario.
    pub fn build(self, rng: &mut SimRng) -> Scenario {
        let noise_seed = rng.next_seed();
        let demand = PresetDemand { preset: self, noise_seed };

        let builder = match self {
            CityPreset::Ingolstadt => {
                let (w, h) = (6u32, 6u32);
                let (cx, cy) = ((w - 1) as f64 / 2.0, (h - 1) as f64 / 2.0);
                let span = (w + h) as f64;
                // Population and charger jitter, drawn per cell in row-major
                // order with the population draw first.
                let jitter: Vec<(f64, f64)> = (0..w * h).map(|_| (rng.unit(), rng.unit())).collect();
                let at = |x: i32, y: i32| jitter[(y as u32 * w + x as u32) as usize];
                ScenarioBuilder::grid(
                    self.as_str(),
                    w,
                    h,
                    |x, y| {
                        let dist = (x as f64 - cx).abs() + (y as f64 - cy).abs();
                        120.0 + 250.0 * (1.0 - dist / span) + 40.0 * at(x, y).0
                    },
                    |x, y| 11.0 + 11.0 * at(x, y).1,
                )
            }
            CityPreset::Oslo => ScenarioBuilder::grid(
                self.as_str(),
                7,
                5,
                |x, y| {
                    let d2 = (x as f64 - 2.5).powi(2) + (y as f64 - 2.0).powi(2);
                    100.0 + 220.0 * (-d2 / 6.0).exp() + 30.0 * rng.unit()
                },
                |_, y| if y <= 1 { 22.0 } else { 11.0 },
            ),
            CityPreset::Brussels => ScenarioBuilder::grid(
                self.as_str(),
                8,
                6,
                |x, y| {
                    let band = (1.0 - (x as f64 - 3.0).abs() / 4.0).max(0.0);
                    140.0 + 260.0 * band + 20.0 * (y as f64).cos() + 40.0 * rng.unit()
                },
                |x, y| {
                    let base = if x % 2 == 0 { 16.0 } else { 8.0 };
                    base + if y % 3 == 0 { 2.0 } else { 0.0 }
                },
            ),
        };

        // Preset grids are non-empty rectangles with unique coordinates.
        builder.finish(self.base_energy_price(), demand)
    }

    /// Base tariff in €/kWh.
    pub fn base_energy_price(self) -> f64 {
        match self {
            CityPreset::Ingolstadt => 0.25,
            CityPreset::Oslo       => 0.20,
            CityPreset::Brussels   => 0.27,
        }
    }
}

impl fmt::Display for CityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CityPreset {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CityPreset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownPreset(s.to_string()))
    }
}

// ── Demand profiles ───────────────────────────────────────────────────────────

struct PresetDemand {
    preset:     CityPreset,
    noise_seed: u64,
}

impl PresetDemand {
    /// Multiplicative noise in `[0.7, 1.3)`.
    #[inline]
    fn noise(&self, tick: Tick, cell: CellId) -> f64 {
        0.7 + 0.6 * hashed_unit(self.noise_seed, tick.0, cell.0 as u64)
    }
}

impl DemandModel for PresetDemand {
    fn expected_demand(&self, tick: Tick, cell: &CityCell) -> f64 {
        let hour = tick.hour_of_day();
        let pop = cell.population as f64;
        let noise = self.noise(tick, cell.id);
        match self.preset {
            CityPreset::Ingolstadt => {
                let peak = match hour {
                    7..=9   => 1.4,
                    16..=19 => 1.6,
                    _       => 1.0,
                };
                let weekend = if tick.is_weekend() { 0.8 } else { 1.0 };
                pop / 200.0 * peak * weekend * noise
            }
            CityPreset::Oslo => {
                let peak = match hour {
                    7..=9 | 15..=18 => 1.5,
                    _               => 0.9,
                };
                let renewables = if (1..=5).contains(&hour) { 0.9 } else { 1.0 };
                pop / 210.0 * peak * renewables * noise
            }
            CityPreset::Brussels => {
                let institutional = if (8..=17).contains(&hour) { 1.3 } else { 0.9 };
                let weekend = if tick.is_weekend() { 0.9 } else { 1.0 };
                pop / 220.0 * institutional * weekend * noise
            }
        }
    }
}
