//! Proportional vehicle allocation with tier clipping and bounded
//! reconciliation.

use ft_core::clamp;

use crate::SeverityTier;

/// Reconciliation gives up after this many passes per corridor.
pub const PASSES_PER_CORRIDOR: usize = 6;

/// What the allocator needs to know about one corridor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CorridorDemand {
    pub score:     f64,
    pub tier:      SeverityTier,
    pub length_km: f64,
}

impl CorridorDemand {
    /// `length_km · (0.6 + score) + min_share(tier)`.
    pub fn weight(&self) -> f64 {
        self.length_km * (0.6 + self.score) + self.tier.min_share()
    }
}

/// Vehicle counts per corridor, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    pub vehicles: Vec<u32>,
    /// Unclipped proportional share of the fleet.
    pub raw:      Vec<f64>,
    /// `fleet − Σ vehicles` when reconciliation stopped.  Positive means the
    /// fleet is under-allocated.
    pub residual: i64,
    /// Reconciliation passes spent.
    pub passes:   usize,
}

impl Allocation {
    pub fn total(&self) -> u64 {
        self.vehicles.iter().map(|&v| v as u64).sum()
    }

    pub fn is_exact(&self) -> bool {
        self.residual == 0
    }
}

/// Split `fleet` over `corridors`.
///
/// Each corridor's proportional share is rounded and clipped to its tier's
/// `[min_vehicles, max_vehicles]`.  The remaining mismatch is then walked
/// off one vehicle at a time, cycling corridors by severity (then raw
/// share) descending.  Additions ignore tier maxima; a removal that would
/// go below a tier minimum is skipped.  After
/// `PASSES_PER_CORRIDOR × corridors` passes any residual is accepted.
pub fn allocate(corridors: &[CorridorDemand], fleet: u32) -> Allocation {
    let n = corridors.len();
    if n == 0 {
        return Allocation { vehicles: Vec::new(), raw: Vec::new(), residual: 0, passes: 0 };
    }

    let weights: Vec<f64> = corridors.iter().map(CorridorDemand::weight).collect();
    let total_weight: f64 = weights.iter().sum();
    let raw: Vec<f64> = weights
        .iter()
        .map(|w| if total_weight > 0.0 { w / total_weight * fleet as f64 } else { 0.0 })
        .collect();

    let mut vehicles: Vec<u32> = corridors
        .iter()
        .zip(&raw)
        .map(|(c, r)| {
            let min = c.tier.min_vehicles() as f64;
            let max = (c.tier.max_vehicles(fleet) as f64).max(min);
            clamp(r.round(), min, max) as u32
        })
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        corridors[b].score.total_cmp(&corridors[a].score).then(raw[b].total_cmp(&raw[a]))
    });

    let allocated: i64 = vehicles.iter().map(|&v| v as i64).sum();
    let mut diff = fleet as i64 - allocated;
    let limit = PASSES_PER_CORRIDOR * n;
    let mut passes = 0;
    while diff != 0 && passes < limit {
        let i = order[passes % n];
        if diff > 0 {
            vehicles[i] += 1;
            diff -= 1;
        } else if vehicles[i] > corridors[i].tier.min_vehicles() {
            vehicles[i] -= 1;
            diff += 1;
        }
        passes += 1;
    }

    Allocation { vehicles, raw, residual: diff, passes }
}
