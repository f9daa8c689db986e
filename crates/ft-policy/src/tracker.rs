//! Reward moving average.

/// Exponential moving average of per-tick reward:
/// `b ← 0.9·b + 0.1·r`.
///
/// Pure instrumentation.  No policy reads it; it exists so dashboards and
/// logs can show a smoothed reward next to the raw one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RewardTracker {
    baseline: f64,
    samples:  u64,
}

impl RewardTracker {
    const DECAY: f64 = 0.9;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reward: f64) {
        self.baseline = Self::DECAY * self.baseline + (1.0 - Self::DECAY) * reward;
        self.samples += 1;
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }
}
