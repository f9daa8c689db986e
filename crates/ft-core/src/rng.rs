//! Deterministic, caller-owned random sources.
//!
//! # Determinism strategy
//!
//! There is no process-wide generator anywhere in the workspace.  Every
//! function that needs randomness takes `&mut SimRng`, so a run is fully
//! reproduced by its seed.  Independent episodes that may run concurrently
//! get their own stream via [`SimRng::child`], derived sequentially from a
//! root generator before any work is dispatched.
//!
//! Scenario demand functions must stay pure functions of `(tick, cell)`, so
//! their noise comes from [`hashed_unit`] instead: a stateless draw keyed by
//! a seed fixed at scenario construction.
//!
//! Seed mixing uses the 64-bit fractional part of the golden ratio, which
//! spreads consecutive keys uniformly across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Second odd constant so `(a, b)` and `(b, a)` hash differently.
const MIXING_CONSTANT_B: u64 = 0xc2b2_ae3d_27d4_eb4f;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Random source passed explicitly to policies, perturbation and presets.
///
/// Not shared between threads; concurrent episodes each take a
/// [`child`](Self::child).
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream.  Advances `self` by one draw, so
    /// children must be derived in a fixed order to be reproducible.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Fresh 64-bit seed, e.g. for [`hashed_unit`].
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.r#gen::<u64>()
    }
}

// ── Stateless draws ───────────────────────────────────────────────────────────

/// Deterministic uniform draw in `[0, 1)` keyed by `(seed, a, b)`.
///
/// The same key always yields the same value, independent of call order.
pub fn hashed_unit(seed: u64, a: u64, b: u64) -> f64 {
    let key = seed
        ^ a.wrapping_add(1).wrapping_mul(MIXING_CONSTANT)
        ^ b.wrapping_add(1).wrapping_mul(MIXING_CONSTANT_B);
    SmallRng::seed_from_u64(key).r#gen::<f64>()
}
