//! Several independent episodes over one runner.

use ft_core::SimRng;
use ft_policy::PolicyParams;

use crate::{EpisodeMetrics, EpisodeRunner};

/// Evaluate every parameter set in `variants` with `runner`.
///
/// Child RNGs are derived from `rng` sequentially, one per variant in input
/// order, before any episode runs.  With the `parallel` feature the episodes
/// then run on Rayon's thread pool; the output is identical either way and
/// is returned in input order.
///
/// Use a `ScenarioSource::Shared` runner to compare variants on the same grid.
pub fn run_batch(runner: &EpisodeRunner, variants: &[PolicyParams], rng: &mut SimRng) -> Vec<EpisodeMetrics> {
    let jobs: Vec<(PolicyParams, SimRng)> = variants
        .iter()
        .enumerate()
        .map(|(i, p)| (*p, rng.child(i as u64)))
        .collect();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.into_par_iter()
            .map(|(params, mut child)| runner.run(&params, &mut child))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        jobs.into_iter()
            .map(|(params, mut child)| runner.run(&params, &mut child))
            .collect()
    }
}
