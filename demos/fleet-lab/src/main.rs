//! fleet-lab — tune the fleet heuristic on a preset city, then plan corridor
//! staging from delay telemetry.
//!
//! ```text
//! fleet-lab [config.json]
//! ```
//!
//! Without a config file the lab runs the defaults below on Ingolstadt and
//! plans from the built-in sample corridors.  Set `RUST_LOG=debug` to see
//! per-episode summaries.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ft_core::SimRng;
use ft_episode::{EpisodeConfig, EpisodeMetrics, EpisodeRunner, perturb_params, run_batch};
use ft_grid::CityPreset;
use ft_planner::{RawRoute, RouteDescriptor, build_plan, normalize_routes, sample_corridors};
use ft_policy::{BaselinePolicy, PolicyParams, RewardTracker};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LabConfig {
    preset:     String,
    seed:       u64,
    epochs:     usize,
    /// Candidates per epoch: the best so far plus `population − 1`
    /// perturbations of it.
    population: usize,
    episode:    EpisodeConfig,
    params:     PolicyParams,
    /// JSON array of raw corridor records; sample corridors when absent.
    telemetry:  Option<PathBuf>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            preset:     CityPreset::Ingolstadt.to_string(),
            seed:       42,
            epochs:     8,
            population: 4,
            episode:    EpisodeConfig::default(),
            params:     PolicyParams::default(),
            telemetry:  None,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<LabConfig> {
    let Some(path) = path else {
        return Ok(LabConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_corridors(path: Option<&Path>) -> Result<Vec<RouteDescriptor>> {
    let Some(path) = path else {
        return Ok(sample_corridors());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let raw: Vec<RawRoute> = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(normalize_routes(raw)?)
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Keep the candidate with the highest average reward; earlier wins ties.
fn best_of(results: Vec<EpisodeMetrics>) -> Option<EpisodeMetrics> {
    results.into_iter().reduce(|best, m| if m.reward_avg > best.reward_avg { m } else { best })
}

fn search(runner: &EpisodeRunner, config: &LabConfig, rng: &mut SimRng) -> Option<EpisodeMetrics> {
    let mut best: Option<EpisodeMetrics> = None;
    for epoch in 0..config.epochs {
        let anchor = best.as_ref().map_or(config.params, |m| m.params);
        let mut candidates = vec![anchor];
        candidates.extend((1..config.population.max(1)).map(|_| perturb_params(&anchor, rng)));

        let Some(winner) = best_of(run_batch(runner, &candidates, rng)) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| winner.reward_avg > b.reward_avg) {
            info!(
                epoch,
                reward_avg = winner.reward_avg,
                served = winner.served,
                unmet = winner.unmet,
                "new best parameters"
            );
            best = Some(winner);
        }
    }
    best
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    let preset: CityPreset = config.preset.parse()?;
    let mut rng = SimRng::new(config.seed);

    // 1. One grid for every episode so candidates compete on equal terms.
    let scenario = Arc::new(preset.build(&mut rng));
    info!(
        city = scenario.name(),
        cells = scenario.cell_count(),
        fleet = config.episode.fleet_size,
        steps = config.episode.steps,
        "scenario ready"
    );

    let runner = EpisodeRunner::builder()
        .scenario(Arc::clone(&scenario))
        .config(config.episode)
        .build()?;

    // 2. Untuned reference.
    let baseline_runner = EpisodeRunner::builder()
        .scenario(Arc::clone(&scenario))
        .config(config.episode)
        .policy(BaselinePolicy)
        .build()?;
    let reference = baseline_runner.run(&config.params, &mut rng.child(u64::MAX));
    info!(reward_avg = reference.reward_avg, served = reference.served, "baseline policy");

    // 3. Epoch local search.
    let t0 = Instant::now();
    let best = search(&runner, &config, &mut rng).context("no epochs were run")?;
    info!(
        epochs = config.epochs,
        elapsed_s = t0.elapsed().as_secs_f64(),
        reward_avg = best.reward_avg,
        "search finished"
    );

    // 4. Re-run the winning parameters with the step log and reward tracker.
    let replay = runner.with_config(EpisodeConfig { capture_steps: true, ..config.episode })?;
    let mut tracker = RewardTracker::new();
    let detailed = replay.run_observed(&best.params, &mut SimRng::new(config.seed), &mut tracker);
    info!(reward_ema = tracker.baseline(), ticks = tracker.samples(), "replay finished");

    println!("{}", serde_json::to_string_pretty(&detailed)?);

    // 5. Corridor plan.
    let corridors = load_corridors(config.telemetry.as_deref())?;
    let plan = build_plan(&corridors);
    info!(
        corridors = corridors.len(),
        reliability = plan.service_reliability,
        allocated = plan.allocated_vehicles(),
        "plan built"
    );
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
