//! Local/remote evaluation seam.
//!
//! An external service may answer episode requests with richer models.  It
//! speaks the same shapes as this crate: [`EpisodeRequest`] in,
//! [`EpisodeMetrics`] out.  [`FallbackEvaluator`] tries it first and answers
//! locally whenever it fails, so callers always get metrics.
//!
//! Transport (HTTP client, timeouts) belongs to the application; it plugs
//! in by implementing [`EpisodeEvaluator`].

use ft_core::SimRng;
use ft_policy::PolicyParams;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{EpisodeConfig, EpisodeMetrics, EpisodeResult, EpisodeRunner, EvaluationError};

/// One episode evaluation request.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRequest {
    pub params:  PolicyParams,
    #[serde(default)]
    pub options: EpisodeConfig,
}

impl EpisodeRequest {
    pub fn new(params: PolicyParams) -> Self {
        Self { params, options: EpisodeConfig::default() }
    }
}

/// Anything that can turn a request into metrics.
pub trait EpisodeEvaluator: Send + Sync {
    fn evaluate(&self, request: &EpisodeRequest, rng: &mut SimRng) -> Result<EpisodeMetrics, EvaluationError>;
}

// ── LocalEvaluator ────────────────────────────────────────────────────────────

/// Answers requests with an in-process [`EpisodeRunner`].
///
/// The runner supplies the scenario source, environment settings and
/// policy; each request supplies fleet size, steps and step capture.
#[derive(Clone, Debug)]
pub struct LocalEvaluator {
    runner: EpisodeRunner,
}

impl LocalEvaluator {
    pub fn new(runner: EpisodeRunner) -> Self {
        Self { runner }
    }

    /// Run `request` locally.  Fails on a zero fleet, zero steps or
    /// parameters outside [`PARAM_BOUNDS`](ft_policy::PARAM_BOUNDS).
    pub fn run(&self, request: &EpisodeRequest, rng: &mut SimRng) -> EpisodeResult<EpisodeMetrics> {
        request.params.validate()?;
        let runner = self.runner.with_config(request.options)?;
        Ok(runner.run(&request.params, rng))
    }
}

impl EpisodeEvaluator for LocalEvaluator {
    fn evaluate(&self, request: &EpisodeRequest, rng: &mut SimRng) -> Result<EpisodeMetrics, EvaluationError> {
        Ok(self.run(request, rng)?)
    }
}

// ── FallbackEvaluator ─────────────────────────────────────────────────────────

/// Which side produced an [`Evaluated`] answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricsSource {
    Remote,
    LocalFallback,
}

/// Metrics plus their provenance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluated {
    pub metrics: EpisodeMetrics,
    pub source:  MetricsSource,
}

impl Evaluated {
    pub fn is_fallback(&self) -> bool {
        self.source == MetricsSource::LocalFallback
    }
}

/// Try `remote`; on any error, log it and answer with `local`.
pub struct FallbackEvaluator<R: EpisodeEvaluator> {
    remote: R,
    local:  LocalEvaluator,
}

impl<R: EpisodeEvaluator> FallbackEvaluator<R> {
    pub fn new(remote: R, local: LocalEvaluator) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fails only when the request itself is invalid for local evaluation.
    pub fn evaluate(&self, request: &EpisodeRequest, rng: &mut SimRng) -> EpisodeResult<Evaluated> {
        match self.remote.evaluate(request, rng) {
            Ok(metrics) => {
                debug!(reward_avg = metrics.reward_avg, "remote evaluation answered");
                Ok(Evaluated { metrics, source: MetricsSource::Remote })
            }
            Err(err) => {
                warn!(error = %err, "remote evaluation failed, running episode locally");
                let metrics = self.local.run(request, rng)?;
                Ok(Evaluated { metrics, source: MetricsSource::LocalFallback })
            }
        }
    }
}
