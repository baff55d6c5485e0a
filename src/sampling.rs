//! Weight-vector construction: uniform initialization and sigma-scaled
//! dispersal around a center, always landing back on the unit simplex.

use once_cell::sync::Lazy;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;
use tracing::warn;

use crate::consts::NOISE_AMPLIFICATION;

static UNIT_NORMAL: Lazy<Normal> =
    Lazy::new(|| Normal::new(0.0, 1.0).expect("unit normal parameters are valid"));

/// Source of the per-component dispersal noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseSource {
    /// Four uniform draws summed and recentered at zero. Cheap pseudo-normal.
    #[default]
    SumOfUniforms,
    /// Exact standard normal.
    Gaussian,
}

impl NoiseSource {
    /// One zero-mean draw.
    pub fn standard_draw<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            NoiseSource::SumOfUniforms => {
                rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() - 2.0
            }
            NoiseSource::Gaussian => UNIT_NORMAL.sample(rng),
        }
    }
}

/// How a generation's sampling center is derived from the previous elite.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DispersalPolicy {
    /// Canonical invasive-weed dispersal: seeds spread around the parent itself.
    #[default]
    PreviousBest,
    /// Drift the center a fixed fraction of the way from the elite toward an
    /// external target portfolio before dispersing.
    FixedAttractor { target: Vec<f64>, drift_rate: f64 },
}

impl DispersalPolicy {
    pub(crate) fn center_from(&self, previous_best: &[f64]) -> Vec<f64> {
        match self {
            DispersalPolicy::PreviousBest => previous_best.to_vec(),
            DispersalPolicy::FixedAttractor { target, drift_rate } => previous_best
                .iter()
                .zip(target.iter())
                .map(|(weight, target)| weight + (target - weight) * drift_rate)
                .collect(),
        }
    }
}

/// Draws a fresh uniformly random long-only weight vector of length `n`.
pub fn sample_initial<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let uniform = Uniform::new(0.0, 1.0);
    let raw: Vec<f64> = (0..n).map(|_| uniform.sample(rng)).collect();
    normalize_weights(raw)
}

/// Disperses one candidate around `center` with spread `sigma`.
///
/// Negative components are clamped to zero (long-only constraint) before
/// renormalization.
pub fn sample_dispersed<R: Rng + ?Sized>(
    center: &[f64],
    sigma: f64,
    noise: NoiseSource,
    rng: &mut R,
) -> Vec<f64> {
    let raw: Vec<f64> = center
        .iter()
        .map(|weight| (weight + noise.standard_draw(rng) * sigma * NOISE_AMPLIFICATION).max(0.0))
        .collect();
    normalize_weights(raw)
}

/// Normalizes by absolute sum so the entries form a point on the unit simplex.
///
/// A vector that collapsed to zero falls back to the uniform allocation; this
/// is an expected edge case of random sampling, not an error.
pub fn normalize_weights(weights: Vec<f64>) -> Vec<f64> {
    let magnitude: f64 = weights.iter().map(|weight| weight.abs()).sum();
    if magnitude < f64::EPSILON {
        warn!(
            components = weights.len(),
            "weight vector collapsed to zero, falling back to uniform allocation"
        );
        let n = weights.len();
        return vec![1.0 / n as f64; n];
    }
    weights
        .into_iter()
        .map(|weight| weight.abs() / magnitude)
        .collect()
}
