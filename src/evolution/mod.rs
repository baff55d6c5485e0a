//! The generation engine: samples, scores, ranks, and records one population
//! per iteration, chaining each generation off the previous elite.

pub mod fitness;
pub mod schedule;

use std::cmp::Ordering;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use self::fitness::FitnessEvaluator;
use self::schedule::dispersal_sigma;
use crate::portfolio::Plant;
use crate::sampling::{self, DispersalPolicy, NoiseSource};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("population size must be at least 1, got {0}")]
    InvalidPopulationSize(usize),
    #[error("initial sigma must be a strictly positive finite number, got {0}")]
    InvalidInitialSigma(f64),
    #[error("asset catalog must contain at least one asset")]
    EmptyCatalog,
    #[error("fixed attractor target has {target} entries but the catalog has {assets} assets")]
    AttractorLengthMismatch { target: usize, assets: usize },
}

/// Parameters of one optimization run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of evolution steps after the initial generation; the run emits
    /// `max_iterations + 1` snapshots.
    pub max_iterations: usize,
    pub population_size: usize,
    pub initial_sigma: f64,
    /// Seed for the run's random source; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub dispersal: DispersalPolicy,
    #[serde(default)]
    pub noise: NoiseSource,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            population_size: 30,
            initial_sigma: 0.5,
            seed: None,
            dispersal: DispersalPolicy::default(),
            noise: NoiseSource::default(),
        }
    }
}

impl SimulationConfig {
    /// Rejects parameters the engine cannot run with. Nothing is clamped.
    pub fn validate(&self, asset_count: usize) -> Result<(), SimulationError> {
        if self.population_size < 1 {
            return Err(SimulationError::InvalidPopulationSize(self.population_size));
        }
        if !self.initial_sigma.is_finite() || self.initial_sigma <= 0.0 {
            return Err(SimulationError::InvalidInitialSigma(self.initial_sigma));
        }
        if let DispersalPolicy::FixedAttractor { target, .. } = &self.dispersal {
            if target.len() != asset_count {
                return Err(SimulationError::AttractorLengthMismatch {
                    target: target.len(),
                    assets: asset_count,
                });
            }
        }
        Ok(())
    }
}

/// One generation's full scored population, ordered best first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationSnapshot {
    pub iteration: usize,
    /// Sorted ascending by fitness; ties keep sampling order.
    pub plants: Vec<Plant>,
    /// Dispersal spread used to produce this population.
    pub sigma: f64,
}

impl GenerationSnapshot {
    /// Best plant of the generation: the head of the sorted population.
    pub fn best_plant(&self) -> &Plant {
        &self.plants[0]
    }
}

/// Runs the generation loop, emitting one snapshot per iteration `0..=max`.
///
/// Iteration 0 samples the population uniformly at random; every later
/// iteration disperses around the center the policy derives from the previous
/// generation's best plant, with spread given by the dispersal schedule. The
/// loop always runs to `max_iterations`; there is no convergence-based early
/// exit.
///
/// Expects a config that already passed [`SimulationConfig::validate`].
pub fn evolve(
    config: &SimulationConfig,
    evaluator: &FitnessEvaluator,
    rng: &mut StdRng,
) -> Vec<GenerationSnapshot> {
    let asset_count = evaluator.asset_count();
    let mut history: Vec<GenerationSnapshot> = Vec::with_capacity(config.max_iterations + 1);

    for iteration in 0..=config.max_iterations {
        let sigma = dispersal_sigma(iteration, config.max_iterations, config.initial_sigma);

        let center = if iteration == 0 {
            None
        } else {
            let previous_best = history[iteration - 1].best_plant();
            Some(config.dispersal.center_from(&previous_best.weights))
        };

        let mut plants: Vec<Plant> = (0..config.population_size)
            .map(|slot| {
                let weights = match &center {
                    None => sampling::sample_initial(asset_count, rng),
                    Some(center) => sampling::sample_dispersed(center, sigma, config.noise, rng),
                };
                let metrics = evaluator.evaluate(&weights);
                Plant::new(iteration, slot, weights, metrics)
            })
            .collect();

        // Stable sort keeps sampling order among equal-fitness plants. The
        // volatility floor rules out NaN fitness.
        plants.sort_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap_or(Ordering::Equal));

        debug!(
            iteration,
            sigma,
            best_fitness = plants[0].fitness,
            "generation scored"
        );

        history.push(GenerationSnapshot {
            iteration,
            plants,
            sigma,
        });
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::REFERENCE_CATALOG;
    use rand::SeedableRng;

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::from_catalog(&REFERENCE_CATALOG).unwrap()
    }

    #[test]
    fn zero_population_is_rejected() {
        let config = SimulationConfig {
            population_size: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(10),
            Err(SimulationError::InvalidPopulationSize(0))
        ));
    }

    #[test]
    fn non_positive_or_non_finite_sigma_is_rejected() {
        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig {
                initial_sigma: bad,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(10),
                Err(SimulationError::InvalidInitialSigma(_))
            ));
        }
    }

    #[test]
    fn attractor_target_must_match_asset_count() {
        let config = SimulationConfig {
            dispersal: DispersalPolicy::FixedAttractor {
                target: vec![0.5, 0.5],
                drift_rate: 0.05,
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(10),
            Err(SimulationError::AttractorLengthMismatch {
                target: 2,
                assets: 10
            })
        ));
    }

    #[test]
    fn engine_emits_one_snapshot_per_iteration_inclusive() {
        let config = SimulationConfig {
            max_iterations: 12,
            population_size: 6,
            seed: Some(1),
            ..SimulationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let history = evolve(&config, &evaluator(), &mut rng);
        assert_eq!(history.len(), 13);
        for (expected, snapshot) in history.iter().enumerate() {
            assert_eq!(snapshot.iteration, expected);
            assert_eq!(snapshot.plants.len(), 6);
        }
    }

    #[test]
    fn populations_are_sorted_with_the_best_first() {
        let config = SimulationConfig {
            max_iterations: 5,
            population_size: 10,
            ..SimulationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        for snapshot in evolve(&config, &evaluator(), &mut rng) {
            for pair in snapshot.plants.windows(2) {
                assert!(pair[0].fitness <= pair[1].fitness);
            }
            assert_eq!(snapshot.best_plant().id, snapshot.plants[0].id);
        }
    }
}
