//! Run builder: seeds the process from a config, computes the equal-weight
//! baseline, drives the generation engine, and assembles the final artifact.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assets::{AssetCatalog, REFERENCE_CATALOG};
use crate::consts::{EQUITY_CURVE_DAYS, TRADING_DAYS_PER_YEAR};
use crate::evolution::fitness::FitnessEvaluator;
use crate::evolution::{evolve, GenerationSnapshot, SimulationConfig, SimulationError};
use crate::portfolio::{Plant, PortfolioMetrics};
use crate::sampling::NoiseSource;

/// One step of an illustrative equity path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub day: usize,
    pub value: f64,
}

/// The non-optimized equal-weight comparison portfolio.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Baseline {
    pub weights: Vec<f64>,
    pub metrics: PortfolioMetrics,
    pub equity_curve: Vec<TimeSeriesPoint>,
}

/// Summary statistics over the final generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Best (highest) annual return found in the final population.
    pub best_return: f64,
    /// Average annual return across the final population.
    pub population_average_return: f64,
    /// Best (lowest) volatility found in the final population.
    pub best_volatility: f64,
    /// Average volatility across the final population.
    pub population_average_volatility: f64,
    /// Best (highest) Sharpe ratio found in the final population.
    pub best_sharpe: f64,
    /// Average Sharpe ratio across the final population.
    pub population_average_sharpe: f64,
}

impl RunSummary {
    fn from_population(plants: &[Plant]) -> Self {
        let count = plants.len() as f64;
        let mut best_return = f64::NEG_INFINITY;
        let mut best_volatility = f64::INFINITY;
        let mut best_sharpe = f64::NEG_INFINITY;
        let mut sum_return = 0.0;
        let mut sum_volatility = 0.0;
        let mut sum_sharpe = 0.0;

        for plant in plants {
            best_return = best_return.max(plant.metrics.annual_return);
            best_volatility = best_volatility.min(plant.metrics.volatility);
            best_sharpe = best_sharpe.max(plant.metrics.sharpe);
            sum_return += plant.metrics.annual_return;
            sum_volatility += plant.metrics.volatility;
            sum_sharpe += plant.metrics.sharpe;
        }

        Self {
            best_return,
            population_average_return: sum_return / count,
            best_volatility,
            population_average_volatility: sum_volatility / count,
            best_sharpe,
            population_average_sharpe: sum_sharpe / count,
        }
    }
}

/// One point of the cost-over-iteration trend, `cost = -sharpe` of the elite.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CostPoint {
    pub iteration: usize,
    pub cost: f64,
}

/// Complete, replayable record of one optimization run.
///
/// Immutable after construction; a new run replaces it wholesale. Owns its
/// history and baseline exclusively.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub config: SimulationConfig,
    pub assets: AssetCatalog,
    pub baseline: Baseline,
    pub history: Vec<GenerationSnapshot>,
    pub summary: RunSummary,
}

impl SimulationRun {
    /// Builds a complete run from a config and an asset catalog.
    ///
    /// Fails fast on invalid parameters before any computation begins. The
    /// call is a pure blocking computation: no I/O, no shared state, safe to
    /// invoke concurrently with independent configs. With a fixed
    /// `config.seed` the result is bit-reproducible, baseline included.
    pub fn build(config: &SimulationConfig, catalog: &AssetCatalog) -> Result<Self, SimulationError> {
        config.validate(catalog.len())?;
        let evaluator = FitnessEvaluator::from_catalog(catalog)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            max_iterations = config.max_iterations,
            population_size = config.population_size,
            initial_sigma = config.initial_sigma,
            "starting simulation run"
        );

        let baseline = build_baseline(&evaluator, catalog.len(), config.noise, &mut rng);
        let history = evolve(config, &evaluator, &mut rng);
        let summary = RunSummary::from_population(&history[history.len() - 1].plants);

        info!(best_sharpe = summary.best_sharpe, "simulation run complete");

        Ok(SimulationRun {
            config: config.clone(),
            assets: catalog.clone(),
            baseline,
            history,
            summary,
        })
    }

    /// Builds against the bundled reference catalog.
    pub fn build_default(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Self::build(config, &REFERENCE_CATALOG)
    }

    /// Elite of the final generation, the best solution the run settled on.
    pub fn best_plant(&self) -> &Plant {
        self.history[self.history.len() - 1].best_plant()
    }

    /// Convergence trend for display: one point per generation.
    pub fn cost_per_generation(&self) -> Vec<CostPoint> {
        self.history
            .iter()
            .map(|snapshot| CostPoint {
                iteration: snapshot.iteration,
                cost: snapshot.best_plant().fitness,
            })
            .collect()
    }
}

fn build_baseline(
    evaluator: &FitnessEvaluator,
    asset_count: usize,
    noise: NoiseSource,
    rng: &mut StdRng,
) -> Baseline {
    let weights = vec![1.0 / asset_count as f64; asset_count];
    let metrics = evaluator.evaluate(&weights);
    let equity_curve = generate_equity_curve(metrics.annual_return, metrics.volatility, noise, rng);
    Baseline {
        weights,
        metrics,
        equity_curve,
    }
}

/// Illustrative geometric-Brownian price path driven by the baseline's own
/// return and volatility. Not tied to the generation loop.
fn generate_equity_curve(
    annual_return: f64,
    volatility: f64,
    noise: NoiseSource,
    rng: &mut StdRng,
) -> Vec<TimeSeriesPoint> {
    let dt = 1.0 / TRADING_DAYS_PER_YEAR;
    let drift = (annual_return - 0.5 * volatility * volatility) * dt;
    let step_volatility = volatility * dt.sqrt();

    let mut value = 1.0;
    (0..EQUITY_CURVE_DAYS)
        .map(|day| {
            let shock = noise.standard_draw(rng);
            value *= (drift + step_volatility * shock).exp();
            TimeSeriesPoint { day, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FLOAT_COMPARISON_EPSILON;

    #[test]
    fn baseline_metrics_match_a_direct_equal_weight_evaluation() {
        let config = SimulationConfig {
            max_iterations: 1,
            population_size: 2,
            seed: Some(5),
            ..SimulationConfig::default()
        };
        let run = SimulationRun::build_default(&config).unwrap();

        let evaluator = FitnessEvaluator::from_catalog(&REFERENCE_CATALOG).unwrap();
        let expected = evaluator.evaluate(&vec![0.1; 10]);
        assert_eq!(run.baseline.metrics, expected);
        let weight_sum: f64 = run.baseline.weights.iter().sum();
        assert!((weight_sum - 1.0).abs() < FLOAT_COMPARISON_EPSILON);
    }

    #[test]
    fn equity_curve_has_the_fixed_length_and_positive_values() {
        let config = SimulationConfig {
            max_iterations: 0,
            population_size: 1,
            seed: Some(11),
            ..SimulationConfig::default()
        };
        let run = SimulationRun::build_default(&config).unwrap();
        assert_eq!(run.baseline.equity_curve.len(), EQUITY_CURVE_DAYS);
        for (day, point) in run.baseline.equity_curve.iter().enumerate() {
            assert_eq!(point.day, day);
            assert!(point.value > 0.0);
        }
    }

    #[test]
    fn summary_reflects_the_final_generation_elite() {
        let config = SimulationConfig {
            max_iterations: 10,
            population_size: 8,
            seed: Some(21),
            ..SimulationConfig::default()
        };
        let run = SimulationRun::build_default(&config).unwrap();
        assert_eq!(run.summary.best_sharpe, run.best_plant().metrics.sharpe);
        assert!(run.summary.population_average_sharpe <= run.summary.best_sharpe);
        assert!(run.summary.best_volatility <= run.summary.population_average_volatility);
    }
}
