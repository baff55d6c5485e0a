use serde::{Deserialize, Serialize};

/// Metrics derived from a weight vector by the fitness evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub annual_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
}

/// One candidate portfolio (weed) within a generation.
///
/// Created once per population slot and immutable thereafter. Fitness follows
/// the minimization convention: `fitness = -sharpe`, lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// `"gen{iteration}-p{slot}"`, which encodes replay provenance.
    pub id: String,
    pub weights: Vec<f64>,
    pub metrics: PortfolioMetrics,
    pub fitness: f64,
}

impl Plant {
    pub fn new(iteration: usize, slot: usize, weights: Vec<f64>, metrics: PortfolioMetrics) -> Self {
        Plant {
            id: format!("gen{iteration}-p{slot}"),
            weights,
            metrics,
            fitness: -metrics.sharpe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitness_is_negated_sharpe() {
        let metrics = PortfolioMetrics {
            annual_return: 0.2,
            volatility: 0.1,
            sharpe: 1.8,
            max_drawdown: -0.15,
        };
        let plant = Plant::new(3, 7, vec![0.5, 0.5], metrics);
        assert_eq!(plant.id, "gen3-p7");
        assert_eq!(plant.fitness, -1.8);
    }
}
