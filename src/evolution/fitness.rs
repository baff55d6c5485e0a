//! Rule-based fitness evaluation of candidate weight vectors.

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;
use crate::consts::{
    DIVERSIFICATION_BONUS_RATE, DRAWDOWN_MULTIPLIER, RISK_FREE_RATE, VOLATILITY_FLOOR,
    VOLATILITY_REDUCTION_RATE,
};
use crate::evolution::SimulationError;
use crate::portfolio::PortfolioMetrics;

/// Scores weight vectors against the catalog's fixed class profiles.
///
/// This is a deterministic approximation, not a historical backtest: expected
/// return and risk come from the per-asset class table, adjusted by a
/// Herfindahl concentration penalty. Pure and total over all valid weight
/// vectors; the volatility floor keeps the Sharpe denominator positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessEvaluator {
    expected_returns: Vec<f64>,
    risk_scores: Vec<f64>,
}

impl FitnessEvaluator {
    /// Builds the per-asset profile table from a catalog.
    pub fn from_catalog(catalog: &AssetCatalog) -> Result<Self, SimulationError> {
        if catalog.is_empty() {
            return Err(SimulationError::EmptyCatalog);
        }
        Ok(Self {
            expected_returns: catalog
                .assets()
                .iter()
                .map(|asset| asset.class.expected_return())
                .collect(),
            risk_scores: catalog
                .assets()
                .iter()
                .map(|asset| asset.class.risk_score())
                .collect(),
        })
    }

    pub fn asset_count(&self) -> usize {
        self.expected_returns.len()
    }

    pub fn evaluate(&self, weights: &[f64]) -> PortfolioMetrics {
        let mut raw_return = 0.0;
        let mut raw_risk = 0.0;
        for (weight, expected_return, risk_score) in
            izip!(weights, &self.expected_returns, &self.risk_scores)
        {
            raw_return += weight * expected_return;
            raw_risk += weight * risk_score;
        }

        // Herfindahl index: 1/n for equal weights, 1.0 for a single asset.
        let concentration: f64 = weights.iter().map(|weight| weight * weight).sum();
        let diversification_bonus = (1.0 - concentration) * DIVERSIFICATION_BONUS_RATE;
        let volatility_reduction = (1.0 - concentration) * VOLATILITY_REDUCTION_RATE;

        let annual_return = raw_return + diversification_bonus;
        let volatility = (raw_risk - volatility_reduction).max(VOLATILITY_FLOOR);

        PortfolioMetrics {
            annual_return,
            volatility,
            sharpe: (annual_return - RISK_FREE_RATE) / volatility,
            max_drawdown: DRAWDOWN_MULTIPLIER * volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::REFERENCE_CATALOG;
    use crate::consts::FLOAT_COMPARISON_EPSILON;

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::from_catalog(&REFERENCE_CATALOG).unwrap()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = FitnessEvaluator::from_catalog(&AssetCatalog::new(vec![]));
        assert!(matches!(err, Err(SimulationError::EmptyCatalog)));
    }

    #[test]
    fn evaluation_is_pure() {
        let weights = vec![0.3, 0.1, 0.05, 0.05, 0.1, 0.1, 0.05, 0.05, 0.1, 0.1];
        assert_eq!(evaluator().evaluate(&weights), evaluator().evaluate(&weights));
    }

    #[test]
    fn single_asset_portfolio_gets_no_diversification_adjustment() {
        let mut weights = vec![0.0; 10];
        weights[0] = 1.0;
        let metrics = evaluator().evaluate(&weights);

        // Concentration is 1.0, so return and volatility are the raw class
        // profile of asset 0 (AggressiveGrowth).
        assert!((metrics.annual_return - 0.25).abs() < FLOAT_COMPARISON_EPSILON);
        assert!((metrics.volatility - 0.30).abs() < FLOAT_COMPARISON_EPSILON);
        assert!((metrics.max_drawdown + 1.5 * 0.30).abs() < FLOAT_COMPARISON_EPSILON);
    }

    #[test]
    fn equal_weights_match_the_hand_computed_formula() {
        let weights = vec![0.1; 10];
        let metrics = evaluator().evaluate(&weights);

        // Raw profile of the reference catalog at equal weights.
        let raw_return = (4.0 * 0.25 + 2.0 * 0.15 + 2.0 * 0.10 + 2.0 * 0.05) / 10.0;
        let raw_risk: f64 = (4.0 * 0.30 + 2.0 * 0.20 + 2.0 * 0.15 + 2.0 * 0.10) / 10.0;
        let concentration = 0.1;
        let expected_return = raw_return + (1.0 - concentration) * 0.05;
        let expected_volatility = (raw_risk - (1.0 - concentration) * 0.10).max(0.05);

        assert!((metrics.annual_return - expected_return).abs() < FLOAT_COMPARISON_EPSILON);
        assert!((metrics.volatility - expected_volatility).abs() < FLOAT_COMPARISON_EPSILON);
        let expected_sharpe = (expected_return - 0.02) / expected_volatility;
        assert!((metrics.sharpe - expected_sharpe).abs() < FLOAT_COMPARISON_EPSILON);
    }

    #[test]
    fn volatility_is_floored_for_low_risk_portfolios() {
        // All weight on the two defensive assets, heavily diversified between
        // them: raw risk 0.10 minus a 0.05 reduction sits at the floor.
        let mut weights = vec![0.0; 10];
        weights[8] = 0.5;
        weights[9] = 0.5;
        let metrics = evaluator().evaluate(&weights);
        assert!(metrics.volatility >= 0.05);
    }
}
