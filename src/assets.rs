//! Reference asset data: the ordered catalog every weight vector indexes into,
//! and the risk/return class each asset belongs to.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Risk/return bucket an asset is assigned to.
///
/// Each class carries a fixed expected-return and risk-score contribution per
/// unit of weight, which is all the fitness evaluator knows about an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    AggressiveGrowth,
    Cyclical,
    Defensive,
    Balanced,
}

impl AssetClass {
    /// Expected annual return contributed per unit of weight.
    pub fn expected_return(self) -> f64 {
        match self {
            AssetClass::AggressiveGrowth => 0.25,
            AssetClass::Cyclical => 0.15,
            AssetClass::Defensive => 0.05,
            AssetClass::Balanced => 0.10,
        }
    }

    /// Risk score contributed per unit of weight.
    pub fn risk_score(self) -> f64 {
        match self {
            AssetClass::AggressiveGrowth => 0.30,
            AssetClass::Cyclical => 0.20,
            AssetClass::Defensive => 0.10,
            AssetClass::Balanced => 0.15,
        }
    }
}

/// One entry of the asset catalog. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    /// Display color for the presentation layer; opaque to the engine.
    pub color: String,
    pub class: AssetClass,
}

/// Ordered, fixed-length asset list. Position in the catalog is the position
/// in every weight vector of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

impl AssetCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }
}

fn asset(ticker: &str, name: &str, sector: &str, color: &str, class: AssetClass) -> Asset {
    Asset {
        ticker: ticker.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        color: color.to_string(),
        class,
    }
}

/// The bundled ten-asset reference catalog.
pub static REFERENCE_CATALOG: Lazy<AssetCatalog> = Lazy::new(|| {
    use AssetClass::*;
    AssetCatalog::new(vec![
        asset("AAPL", "Apple Inc.", "Tech", "#60a5fa", AggressiveGrowth),
        asset("MSFT", "Microsoft Corp.", "Tech", "#3b82f6", AggressiveGrowth),
        asset("GOOGL", "Alphabet Inc.", "Tech", "#2563eb", AggressiveGrowth),
        asset("AMZN", "Amazon.com Inc.", "Consumer", "#f59e0b", Cyclical),
        asset("TSLA", "Tesla Inc.", "Consumer", "#ef4444", Cyclical),
        asset("NVDA", "Nvidia Corp.", "Tech", "#10b981", AggressiveGrowth),
        asset("JPM", "JPMorgan Chase", "Finance", "#8b5cf6", Balanced),
        asset("JNJ", "Johnson & Johnson", "Health", "#ec4899", Balanced),
        asset("XOM", "Exxon Mobil", "Energy", "#6366f1", Defensive),
        asset("GLD", "SPDR Gold Shares", "Commodity", "#fbbf24", Defensive),
    ])
});
