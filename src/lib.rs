//! Invasive weed optimization applied to long-only portfolio-weight
//! selection, producing a fully replayable generation-by-generation history.
//!
//! The entry point is [`SimulationRun::build`] (or
//! [`SimulationRun::build_default`] for the bundled reference catalog):
//!
//! ```
//! use knotweed::{SimulationConfig, SimulationRun};
//!
//! let config = SimulationConfig {
//!     max_iterations: 20,
//!     population_size: 15,
//!     seed: Some(42),
//!     ..SimulationConfig::default()
//! };
//! let run = SimulationRun::build_default(&config).unwrap();
//! assert_eq!(run.history.len(), 21);
//! println!("best sharpe: {}", run.best_plant().metrics.sharpe);
//! ```

pub mod assets;
pub mod consts;
pub mod evolution;
pub mod portfolio;
pub mod sampling;
pub mod simulation;

pub use assets::{Asset, AssetCatalog, AssetClass, REFERENCE_CATALOG};
pub use evolution::fitness::FitnessEvaluator;
pub use evolution::schedule::dispersal_sigma;
pub use evolution::{evolve, GenerationSnapshot, SimulationConfig, SimulationError};
pub use portfolio::{Plant, PortfolioMetrics};
pub use sampling::{DispersalPolicy, NoiseSource};
pub use simulation::{Baseline, CostPoint, RunSummary, SimulationRun, TimeSeriesPoint};
