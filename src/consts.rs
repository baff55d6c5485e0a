//! Fixed numeric constants of the optimization rules.

/// Tolerance for float comparisons across the crate.
pub const FLOAT_COMPARISON_EPSILON: f64 = 1e-9;

/// Annualized risk-free rate used in the Sharpe ratio.
pub const RISK_FREE_RATE: f64 = 0.02;

/// Spread the dispersal schedule has decayed to by the final generation.
pub const FINAL_SIGMA: f64 = 0.001;

/// Exponent of the non-linear sigma decay.
pub const MODULATION_INDEX: i32 = 3;

/// Lower bound on portfolio volatility after the diversification reduction.
pub const VOLATILITY_FLOOR: f64 = 0.05;

/// Return bonus per unit of (1 - concentration).
pub const DIVERSIFICATION_BONUS_RATE: f64 = 0.05;

/// Volatility reduction per unit of (1 - concentration).
pub const VOLATILITY_REDUCTION_RATE: f64 = 0.10;

/// Max drawdown is approximated as this multiple of final volatility.
pub const DRAWDOWN_MULTIPLIER: f64 = -1.5;

/// Scale applied to dispersal noise on top of sigma.
pub const NOISE_AMPLIFICATION: f64 = 4.0;

/// Length of the illustrative baseline equity path.
pub const EQUITY_CURVE_DAYS: usize = 100;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
