//! Rules engine for a single round of a scratch-card game.
//!
//! A round has two phases:
//!
//! 1. **Generation** ([`generate`]) - fills a [`Grid`] with symbols drawn from the
//!    probability tables of a [`GameConfig`].
//! 2. **Evaluation** ([`evaluate`]) - applies the winning-combination rules and the
//!    first bonus symbol on the grid to a bet, producing a [`RewardResult`].
//!
//! The evaluator only looks at the grid and the configuration, so grids built by hand
//! (for example in tests) are evaluated exactly like generated ones.
//!
//! # Example
//!
//! ```
//! use scratch_engine::{GameConfig, RoundSeed};
//!
//! let config: GameConfig = serde_json::from_str(r#"{
//!     "rows": 1,
//!     "columns": 3,
//!     "symbols": { "A": { "type": "standard", "reward_multiplier": 2 } },
//!     "win_combinations": {
//!         "same_symbol_3_times": {
//!             "when": "same_symbols", "count": 3, "group": "same_symbols", "reward_multiplier": 1
//!         }
//!     }
//! }"#).unwrap();
//!
//! let mut rng = RoundSeed::default().into_rng();
//! let grid = scratch_engine::generate(&config, &mut rng).unwrap();
//! assert_eq!(grid.to_string(), "A A A");
//!
//! let result = scratch_engine::evaluate(&config, &grid, 10.0).unwrap();
//! assert_eq!(result.reward(), 20.0);
//! ```

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

/// Error raised when the configuration cannot support a round.
///
/// Every variant is terminal for the round being played: no partial grid or reward is
/// produced once one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid must have at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[display("symbol '{symbol}' is not defined in the symbol table")]
    UnknownSymbol { symbol: String },
    #[display("no standard symbols are defined and no standard probabilities are configured")]
    NoStandardSymbols,
    #[display("probability table for {table} has no positive weight")]
    EmptyWeights { table: String },
    #[display("probability table for {table} references unknown symbol '{symbol}'")]
    UnknownProbabilitySymbol { table: String, symbol: String },
    #[display("symbol '{symbol}' in probability table for {table} must be a {expected} symbol")]
    WrongSymbolKind {
        table: String,
        symbol: String,
        expected: &'static str,
    },
}
