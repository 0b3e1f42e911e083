//! Game configuration: symbols, probability tables and winning combinations.
//!
//! The configuration is loaded once per run and never mutated. All tables are keyed by
//! identifier in ordered maps, so every enumeration over symbols or rules (weighted
//! draws, tie-breaks between equal rules, output ordering) follows identifier order.
//!
//! The JSON layout matches the game's configuration files:
//!
//! ```
//! use scratch_engine::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{
//!     "columns": 3,
//!     "rows": 3,
//!     "symbols": {
//!         "A": { "type": "standard", "reward_multiplier": 5 },
//!         "10x": { "type": "bonus", "impact": "multiply_reward", "reward_multiplier": 10 },
//!         "MISS": { "type": "bonus", "impact": "miss" }
//!     },
//!     "probabilities": {
//!         "standard_symbols": [{ "row": 0, "column": 0, "symbols": { "A": 1 } }],
//!         "bonus_symbols": { "symbols": { "10x": 1, "MISS": 2 } }
//!     },
//!     "win_combinations": {
//!         "same_symbols_horizontally": {
//!             "reward_multiplier": 2,
//!             "when": "linear_symbols",
//!             "group": "horizontally_linear_symbols",
//!             "covered_areas": [["0:0", "0:1", "0:2"]]
//!         }
//!     }
//! }"#).unwrap();
//!
//! config.validate().unwrap();
//! assert_eq!(config.standard_symbols().collect::<Vec<_>>(), ["A"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use self::{probability::*, symbol::*, win_combination::*};

use crate::ConfigError;

mod probability;
mod symbol;
mod win_combination;

const DEFAULT_ROWS: usize = 3;
const DEFAULT_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_columns")]
    pub columns: usize,
    pub symbols: BTreeMap<String, SymbolKind>,
    #[serde(default)]
    pub probabilities: Probabilities,
    #[serde(default)]
    pub win_combinations: BTreeMap<String, WinCombination>,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

impl GameConfig {
    /// Looks up a symbol definition.
    pub fn symbol(&self, id: &str) -> Result<&SymbolKind, ConfigError> {
        self.symbols
            .get(id)
            .ok_or_else(|| ConfigError::UnknownSymbol {
                symbol: id.to_owned(),
            })
    }

    /// Iterates over the identifiers of all standard symbols, in identifier order.
    pub fn standard_symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols
            .iter()
            .filter(|(_, kind)| kind.is_standard())
            .map(|(id, _)| id.as_str())
    }

    /// Checks the configuration for inconsistencies that would break a round.
    ///
    /// Covered areas are not checked against the grid size: positions outside the grid
    /// simply never match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        for entry in &self.probabilities.standard_symbols {
            let table = format!("cell {}", entry.position());
            self.check_weights(&table, &entry.symbols, SymbolKind::is_standard, "standard")?;
            if weight_sum(&entry.symbols) == 0 {
                return Err(ConfigError::EmptyWeights { table });
            }
        }

        self.check_weights(
            "bonus symbols",
            &self.probabilities.bonus_symbols.symbols,
            SymbolKind::is_bonus,
            "bonus",
        )?;

        Ok(())
    }

    fn check_weights(
        &self,
        table: &str,
        weights: &SymbolWeights,
        has_kind: fn(&SymbolKind) -> bool,
        expected: &'static str,
    ) -> Result<(), ConfigError> {
        for symbol in weights.keys() {
            let kind =
                self.symbols
                    .get(symbol)
                    .ok_or_else(|| ConfigError::UnknownProbabilitySymbol {
                        table: table.to_owned(),
                        symbol: symbol.clone(),
                    })?;
            if !has_kind(kind) {
                return Err(ConfigError::WrongSymbolKind {
                    table: table.to_owned(),
                    symbol: symbol.clone(),
                    expected,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: serde_json::Value) -> GameConfig {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config(serde_json::json!({
            "symbols": { "A": { "type": "standard", "reward_multiplier": 1 } }
        }));
        assert_eq!(config.rows, 3);
        assert_eq!(config.columns, 3);
        assert!(config.probabilities.standard_symbols.is_empty());
        assert!(config.probabilities.bonus_symbols.symbols.is_empty());
        assert!(config.win_combinations.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_symbol_lookup() {
        let config = config(serde_json::json!({
            "symbols": {
                "B": { "type": "standard", "reward_multiplier": 3 },
                "+500": { "type": "bonus", "impact": "extra_bonus", "extra": 500 },
                "A": { "type": "standard", "reward_multiplier": 5 }
            }
        }));
        assert_eq!(config.symbol("A").unwrap().reward_multiplier(), Some(5.0));
        assert_eq!(
            config.symbol("Z").unwrap_err(),
            ConfigError::UnknownSymbol {
                symbol: "Z".to_owned()
            }
        );
        assert_eq!(config.standard_symbols().collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn test_validate_dimensions() {
        let config = config(serde_json::json!({
            "rows": 0,
            "symbols": {}
        }));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidDimensions {
                rows: 0,
                columns: 3
            }
        );
    }

    #[test]
    fn test_validate_probability_symbols() {
        let config = config(serde_json::json!({
            "symbols": {
                "A": { "type": "standard", "reward_multiplier": 5 },
                "MISS": { "type": "bonus", "impact": "miss" }
            },
            "probabilities": {
                "standard_symbols": [{ "row": 0, "column": 0, "symbols": { "A": 1, "X": 1 } }]
            }
        }));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnknownProbabilitySymbol {
                table: "cell 0:0".to_owned(),
                symbol: "X".to_owned()
            }
        );

        let config = GameConfig {
            probabilities: Probabilities {
                standard_symbols: vec![],
                bonus_symbols: BonusProbability {
                    symbols: [("A".to_owned(), 1)].into(),
                },
            },
            ..config
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::WrongSymbolKind {
                table: "bonus symbols".to_owned(),
                symbol: "A".to_owned(),
                expected: "bonus"
            }
        );
        assert_eq!(
            err.to_string(),
            "symbol 'A' in probability table for bonus symbols must be a bonus symbol"
        );
    }

    #[test]
    fn test_validate_zero_weights() {
        let config = config(serde_json::json!({
            "symbols": { "A": { "type": "standard", "reward_multiplier": 5 } },
            "probabilities": {
                "standard_symbols": [{ "row": 1, "column": 2, "symbols": { "A": 0 } }]
            }
        }));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::EmptyWeights {
                table: "cell 1:2".to_owned()
            }
        );
    }
}
