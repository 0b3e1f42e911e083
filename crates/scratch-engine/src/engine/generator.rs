use rand::Rng;
use tracing::{debug, warn};

use crate::{ConfigError, GameConfig, Grid, Position, SymbolWeights, weight_sum};

/// Fills a grid with symbols drawn from the configured probabilities.
///
/// For each cell, a first draw decides between a bonus symbol and a standard symbol
/// (see [`Probabilities::bonus_probability`](crate::Probabilities::bonus_probability)).
/// The symbol itself is then picked by a weighted draw over the bonus table, or over the
/// standard entry for the cell. Without any standard entries every standard symbol is
/// equally likely.
///
/// The random source is supplied by the caller; use a seeded [`RoundRng`](crate::RoundRng)
/// for reproducible grids.
///
/// The configuration is validated first (see [`GameConfig::validate`]), so every cell of a
/// returned grid holds a symbol defined in the symbol table.
pub fn generate<R>(config: &GameConfig, rng: &mut R) -> Result<Grid, ConfigError>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    let GameConfig { rows, columns, .. } = *config;

    let probabilities = &config.probabilities;
    let equal_weights: SymbolWeights = if probabilities.standard_symbols.is_empty() {
        let weights = config
            .standard_symbols()
            .map(|symbol| (symbol.to_owned(), 1))
            .collect::<SymbolWeights>();
        if weights.is_empty() {
            return Err(ConfigError::NoStandardSymbols);
        }
        warn!("no standard probabilities configured, standard symbols are equally likely");
        weights
    } else {
        SymbolWeights::new()
    };

    let bonus_probability = probabilities.bonus_probability();
    let mut cells = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for column in 0..columns {
            let pos = Position::new(row, column);
            let symbol = if rng.random::<f64>() < bonus_probability {
                pick(&probabilities.bonus_symbols.symbols, "bonus symbols", rng)?
            } else if let Some(entry) = probabilities.standard_for(pos) {
                let table = format!("cell {}", entry.position());
                pick(&entry.symbols, &table, rng)?
            } else {
                pick(&equal_weights, "standard symbols", rng)?
            };
            cells.push(symbol.to_owned());
        }
    }

    let grid = Grid::from_cells(rows, columns, cells);
    debug!(%grid, "generated grid");
    Ok(grid)
}

fn pick<'a, R>(
    weights: &'a SymbolWeights,
    table: &str,
    rng: &mut R,
) -> Result<&'a str, ConfigError>
where
    R: Rng + ?Sized,
{
    weighted_pick(weights, rng.random()).ok_or_else(|| ConfigError::EmptyWeights {
        table: table.to_owned(),
    })
}

/// Picks a symbol from a weight table using a uniform draw in `[0, 1)`.
///
/// Weights are normalized to probabilities and accumulated in identifier order; the
/// first symbol whose cumulative probability reaches the draw is returned. If rounding
/// leaves the final cumulative probability just below the draw, the last symbol with a
/// positive weight is returned.
///
/// Symbols with zero weight are skipped entirely: a draw of `0.0` never lands on a
/// leading zero-weight symbol, and a trailing zero-weight symbol is never the fallback.
///
/// Returns `None` if no symbol has a positive weight.
///
/// # Example
///
/// ```
/// use scratch_engine::{SymbolWeights, weighted_pick};
///
/// let weights: SymbolWeights = [("A".to_owned(), 1), ("B".to_owned(), 1)].into();
/// assert_eq!(weighted_pick(&weights, 0.0), Some("A"));
/// assert_eq!(weighted_pick(&weights, 0.5), Some("A"));
/// assert_eq!(weighted_pick(&weights, 0.999_999), Some("B"));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn weighted_pick(weights: &SymbolWeights, draw: f64) -> Option<&str> {
    let total = weight_sum(weights);
    if total == 0 {
        return None;
    }

    let mut cumulative = 0.0;
    let mut last = None;
    for (symbol, &weight) in weights.iter().filter(|(_, w)| **w > 0) {
        cumulative += f64::from(weight) / total as f64;
        if draw <= cumulative {
            return Some(symbol.as_str());
        }
        last = Some(symbol.as_str());
    }
    warn!(draw, cumulative, "draw beyond cumulative weights, picking last symbol");
    last
}

#[cfg(test)]
mod tests {
    use rand::{RngCore, SeedableRng as _};

    use crate::{RoundRng, RoundSeed};

    use super::*;

    /// Source that yields zero for every draw.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn weights(entries: &[(&str, u32)]) -> SymbolWeights {
        entries.iter().map(|&(s, w)| (s.to_owned(), w)).collect()
    }

    fn config(json: serde_json::Value) -> GameConfig {
        serde_json::from_value(json).unwrap()
    }

    fn sample_config() -> GameConfig {
        config(serde_json::json!({
            "rows": 4,
            "columns": 4,
            "symbols": {
                "A": { "type": "standard", "reward_multiplier": 5 },
                "B": { "type": "standard", "reward_multiplier": 3 },
                "C": { "type": "standard", "reward_multiplier": 2.5 },
                "10x": { "type": "bonus", "impact": "multiply_reward", "reward_multiplier": 10 },
                "MISS": { "type": "bonus", "impact": "miss" }
            },
            "probabilities": {
                "standard_symbols": [
                    { "row": 0, "column": 0, "symbols": { "A": 1, "B": 2, "C": 3 } },
                    { "row": 3, "column": 3, "symbols": { "C": 1 } }
                ],
                "bonus_symbols": { "symbols": { "10x": 1, "MISS": 1 } }
            }
        }))
    }

    mod weighted_pick {
        use super::*;

        #[test]
        fn test_boundaries_are_inclusive() {
            let weights = weights(&[("A", 1), ("B", 1)]);
            assert_eq!(weighted_pick(&weights, 0.0), Some("A"));
            assert_eq!(weighted_pick(&weights, 0.5), Some("A"));
            assert_eq!(weighted_pick(&weights, 0.500_001), Some("B"));
            assert_eq!(weighted_pick(&weights, 0.999_999), Some("B"));
        }

        #[test]
        fn test_rounding_falls_back_to_last_symbol() {
            let weights = weights(&[("A", 1), ("B", 1), ("C", 1)]);
            assert_eq!(weighted_pick(&weights, 1.5), Some("C"));
        }

        #[test]
        fn test_zero_weights_never_picked() {
            let weights = weights(&[("A", 0), ("B", 3), ("C", 0)]);
            assert_eq!(weighted_pick(&weights, 0.0), Some("B"));
            assert_eq!(weighted_pick(&weights, 1.5), Some("B"));

            let weights = super::weights(&[("A", 1), ("B", 0)]);
            assert_eq!(weighted_pick(&weights, 1.5), Some("A"));
        }

        #[test]
        fn test_no_positive_weight() {
            assert_eq!(weighted_pick(&SymbolWeights::new(), 0.3), None);
            assert_eq!(weighted_pick(&weights(&[("A", 0)]), 0.3), None);
        }
    }

    mod generate {
        use super::*;

        #[test]
        fn test_every_cell_is_a_known_symbol() {
            let config = sample_config();
            let mut rng = RoundRng::seed_from_u64(7);
            for _ in 0..50 {
                let grid = generate(&config, &mut rng).unwrap();
                assert_eq!((grid.rows(), grid.columns()), (4, 4));
                for (_, symbol) in grid.cells() {
                    assert!(config.symbols.contains_key(symbol), "unknown {symbol}");
                }
            }
        }

        #[test]
        fn test_cell_entry_applies_to_its_cell() {
            let config = sample_config();
            let mut rng = RoundRng::seed_from_u64(11);
            for _ in 0..50 {
                let grid = generate(&config, &mut rng).unwrap();
                let corner = grid.get(Position::new(3, 3)).unwrap();
                assert!(
                    ["C", "10x", "MISS"].contains(&corner),
                    "unexpected {corner} at 3:3"
                );
            }
        }

        #[test]
        fn test_same_seed_same_grid() {
            let config = sample_config();
            let seed: RoundSeed = rand::rng().random();
            let grid1 = generate(&config, &mut seed.into_rng()).unwrap();
            let grid2 = generate(&config, &mut seed.into_rng()).unwrap();
            assert_eq!(grid1, grid2);
        }

        #[test]
        fn test_zero_draws_pick_bonus_first_symbol() {
            let config = sample_config();
            let mut rng = ZeroRng;
            let grid = generate(&config, &mut rng).unwrap();
            assert!(grid.cells().all(|(_, symbol)| symbol == "10x"));
        }

        #[test]
        fn test_equal_probability_fallback() {
            let config = config(serde_json::json!({
                "rows": 2,
                "columns": 2,
                "symbols": {
                    "A": { "type": "standard", "reward_multiplier": 5 },
                    "B": { "type": "standard", "reward_multiplier": 3 },
                    "MISS": { "type": "bonus", "impact": "miss" }
                }
            }));
            let mut rng = RoundRng::seed_from_u64(3);
            let mut seen = std::collections::BTreeSet::new();
            for _ in 0..50 {
                let grid = generate(&config, &mut rng).unwrap();
                seen.extend(grid.cells().map(|(_, s)| s.to_owned()));
            }
            assert_eq!(seen.into_iter().collect::<Vec<_>>(), ["A", "B"]);
        }

        #[test]
        fn test_no_standard_symbols() {
            let config = config(serde_json::json!({
                "symbols": { "MISS": { "type": "bonus", "impact": "miss" } },
                "probabilities": { "bonus_symbols": { "symbols": { "MISS": 1 } } }
            }));
            let mut rng = RoundRng::seed_from_u64(0);
            assert_eq!(
                generate(&config, &mut rng).unwrap_err(),
                ConfigError::NoStandardSymbols
            );
        }

        #[test]
        fn test_unknown_probability_symbol() {
            let standard_config = config(serde_json::json!({
                "rows": 1,
                "columns": 3,
                "symbols": { "A": { "type": "standard", "reward_multiplier": 5 } },
                "probabilities": {
                    "standard_symbols": [{ "row": 0, "column": 0, "symbols": { "Z": 1 } }]
                }
            }));
            let mut rng = RoundRng::seed_from_u64(0);
            assert_eq!(
                generate(&standard_config, &mut rng).unwrap_err(),
                ConfigError::UnknownProbabilitySymbol {
                    table: "cell 0:0".to_owned(),
                    symbol: "Z".to_owned()
                }
            );

            let bonus_config = config(serde_json::json!({
                "rows": 1,
                "columns": 3,
                "symbols": { "A": { "type": "standard", "reward_multiplier": 5 } },
                "probabilities": { "bonus_symbols": { "symbols": { "10x": 1 } } }
            }));
            assert_eq!(
                generate(&bonus_config, &mut rng).unwrap_err(),
                ConfigError::UnknownProbabilitySymbol {
                    table: "bonus symbols".to_owned(),
                    symbol: "10x".to_owned()
                }
            );
        }

        #[test]
        fn test_zero_weight_entry() {
            let config = config(serde_json::json!({
                "rows": 1,
                "columns": 1,
                "symbols": { "A": { "type": "standard", "reward_multiplier": 5 } },
                "probabilities": {
                    "standard_symbols": [{ "row": 0, "column": 0, "symbols": { "A": 0 } }]
                }
            }));
            let mut rng = RoundRng::seed_from_u64(0);
            assert_eq!(
                generate(&config, &mut rng).unwrap_err(),
                ConfigError::EmptyWeights {
                    table: "cell 0:0".to_owned()
                }
            );
        }
    }
}
