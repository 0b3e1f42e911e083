use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Position;

/// Symbol weights keyed by symbol identifier.
///
/// Weights are relative: a symbol's draw probability is its weight divided by the sum
/// of all weights in the table.
pub type SymbolWeights = BTreeMap<String, u32>;

/// Probability tables used by the grid generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Probabilities {
    /// Standard symbol weights per cell.
    ///
    /// The first entry doubles as the default for cells without their own entry.
    #[serde(default)]
    pub standard_symbols: Vec<CellProbability>,
    /// Weights for placing bonus symbols.
    #[serde(default)]
    pub bonus_symbols: BonusProbability,
}

/// Standard symbol weights for a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CellProbability {
    pub row: usize,
    pub column: usize,
    pub symbols: SymbolWeights,
}

/// Bonus symbol weights, shared by every cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BonusProbability {
    #[serde(default)]
    pub symbols: SymbolWeights,
}

impl CellProbability {
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.column)
    }
}

impl Probabilities {
    /// Returns the grid-wide default standard entry, if any.
    #[must_use]
    pub fn default_standard(&self) -> Option<&CellProbability> {
        self.standard_symbols.first()
    }

    /// Returns the standard entry that applies to `pos`.
    ///
    /// An entry declared for `pos` wins over the default entry.
    #[must_use]
    pub fn standard_for(&self, pos: Position) -> Option<&CellProbability> {
        self.standard_symbols
            .iter()
            .find(|entry| entry.position() == pos)
            .or_else(|| self.default_standard())
    }

    /// Probability that a cell receives a bonus symbol instead of a standard one.
    ///
    /// Computed as `bonus_sum / (bonus_sum + default_standard_sum)`; zero when both sums
    /// are zero.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bonus_probability(&self) -> f64 {
        let bonus_sum = weight_sum(&self.bonus_symbols.symbols);
        let standard_sum = self
            .default_standard()
            .map_or(0, |entry| weight_sum(&entry.symbols));
        let total = bonus_sum + standard_sum;
        if total == 0 {
            return 0.0;
        }
        bonus_sum as f64 / total as f64
    }
}

/// Sums the weights of a table.
#[must_use]
pub fn weight_sum(weights: &SymbolWeights) -> u64 {
    weights.values().map(|&w| u64::from(w)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(row: usize, column: usize, weights: &[(&str, u32)]) -> CellProbability {
        CellProbability {
            row,
            column,
            symbols: weights.iter().map(|&(s, w)| (s.to_owned(), w)).collect(),
        }
    }

    #[test]
    fn test_cell_entry_overrides_default() {
        let probabilities = Probabilities {
            standard_symbols: vec![
                entry(0, 0, &[("A", 1)]),
                entry(1, 2, &[("B", 1)]),
            ],
            bonus_symbols: BonusProbability::default(),
        };

        let at = |row, column| {
            probabilities
                .standard_for(Position::new(row, column))
                .map(|e| e.position())
        };
        assert_eq!(at(1, 2), Some(Position::new(1, 2)));
        assert_eq!(at(2, 2), Some(Position::new(0, 0)));
        assert_eq!(at(0, 0), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_bonus_probability_uses_default_entry() {
        let probabilities = Probabilities {
            standard_symbols: vec![
                entry(0, 0, &[("A", 2), ("B", 4)]),
                entry(0, 1, &[("A", 100)]),
            ],
            bonus_symbols: BonusProbability {
                symbols: [("10x".to_owned(), 1), ("MISS".to_owned(), 1)].into(),
            },
        };
        assert!((probabilities.bonus_probability() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_bonus_probability_without_tables() {
        assert_eq!(Probabilities::default().bonus_probability(), 0.0);

        let only_bonus = Probabilities {
            standard_symbols: vec![],
            bonus_symbols: BonusProbability {
                symbols: [("+500".to_owned(), 3)].into(),
            },
        };
        assert_eq!(only_bonus.bonus_probability(), 1.0);
    }
}
