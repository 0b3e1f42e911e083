use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BonusImpact, ConfigError, GameConfig, Grid, Position, SymbolKind, WinCombination};

/// Outcome of evaluating a grid against the winning-combination rules.
///
/// # Example
///
/// ```
/// use scratch_engine::{GameConfig, Grid};
///
/// let config: GameConfig = serde_json::from_str(r#"{
///     "symbols": {
///         "A": { "type": "standard", "reward_multiplier": 5 },
///         "B": { "type": "standard", "reward_multiplier": 3 },
///         "10x": { "type": "bonus", "impact": "multiply_reward", "reward_multiplier": 10 }
///     },
///     "win_combinations": {
///         "same_symbol_3_times": {
///             "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same_symbols"
///         }
///     }
/// }"#).unwrap();
///
/// let grid = Grid::from_rows([["A", "B", "A"], ["B", "10x", "B"], ["A", "B", "A"]]).unwrap();
/// let result = scratch_engine::evaluate(&config, &grid, 100.0).unwrap();
///
/// // A: 100 * 5 * 1, B: 100 * 3 * 1, then the 10x bonus
/// assert_eq!(result.reward(), 8000.0);
/// assert_eq!(result.applied_bonus_symbol(), Some("10x"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RewardResult {
    reward: f64,
    applied_winning_combinations: BTreeMap<String, Vec<String>>,
    applied_bonus_symbol: Option<String>,
}

impl RewardResult {
    /// Total reward for the round, including the bonus effect.
    #[must_use]
    pub const fn reward(&self) -> f64 {
        self.reward
    }

    /// Returns `true` if the round paid out anything.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.reward > 0.0
    }

    /// Winning combinations applied to each symbol, in application order.
    ///
    /// Symbols without any applied combination are absent.
    #[must_use]
    pub const fn applied_winning_combinations(&self) -> &BTreeMap<String, Vec<String>> {
        &self.applied_winning_combinations
    }

    /// Bonus symbol applied to the total, if the round won and the grid had one.
    #[must_use]
    pub fn applied_bonus_symbol(&self) -> Option<&str> {
        self.applied_bonus_symbol.as_deref()
    }
}

/// Computes the reward for `grid` and a bet of `bet_amount`.
///
/// Each standard symbol on the grid is resolved independently:
///
/// 1. The best satisfied count rule (highest multiplier, first in identifier order on
///    ties) is applied.
/// 2. Every pattern rule whose covered area the symbol fills is offered. A rule claims
///    its group if the group is free, or replaces the rule holding the group if its
///    multiplier is strictly higher.
///
/// A symbol with at least one applied rule pays
/// `bet_amount * symbol multiplier * product of applied rule multipliers`.
///
/// If the summed reward is positive, the first bonus symbol in row-major order is
/// applied and recorded, even when its impact is a miss.
///
/// Fails if a cell holds a symbol missing from the symbol table.
pub fn evaluate(
    config: &GameConfig,
    grid: &Grid,
    bet_amount: f64,
) -> Result<RewardResult, ConfigError> {
    let counts = count_standard_symbols(config, grid)?;

    let mut reward = 0.0;
    let mut applied_winning_combinations = BTreeMap::new();
    for (symbol, (symbol_multiplier, count)) in counts {
        let applied = resolve_combinations(config, grid, symbol, count);
        if applied.is_empty() {
            continue;
        }
        let symbol_reward = bet_amount * symbol_multiplier * applied.multiplier();
        debug!(
            symbol,
            count,
            combinations = ?applied.order,
            symbol_reward,
            "symbol won"
        );
        reward += symbol_reward;
        applied_winning_combinations.insert(symbol.to_owned(), applied.into_ids());
    }

    let mut applied_bonus_symbol = None;
    if reward > 0.0
        && let Some((pos, symbol, impact)) = first_bonus(config, grid)
    {
        let boosted = impact.apply(reward);
        debug!(%pos, symbol, ?impact, reward, boosted, "bonus applied");
        reward = boosted;
        applied_bonus_symbol = Some(symbol.to_owned());
    }

    Ok(RewardResult {
        reward,
        applied_winning_combinations,
        applied_bonus_symbol,
    })
}

/// Counts standard symbols on the grid, paired with their reward multiplier.
fn count_standard_symbols<'a>(
    config: &GameConfig,
    grid: &'a Grid,
) -> Result<BTreeMap<&'a str, (f64, usize)>, ConfigError> {
    let mut counts = BTreeMap::new();
    for (_, symbol) in grid.cells() {
        if let SymbolKind::Standard { reward_multiplier } = config.symbol(symbol)? {
            counts.entry(symbol).or_insert((*reward_multiplier, 0)).1 += 1;
        }
    }
    Ok(counts)
}

fn first_bonus<'a>(
    config: &GameConfig,
    grid: &'a Grid,
) -> Option<(Position, &'a str, BonusImpact)> {
    grid.cells().find_map(|(pos, symbol)| {
        let impact = config.symbols.get(symbol)?.bonus_impact()?;
        Some((pos, symbol, impact))
    })
}

/// Combinations applied to one symbol, with the group each one holds.
#[derive(Debug)]
struct AppliedCombinations<'a> {
    claims: BTreeMap<&'a str, (&'a str, &'a WinCombination)>,
    order: Vec<&'a str>,
}

impl<'a> AppliedCombinations<'a> {
    fn new() -> Self {
        Self {
            claims: BTreeMap::new(),
            order: vec![],
        }
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn multiplier(&self) -> f64 {
        self.claims
            .values()
            .map(|(_, comb)| comb.reward_multiplier)
            .product()
    }

    fn apply(&mut self, id: &'a str, comb: &'a WinCombination) {
        self.claims.insert(&comb.group, (id, comb));
        self.order.push(id);
    }

    /// Offers a matched pattern rule for its group.
    fn offer(&mut self, id: &'a str, comb: &'a WinCombination) {
        let Some(&(holder_id, holder)) = self.claims.get(comb.group.as_str()) else {
            self.apply(id, comb);
            return;
        };
        if holder_id == id || comb.reward_multiplier <= holder.reward_multiplier {
            return;
        }
        self.order.retain(|&applied| applied != holder_id);
        self.apply(id, comb);
    }

    fn into_ids(self) -> Vec<String> {
        self.order.into_iter().map(str::to_owned).collect()
    }
}

fn resolve_combinations<'a>(
    config: &'a GameConfig,
    grid: &Grid,
    symbol: &str,
    count: usize,
) -> AppliedCombinations<'a> {
    let mut applied = AppliedCombinations::new();

    let best_count_rule = config
        .win_combinations
        .iter()
        .filter(|(_, comb)| comb.min_count().is_some_and(|min| count >= min))
        .fold(None, |best: Option<(&String, &WinCombination)>, (id, comb)| {
            let best_multiplier = best.map_or(0.0, |(_, b)| b.reward_multiplier);
            if comb.reward_multiplier > best_multiplier {
                Some((id, comb))
            } else {
                best
            }
        });
    if let Some((id, comb)) = best_count_rule {
        applied.apply(id, comb);
    }

    for (id, comb) in &config.win_combinations {
        let Some(covered_areas) = comb.covered_areas() else {
            continue;
        };
        for area in covered_areas {
            if fills_area(grid, symbol, area) {
                applied.offer(id, comb);
            }
        }
    }

    applied
}

/// Returns `true` if every position of a non-empty area holds `symbol`.
///
/// `symbol` is always a standard symbol, so a match also implies every cell in the
/// area is standard.
fn fills_area(grid: &Grid, symbol: &str, area: &[Position]) -> bool {
    !area.is_empty() && area.iter().all(|&pos| grid.get(pos) == Some(symbol))
}
