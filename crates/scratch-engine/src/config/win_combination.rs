use serde::{Deserialize, Serialize};

use crate::Position;

/// A named rule that multiplies a symbol's reward when satisfied.
///
/// Rules sharing a `group` are mutually exclusive: at most one rule per group applies
/// to a given symbol.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawWinCombination", into = "RawWinCombination")]
pub struct WinCombination {
    pub reward_multiplier: f64,
    pub group: String,
    pub trigger: WinTrigger,
}

/// Condition under which a [`WinCombination`] is satisfied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum WinTrigger {
    /// The symbol appears at least `count` times anywhere on the grid.
    SameSymbolCount { count: usize },
    /// The symbol fills every position of at least one covered area.
    LinearPattern { covered_areas: Vec<Vec<Position>> },
}

impl WinCombination {
    /// Returns the minimum count of a count-triggered rule.
    #[must_use]
    pub fn min_count(&self) -> Option<usize> {
        match &self.trigger {
            WinTrigger::SameSymbolCount { count } => Some(*count),
            WinTrigger::LinearPattern { .. } => None,
        }
    }

    /// Returns the covered areas of a pattern-triggered rule.
    #[must_use]
    pub fn covered_areas(&self) -> Option<&[Vec<Position>]> {
        match &self.trigger {
            WinTrigger::SameSymbolCount { .. } => None,
            WinTrigger::LinearPattern { covered_areas } => Some(covered_areas),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum RawTrigger {
    #[serde(alias = "same_symbol_count")]
    SameSymbols,
    #[serde(alias = "linear_pattern")]
    LinearSymbols,
}

/// On-disk rule layout: a flat object discriminated by `when`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RawWinCombination {
    reward_multiplier: f64,
    when: RawTrigger,
    group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    covered_areas: Option<Vec<Vec<Position>>>,
}

impl TryFrom<RawWinCombination> for WinCombination {
    type Error = String;

    fn try_from(raw: RawWinCombination) -> Result<Self, Self::Error> {
        let trigger = match raw.when {
            RawTrigger::SameSymbols => WinTrigger::SameSymbolCount {
                count: raw.count.ok_or("'same_symbols' rule requires 'count'")?,
            },
            RawTrigger::LinearSymbols => WinTrigger::LinearPattern {
                covered_areas: raw
                    .covered_areas
                    .ok_or("'linear_symbols' rule requires 'covered_areas'")?,
            },
        };
        Ok(Self {
            reward_multiplier: raw.reward_multiplier,
            group: raw.group,
            trigger,
        })
    }
}

impl From<WinCombination> for RawWinCombination {
    fn from(comb: WinCombination) -> Self {
        let (when, count, covered_areas) = match comb.trigger {
            WinTrigger::SameSymbolCount { count } => (RawTrigger::SameSymbols, Some(count), None),
            WinTrigger::LinearPattern { covered_areas } => {
                (RawTrigger::LinearSymbols, None, Some(covered_areas))
            }
        };
        Self {
            reward_multiplier: comb.reward_multiplier,
            when,
            group: comb.group,
            count,
            covered_areas,
        }
    }
}
