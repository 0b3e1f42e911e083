use std::collections::BTreeMap;

use scratch_engine::{Grid, Round, RoundSeed};
use scratch_stats::payout::PayoutSummary;
use serde::Serialize;

/// JSON report for a single round.
///
/// The applied combinations and bonus are only written for winning rounds. A winning
/// round without a bonus symbol on the grid reports the bonus as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub matrix: Grid,
    pub reward: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_winning_combinations: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_bonus_symbol: Option<Option<String>>,
}

impl From<Round> for RoundReport {
    fn from(round: Round) -> Self {
        let Round { grid, result } = round;
        let won = result.is_win();
        Self {
            matrix: grid,
            reward: result.reward(),
            applied_winning_combinations: won
                .then(|| result.applied_winning_combinations().clone()),
            applied_bonus_symbol: won
                .then(|| result.applied_bonus_symbol().map(str::to_owned)),
        }
    }
}

/// JSON report for a multi-round run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: RoundSeed,
    pub betting_amount: f64,
    #[serde(flatten)]
    pub summary: PayoutSummary,
}
