use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ConfigError, GameConfig, Grid, RewardResult, evaluate, generate};

/// A played round: the generated grid and its evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Round {
    pub grid: Grid,
    pub result: RewardResult,
}

/// Generates a grid and evaluates it for `bet_amount`.
///
/// `config` is only read, so the same configuration can drive any number of sequential
/// rounds from one random source.
pub fn play_round<R>(
    config: &GameConfig,
    rng: &mut R,
    bet_amount: f64,
) -> Result<Round, ConfigError>
where
    R: Rng + ?Sized,
{
    let grid = generate(config, rng)?;
    let result = evaluate(config, &grid, bet_amount)?;
    info!(
        bet_amount,
        reward = result.reward(),
        bonus = result.applied_bonus_symbol(),
        "round played"
    );
    Ok(Round { grid, result })
}
