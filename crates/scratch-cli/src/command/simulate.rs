use std::path::PathBuf;

use anyhow::Context as _;
use scratch_engine::{GameConfig, RewardResult, RoundSeed};
use scratch_stats::payout::{PayoutSummary, RoundPayout};
use tracing::info;

use crate::{model::report::SimulationReport, util::Output};

pub(crate) fn run(
    config: &GameConfig,
    seed: RoundSeed,
    betting_amount: f64,
    rounds: u64,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut rng = seed.into_rng();
    let results = (0..rounds)
        .map(|_| {
            scratch_engine::play_round(config, &mut rng, betting_amount).map(|round| round.result)
        })
        .collect::<Result<Vec<RewardResult>, _>>()?;

    let summary = PayoutSummary::new(results.iter().map(|result| RoundPayout {
        bet: betting_amount,
        reward: result.reward(),
        bonus: result.applied_bonus_symbol(),
    }))
    .context("No rounds were played")?;
    info!(
        rounds = summary.rounds,
        hit_rate = summary.hit_rate,
        rtp = summary.rtp,
        "simulation finished"
    );

    Output::save_json(
        &SimulationReport {
            seed,
            betting_amount,
            summary,
        },
        output,
    )
}
