use std::path::PathBuf;

use scratch_engine::{GameConfig, RoundSeed};

use crate::{model::report::RoundReport, util::Output};

pub(crate) fn run(
    config: &GameConfig,
    seed: RoundSeed,
    betting_amount: f64,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut rng = seed.into_rng();
    let round = scratch_engine::play_round(config, &mut rng, betting_amount)?;
    Output::save_json(&RoundReport::from(round), output)
}
