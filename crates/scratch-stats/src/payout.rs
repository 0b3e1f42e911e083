use std::collections::BTreeMap;

use serde::Serialize;

use crate::descriptive::DescriptiveStats;

/// Bet and outcome of one played round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundPayout<'a> {
    pub bet: f64,
    pub reward: f64,
    /// Bonus symbol applied to the reward, if any.
    pub bonus: Option<&'a str>,
}

/// Aggregate payout figures for a batch of rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutSummary {
    pub rounds: usize,
    /// Rounds with a positive reward.
    pub wins: usize,
    /// `wins / rounds`.
    pub hit_rate: f64,
    pub wagered: f64,
    pub paid: f64,
    /// Return to player, `paid / wagered`. Zero when nothing was wagered.
    pub rtp: f64,
    /// Per-round reward distribution.
    pub reward: DescriptiveStats,
    /// How often each bonus symbol was applied, by identifier.
    pub bonus_counts: BTreeMap<String, usize>,
}

impl PayoutSummary {
    /// Summarizes a batch of rounds.
    ///
    /// Returns `None` if `rounds` is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<'a, I>(rounds: I) -> Option<Self>
    where
        I: IntoIterator<Item = RoundPayout<'a>>,
    {
        let mut rewards = vec![];
        let mut wins = 0;
        let mut wagered = 0.0;
        let mut bonus_counts = BTreeMap::new();
        for round in rounds {
            if round.reward > 0.0 {
                wins += 1;
            }
            wagered += round.bet;
            if let Some(bonus) = round.bonus {
                *bonus_counts.entry(bonus.to_owned()).or_default() += 1;
            }
            rewards.push(round.reward);
        }

        let count = rewards.len();
        let paid = rewards.iter().sum::<f64>();
        let reward = DescriptiveStats::new(rewards)?;
        Some(Self {
            rounds: count,
            wins,
            hit_rate: wins as f64 / count as f64,
            wagered,
            paid,
            rtp: if wagered > 0.0 { paid / wagered } else { 0.0 },
            reward,
            bonus_counts,
        })
    }
}
