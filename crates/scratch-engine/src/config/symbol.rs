use serde::{Deserialize, Serialize};

/// A symbol that can appear on the grid.
///
/// Standard symbols count toward winning combinations. Bonus symbols never count; the
/// first one on a winning grid modifies the total reward through its [`BonusImpact`].
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant, Deserialize, Serialize)]
#[serde(try_from = "RawSymbol", into = "RawSymbol")]
pub enum SymbolKind {
    Standard { reward_multiplier: f64 },
    Bonus(BonusImpact),
}

/// Effect a bonus symbol has on the total reward.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum BonusImpact {
    /// Multiplies the total reward.
    MultiplyReward { multiplier: f64 },
    /// Adds a fixed amount to the total reward.
    ExtraBonus { extra: f64 },
    /// No effect.
    Miss,
}

impl BonusImpact {
    /// Applies the impact to a reward total.
    #[must_use]
    pub fn apply(self, reward: f64) -> f64 {
        match self {
            Self::MultiplyReward { multiplier } => reward * multiplier,
            Self::ExtraBonus { extra } => reward + extra,
            Self::Miss => reward,
        }
    }
}

impl SymbolKind {
    /// Returns the reward multiplier of a standard symbol.
    #[must_use]
    pub fn reward_multiplier(&self) -> Option<f64> {
        match self {
            Self::Standard { reward_multiplier } => Some(*reward_multiplier),
            Self::Bonus(_) => None,
        }
    }

    /// Returns the impact of a bonus symbol.
    #[must_use]
    pub fn bonus_impact(&self) -> Option<BonusImpact> {
        match self {
            Self::Standard { .. } => None,
            Self::Bonus(impact) => Some(*impact),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum RawSymbolType {
    Standard,
    Bonus,
}

const MULTIPLY_REWARD: &str = "multiply_reward";
const EXTRA_BONUS: &str = "extra_bonus";
const MISS: &str = "miss";

/// On-disk symbol layout: a flat object discriminated by `type` and `impact`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RawSymbol {
    #[serde(rename = "type")]
    symbol_type: RawSymbolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reward_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra: Option<f64>,
}

impl TryFrom<RawSymbol> for SymbolKind {
    type Error = String;

    fn try_from(raw: RawSymbol) -> Result<Self, Self::Error> {
        match raw.symbol_type {
            RawSymbolType::Standard => {
                let reward_multiplier = raw
                    .reward_multiplier
                    .ok_or("standard symbol requires 'reward_multiplier'")?;
                Ok(Self::Standard { reward_multiplier })
            }
            RawSymbolType::Bonus => {
                // Any impact other than the two effective ones behaves like a miss.
                let impact = match raw.impact.as_deref() {
                    Some(MULTIPLY_REWARD) => BonusImpact::MultiplyReward {
                        multiplier: raw
                            .reward_multiplier
                            .ok_or("'multiply_reward' bonus requires 'reward_multiplier'")?,
                    },
                    Some(EXTRA_BONUS) => BonusImpact::ExtraBonus {
                        extra: raw.extra.ok_or("'extra_bonus' bonus requires 'extra'")?,
                    },
                    _ => BonusImpact::Miss,
                };
                Ok(Self::Bonus(impact))
            }
        }
    }
}

impl From<SymbolKind> for RawSymbol {
    fn from(kind: SymbolKind) -> Self {
        let mut raw = Self {
            symbol_type: RawSymbolType::Standard,
            reward_multiplier: None,
            impact: None,
            extra: None,
        };
        match kind {
            SymbolKind::Standard { reward_multiplier } => {
                raw.reward_multiplier = Some(reward_multiplier);
            }
            SymbolKind::Bonus(impact) => {
                raw.symbol_type = RawSymbolType::Bonus;
                match impact {
                    BonusImpact::MultiplyReward { multiplier } => {
                        raw.impact = Some(MULTIPLY_REWARD.to_owned());
                        raw.reward_multiplier = Some(multiplier);
                    }
                    BonusImpact::ExtraBonus { extra } => {
                        raw.impact = Some(EXTRA_BONUS.to_owned());
                        raw.extra = Some(extra);
                    }
                    BonusImpact::Miss => raw.impact = Some(MISS.to_owned()),
                }
            }
        }
        raw
    }
}
