//! Statistics over simulated scratch-card rounds.
//!
//! - [`descriptive`]: min, max, mean, median and dispersion of a dataset
//! - [`payout`]: hit rate, return to player and bonus frequencies of a batch of rounds
//!
//! # Examples
//!
//! ```
//! use scratch_stats::payout::{PayoutSummary, RoundPayout};
//!
//! let rounds = [
//!     RoundPayout { bet: 100.0, reward: 0.0, bonus: None },
//!     RoundPayout { bet: 100.0, reward: 450.0, bonus: Some("MISS") },
//! ];
//! let summary = PayoutSummary::new(rounds).unwrap();
//! assert_eq!(summary.wins, 1);
//! assert_eq!(summary.rtp, 2.25);
//! ```

pub mod descriptive;
pub mod payout;
