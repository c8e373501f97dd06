// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_shared::clock::ChainEpoch;

use crate::{actor_error, ActorError};

// The policy itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// The period over which all a miner's active sectors will be challenged.
    pub wpost_proving_period: ChainEpoch,
    /// The duration of a deadline's challenge window, the period before a deadline when the challenge is available.
    pub wpost_challenge_window: ChainEpoch,
    /// The number of non-overlapping PoSt deadlines in each proving period.
    pub wpost_period_deadlines: u64,
    /// Lookback from the deadline's challenge window opening from which to sample chain randomness for the challenge seed.
    pub wpost_challenge_lookback: ChainEpoch,
    /// WPoStDisputeWindow is the period after a challenge window ends during which
    /// PoSts submitted during that period may be disputed.
    pub wpost_dispute_window: ChainEpoch,
    /// Minimum period between fault declaration and the next deadline opening.
    /// If the number of epochs between fault declaration and deadline's challenge window opening is lower than FaultDeclarationCutoff,
    /// the fault declaration is considered invalid.
    pub fault_declaration_cutoff: ChainEpoch,
    /// Maximum number of sector numbers that may be enumerated from a single sector set.
    pub addressed_sectors_max: u64,
}

impl Default for Policy {
    fn default() -> Policy {
        Policy {
            wpost_proving_period: policy_constants::WPOST_PROVING_PERIOD,
            wpost_challenge_window: policy_constants::WPOST_CHALLENGE_WINDOW,
            wpost_period_deadlines: policy_constants::WPOST_PERIOD_DEADLINES,
            wpost_challenge_lookback: policy_constants::WPOST_CHALLENGE_LOOKBACK,
            wpost_dispute_window: policy_constants::WPOST_DISPUTE_WINDOW,
            fault_declaration_cutoff: policy_constants::FAULT_DECLARATION_CUTOFF,
            addressed_sectors_max: policy_constants::ADDRESSED_SECTORS_MAX,
        }
    }
}

impl Policy {
    /// Checks that the proving period divides exactly into its deadlines.
    /// Every deadline computation assumes `proving period = deadlines * challenge window`.
    pub fn validate(&self) -> Result<(), ActorError> {
        if self.wpost_challenge_window <= 0 {
            return Err(actor_error!(
                illegal_argument,
                "challenge window {} must be positive",
                self.wpost_challenge_window
            ));
        }
        if self.wpost_period_deadlines == 0 {
            return Err(actor_error!(illegal_argument, "period deadlines must be positive"));
        }
        let expected = (self.wpost_period_deadlines as i64)
            .checked_mul(self.wpost_challenge_window)
            .ok_or_else(|| {
                actor_error!(
                    illegal_argument,
                    "{} deadlines of {} epochs overflows",
                    self.wpost_period_deadlines,
                    self.wpost_challenge_window
                )
            })?;
        if self.wpost_proving_period != expected {
            log::warn!(
                "rejecting policy: proving period {} != {} deadlines * {} epochs",
                self.wpost_proving_period,
                self.wpost_period_deadlines,
                self.wpost_challenge_window
            );
            return Err(actor_error!(
                illegal_argument,
                "proving period {} is not {} deadlines of {} epochs",
                self.wpost_proving_period,
                self.wpost_period_deadlines,
                self.wpost_challenge_window
            ));
        }
        if self.wpost_challenge_lookback < 0 || self.fault_declaration_cutoff < 0 {
            return Err(actor_error!(
                illegal_argument,
                "challenge lookback {} and fault cutoff {} must not be negative",
                self.wpost_challenge_lookback,
                self.fault_declaration_cutoff
            ));
        }
        Ok(())
    }
}

pub mod policy_constants {
    use fvm_shared::clock::ChainEpoch;

    use crate::builtin::*;

    /// The period over which a miner's active sectors are expected to be proven via WindowPoSt.
    /// This guarantees that (1) user data is proven daily, (2) user data is stored for 24h by a rational miner
    /// (due to Window PoSt cost assumption).
    pub const WPOST_PROVING_PERIOD: ChainEpoch = EPOCHS_IN_DAY;

    // The duration of a deadline's challenge window, the period before a deadline when the challenge is available.
    pub const WPOST_CHALLENGE_WINDOW: ChainEpoch = 30 * 60 / EPOCH_DURATION_SECONDS;

    /// The number of non-overlapping PoSt deadlines in each proving period.
    pub const WPOST_PERIOD_DEADLINES: u64 = 48;

    // Epochs after which chain state is final with overwhelming probability (hence the likelihood of two fork of this size is negligible)
    // This is a conservative value that is chosen via simulations of all known attacks.
    pub const CHAIN_FINALITY: ChainEpoch = 900;

    /// WPoStDisputeWindow is the period after a challenge window ends during which
    /// PoSts submitted during that period may be disputed.
    pub const WPOST_DISPUTE_WINDOW: ChainEpoch = 2 * CHAIN_FINALITY;

    /// Lookback from the deadline's challenge window opening from which to sample chain randomness for the challenge seed.
    ///
    /// This lookback exists so that deadline windows can be non-overlapping (which make the programming simpler)
    /// but without making the miner wait for chain stability before being able to start on PoSt computation.
    /// The challenge is available this many epochs before the window is actually open to receiving a PoSt.
    pub const WPOST_CHALLENGE_LOOKBACK: ChainEpoch = 20;

    /// Minimum period between fault declaration and the next deadline opening.
    /// If the number of epochs between fault declaration and deadline's challenge window opening is lower than FaultDeclarationCutoff,
    /// the fault declaration is considered invalid.
    pub const FAULT_DECLARATION_CUTOFF: ChainEpoch = WPOST_CHALLENGE_LOOKBACK + 50;

    /// Maximum number of sector numbers enumerated from one sector set in a single invocation.
    pub const ADDRESSED_SECTORS_MAX: u64 = 25_000;
}
