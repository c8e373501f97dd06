// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fil_wpost_runtime::runtime::Policy;
use fvm_shared::clock::ChainEpoch;

use super::{DeadlineInfo, QuantSpec};

/// Returns the deadline info for the deadline that is current at `current_epoch`, within the
/// proving period beginning at `period_start`.
///
/// Before the period starts this is deadline 0. Once the whole period has passed the result is
/// the elapsed marker: index `wpost_period_deadlines` with a zero-width window at the start of
/// the next period.
pub fn compute_proving_period_deadline(
    policy: &Policy,
    period_start: ChainEpoch,
    current_epoch: ChainEpoch,
) -> DeadlineInfo {
    // Widened so that any pair of epochs can be compared.
    let period_progress = i128::from(current_epoch) - i128::from(period_start);
    if period_progress >= i128::from(policy.wpost_proving_period) {
        return new_deadline_info(
            policy,
            period_start,
            policy.wpost_period_deadlines,
            current_epoch,
        );
    }

    let deadline_idx = if period_progress < 0 {
        0
    } else {
        (period_progress / i128::from(policy.wpost_challenge_window)) as u64
    };
    new_deadline_info(policy, period_start, deadline_idx, current_epoch)
}

/// Returns deadline-related calculations for a deadline in some proving period and the current epoch.
pub fn new_deadline_info(
    policy: &Policy,
    proving_period_start: ChainEpoch,
    deadline_idx: u64,
    current_epoch: ChainEpoch,
) -> DeadlineInfo {
    DeadlineInfo::new(
        proving_period_start,
        deadline_idx,
        current_epoch,
        policy.wpost_period_deadlines,
        policy.wpost_proving_period,
        policy.wpost_challenge_window,
        policy.wpost_challenge_lookback,
        policy.fault_declaration_cutoff,
    )
}

/// Returns true if the deadline at the given index is currently mutable. A "mutable" deadline may
/// have new sectors assigned to it.
pub fn deadline_is_mutable(
    policy: &Policy,
    proving_period_start: ChainEpoch,
    deadline_idx: u64,
    current_epoch: ChainEpoch,
) -> bool {
    // Get the next non-elapsed deadline (i.e., the next time we care about
    // mutations to the deadline).
    let deadline_info =
        new_deadline_info(policy, proving_period_start, deadline_idx, current_epoch)
            .next_not_elapsed();

    // Ensure that the current epoch is at least one challenge window before
    // that deadline opens.
    current_epoch < deadline_info.open.saturating_sub(policy.wpost_challenge_window)
}

// Returns true if optimistically accepted posts submitted to the given deadline
// may be disputed. Specifically, this ensures that:
//
// 1. Optimistic PoSts may not be disputed while the challenge window is open.
// 2. Optimistic PoSts may not be disputed after the miner could have compacted the deadline.
pub fn deadline_available_for_optimistic_post_dispute(
    policy: &Policy,
    proving_period_start: ChainEpoch,
    deadline_idx: u64,
    current_epoch: ChainEpoch,
) -> bool {
    if proving_period_start > current_epoch {
        return false;
    }
    let dl_info = new_deadline_info(policy, proving_period_start, deadline_idx, current_epoch)
        .next_not_elapsed();

    !dl_info.is_open()
        && current_epoch
            < (dl_info.close - policy.wpost_proving_period) + policy.wpost_dispute_window
}

// Returns true if the given deadline may be compacted in the current epoch.
// Deadlines may not be compacted when:
//
// 1. The deadline is currently being challenged.
// 2. The deadline is to be challenged next.
// 3. Optimistically accepted posts from the deadline's last challenge window
//    can currently be disputed.
pub fn deadline_available_for_compaction(
    policy: &Policy,
    proving_period_start: ChainEpoch,
    deadline_idx: u64,
    current_epoch: ChainEpoch,
) -> bool {
    deadline_is_mutable(policy, proving_period_start, deadline_idx, current_epoch)
        && !deadline_available_for_optimistic_post_dispute(
            policy,
            proving_period_start,
            deadline_idx,
            current_epoch,
        )
}

/// Determine current period start and deadline index directly from current epoch and
/// the offset implied by the proving period. This works correctly even for a miner
/// whose period start has not been advanced by deadline processing.
pub fn new_deadline_info_from_offset_and_epoch(
    policy: &Policy,
    period_start_seed: ChainEpoch,
    current_epoch: ChainEpoch,
) -> DeadlineInfo {
    let q = QuantSpec { unit: policy.wpost_proving_period, offset: period_start_seed };
    let current_period_start = q.quantize_down(current_epoch);
    let current_deadline_idx = ((current_epoch - current_period_start)
        / policy.wpost_challenge_window) as u64
        % policy.wpost_period_deadlines;
    new_deadline_info(policy, current_period_start, current_deadline_idx, current_epoch)
}
