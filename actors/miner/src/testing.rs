// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeMap;

use fil_wpost_runtime::runtime::Policy;
use fil_wpost_runtime::MessageAccumulator;
use fvm_shared::sector::SectorNumber;

use crate::Deadlines;

/// Checks that the deadlines match the policy's proving period and that no sector is due at
/// more than one deadline. Violations are accumulated rather than returned as errors.
pub fn check_deadlines_invariants(policy: &Policy, deadlines: &Deadlines) -> MessageAccumulator {
    let acc = MessageAccumulator::default();
    acc.require(
        deadlines.len() == policy.wpost_period_deadlines,
        format!(
            "deadline count {} does not match policy deadlines {}",
            deadlines.len(),
            policy.wpost_period_deadlines
        ),
    );

    let mut assigned: BTreeMap<SectorNumber, u64> = BTreeMap::new();
    for (deadline_idx, due) in deadlines.iter().enumerate() {
        let deadline_idx = deadline_idx as u64;
        let acc = acc.with_prefix(format!("deadline {}: ", deadline_idx));

        let sectors = match due.bounded_iter(policy.addressed_sectors_max) {
            Some(sectors) => sectors,
            None => {
                acc.add(format!(
                    "failed to enumerate {} sectors within limit {}",
                    due.len(),
                    policy.addressed_sectors_max
                ));
                continue;
            }
        };
        for sector_number in sectors {
            if let Some(other) = assigned.insert(sector_number, deadline_idx) {
                acc.add(format!("sector {} also due at deadline {}", sector_number, other));
            }
        }
    }

    acc
}
