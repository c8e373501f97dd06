// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fil_wpost_runtime::runtime::Policy;
use fvm_ipld_bitfield::BitField;
use fvm_shared::sector::SectorNumber;

use super::DeadlineError;

/// Deadlines contains the sectors due at each deadline of a miner's proving period.
///
/// Sector numbers are expected to be unique across all deadlines. `add_to_deadline` does not
/// check this; `testing::check_deadlines_invariants` reports any violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Deadlines {
    // One sector set per deadline, in deadline order.
    due: Vec<BitField>,
}

impl Deadlines {
    /// Constructs a set of empty deadlines, one per deadline in the policy's proving period.
    pub fn new(policy: &Policy) -> Self {
        Self { due: vec![BitField::new(); policy.wpost_period_deadlines as usize] }
    }

    /// Number of deadlines.
    pub fn len(&self) -> u64 {
        self.due.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }

    /// Returns the sectors due at a deadline.
    pub fn get(&self, deadline_idx: u64) -> Result<&BitField, DeadlineError> {
        let count = self.len();
        if deadline_idx >= count {
            return Err(DeadlineError::IndexOutOfRange { index: deadline_idx, count });
        }
        Ok(&self.due[deadline_idx as usize])
    }

    /// Iterates the sectors due at each deadline, in deadline order.
    pub fn iter(&self) -> impl Iterator<Item = &BitField> + '_ {
        self.due.iter()
    }

    /// Adds sector numbers to the set due at a deadline. Numbers already present are ignored.
    pub fn add_to_deadline(
        &mut self,
        deadline_idx: u64,
        new_sectors: &[SectorNumber],
    ) -> Result<(), DeadlineError> {
        let count = self.len();
        if deadline_idx >= count {
            return Err(DeadlineError::IndexOutOfRange { index: deadline_idx, count });
        }
        let new_sectors = BitField::try_from_bits(new_sectors.iter().copied()).map_err(|e| {
            DeadlineError::InvalidArgument(format!(
                "invalid sector numbers for deadline {}: {}",
                deadline_idx, e
            ))
        })?;

        self.due[deadline_idx as usize] |= &new_sectors;
        Ok(())
    }

    /// Returns the index of the deadline a sector is due at, if any.
    pub fn find_sector(&self, sector_number: SectorNumber) -> Option<u64> {
        self.due.iter().position(|due| due.get(sector_number)).map(|idx| idx as u64)
    }
}
