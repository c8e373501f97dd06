// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::cmp::{min, Reverse};
use std::collections::BinaryHeap;

use fvm_ipld_bitfield::BitField;
use fvm_shared::sector::SectorNumber;

use super::{deadline_count, DeadlineError, Deadlines};

/// Assigns new sectors to deadlines.
///
/// Any partially filled last partition is topped up first, visiting deadlines in order. The
/// remaining sectors are then handed out a full partition at a time, each to the deadline with
/// the fewest partitions (lowest index on ties). Deadline 0 is never assigned new sectors.
///
/// The assignment is a pure function of the current deadlines and the order of `new_sectors`.
pub fn assign_new_sectors(
    deadlines: &mut Deadlines,
    partition_size: u64,
    new_sectors: &[SectorNumber],
) -> Result<(), DeadlineError> {
    if partition_size == 0 {
        return Err(DeadlineError::InvalidArgument("partition size must be positive".to_string()));
    }
    if deadlines.len() < 2 {
        return Err(DeadlineError::InvalidArgument(format!(
            "cannot assign sectors with {} deadlines, need at least 2",
            deadlines.len()
        )));
    }
    BitField::try_from_bits(new_sectors.iter().copied()).map_err(|e| {
        DeadlineError::InvalidArgument(format!("invalid sector numbers: {}", e))
    })?;

    let mut next_new_sector = 0;

    // Fill up any partial partitions.
    for deadline_idx in 1..deadlines.len() {
        if next_new_sector == new_sectors.len() {
            break;
        }
        let (partition_count, sector_count) =
            deadline_count(deadlines, partition_size, deadline_idx)?;
        let gap = partition_count.saturating_mul(partition_size) - sector_count;
        if gap == 0 {
            continue;
        }

        let remaining = (new_sectors.len() - next_new_sector) as u64;
        let count = min(gap, remaining) as usize;
        deadlines.add_to_deadline(
            deadline_idx,
            &new_sectors[next_new_sector..next_new_sector + count],
        )?;
        next_new_sector += count;
    }

    // Then assign whole partitions to the least loaded deadlines.
    let mut queue = BinaryHeap::new();
    for deadline_idx in 1..deadlines.len() {
        let (partition_count, _) = deadline_count(deadlines, partition_size, deadline_idx)?;
        queue.push(Reverse((partition_count, deadline_idx)));
    }

    while next_new_sector < new_sectors.len() {
        let Reverse((partition_count, deadline_idx)) = queue.pop().ok_or_else(|| {
            DeadlineError::IllegalState("no deadline available for assignment".to_string())
        })?;

        let remaining = (new_sectors.len() - next_new_sector) as u64;
        let count = min(partition_size, remaining) as usize;
        deadlines.add_to_deadline(
            deadline_idx,
            &new_sectors[next_new_sector..next_new_sector + count],
        )?;
        next_new_sector += count;

        queue.push(Reverse((partition_count + 1, deadline_idx)));
    }

    log::debug!(
        "assigned {} sectors across {} deadlines with partition size {}",
        new_sectors.len(),
        deadlines.len() - 1,
        partition_size
    );
    Ok(())
}
