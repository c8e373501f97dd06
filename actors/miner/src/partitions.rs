// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::cmp::min;

use fvm_ipld_bitfield::BitField;
use itertools::Itertools;

use super::{DeadlineError, Deadlines};

/// Number of partitions needed to hold `sector_count` sectors.
fn partition_count(sector_count: u64, partition_size: u64) -> u64 {
    sector_count / partition_size + u64::from(sector_count % partition_size != 0)
}

fn check_partition_size(partition_size: u64) -> Result<(), DeadlineError> {
    if partition_size == 0 {
        return Err(DeadlineError::InvalidArgument("partition size must be positive".to_string()));
    }
    Ok(())
}

/// Returns the number of partitions and the number of sectors due at a single deadline.
pub fn deadline_count(
    deadlines: &Deadlines,
    partition_size: u64,
    deadline_idx: u64,
) -> Result<(u64, u64), DeadlineError> {
    check_partition_size(partition_size)?;
    let sector_count = deadlines.get(deadline_idx)?.len();
    Ok((partition_count(sector_count, partition_size), sector_count))
}

/// Returns the global index of the first partition at a deadline, and the number of sectors
/// due at that deadline.
///
/// Partitions are numbered consecutively across all deadlines in deadline order, each deadline
/// contributing as many partitions as it needs to hold its sectors.
pub fn partitions_for_deadline(
    deadlines: &Deadlines,
    partition_size: u64,
    deadline_idx: u64,
) -> Result<(u64, u64), DeadlineError> {
    check_partition_size(partition_size)?;
    let sector_count = deadlines.get(deadline_idx)?.len();

    let first_partition = deadlines
        .iter()
        .take(deadline_idx as usize)
        .map(|due| partition_count(due.len(), partition_size))
        .sum();
    Ok((first_partition, sector_count))
}

/// Returns the sectors in each of the requested partitions of a deadline, in request order.
///
/// A partition holds the next `partition_size` sectors of the deadline in ascending order; the
/// deadline's last partition may hold fewer. Every index is checked before any partition is
/// extracted, so a request naming any partition outside the deadline fails as a whole.
pub fn compute_partitions_sectors(
    deadlines: &Deadlines,
    partition_size: u64,
    deadline_idx: u64,
    partitions: &[u64],
) -> Result<Vec<BitField>, DeadlineError> {
    let (first_partition, sector_count) =
        partitions_for_deadline(deadlines, partition_size, deadline_idx)?;
    let deadline_partition_count = partition_count(sector_count, partition_size);

    for partition_idx in partitions.iter().copied().sorted() {
        if partition_idx < first_partition
            || partition_idx - first_partition >= deadline_partition_count
        {
            log::debug!(
                "rejecting partition {} for deadline {} holding partitions [{}, {})",
                partition_idx,
                deadline_idx,
                first_partition,
                first_partition + deadline_partition_count
            );
            return Err(DeadlineError::InvalidPartition {
                partition: partition_idx,
                deadline: deadline_idx,
                first: first_partition,
                count: deadline_partition_count,
            });
        }
    }

    let due = deadlines.get(deadline_idx)?;
    partitions
        .iter()
        .map(|&partition_idx| {
            let sector_offset = (partition_idx - first_partition) * partition_size;
            let count = min(partition_size, sector_count - sector_offset);
            due.slice(sector_offset, count).ok_or_else(|| {
                DeadlineError::IllegalState(format!(
                    "failed to select {} sectors at offset {} of deadline {}",
                    count, sector_offset, deadline_idx
                ))
            })
        })
        .collect()
}
