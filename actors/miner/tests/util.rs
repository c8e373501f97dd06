#![allow(dead_code)]

use fil_wpost_miner::Deadlines;
use fil_wpost_runtime::runtime::Policy;
use fvm_ipld_bitfield::BitField;
use fvm_shared::sector::SectorNumber;

pub fn seq(first: u64, count: u64) -> Vec<SectorNumber> {
    (first..first + count).collect()
}

pub fn bf_seq(first: u64, count: u64) -> BitField {
    BitField::try_from_bits(first..first + count).unwrap()
}

pub fn assert_bf_equal(expected: &BitField, actual: &BitField) {
    let expected: Vec<u64> = expected.bounded_iter(1 << 20).unwrap().collect();
    let actual: Vec<u64> = actual.bounded_iter(1 << 20).unwrap().collect();
    assert_eq!(expected, actual);
}

pub fn assert_deadlines_equal(expected: &Deadlines, actual: &Deadlines) {
    assert_eq!(expected.len(), actual.len());
    for (idx, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        let e: Vec<u64> = e.bounded_iter(1 << 20).unwrap().collect();
        let a: Vec<u64> = a.bounded_iter(1 << 20).unwrap().collect();
        assert_eq!(e, a, "sectors differ at deadline {}", idx);
    }
}

/// Builds deadlines holding runs of consecutive sector numbers. Each call assigns the next
/// `count` unused sector numbers.
pub struct DeadlinesBuilder {
    pub deadlines: Deadlines,
    pub next_sector: u64,
}

impl DeadlinesBuilder {
    pub fn new(policy: &Policy, counts: &[u64]) -> Self {
        DeadlinesBuilder { deadlines: Deadlines::new(policy), next_sector: 0 }
            .add_to_from(0, counts)
    }

    pub fn add_to(mut self, deadline_idx: u64, count: u64) -> Self {
        let sectors = seq(self.next_sector, count);
        self.next_sector += count;
        self.deadlines.add_to_deadline(deadline_idx, &sectors).unwrap();
        self
    }

    pub fn add_to_from(mut self, first: u64, counts: &[u64]) -> Self {
        for (i, &count) in counts.iter().enumerate() {
            self = self.add_to(first + i as u64, count);
        }
        self
    }

    pub fn add_to_all(self, count: u64) -> Self {
        self.add_to_all_from(0, count)
    }

    pub fn add_to_all_from(mut self, first: u64, count: u64) -> Self {
        for deadline_idx in first..self.deadlines.len() {
            self = self.add_to(deadline_idx, count);
        }
        self
    }

    pub fn verify(&self, actual: &Deadlines) {
        assert_deadlines_equal(&self.deadlines, actual);
    }
}
