// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fil_wpost_runtime::{actor_error, ActorError};
use thiserror::Error;

/// Failures of deadline and partition operations. Every failing operation leaves its
/// inputs unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeadlineError {
    #[error("deadline index {index} out of range, must be less than {count}")]
    IndexOutOfRange { index: u64, count: u64 },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// `count` is the number of partitions at the deadline.
    #[error("invalid partition {partition} at deadline {deadline} with first {first}, count {count}")]
    InvalidPartition { partition: u64, deadline: u64, first: u64, count: u64 },
    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl From<DeadlineError> for ActorError {
    fn from(e: DeadlineError) -> Self {
        match e {
            DeadlineError::IllegalState(msg) => actor_error!(illegal_state, msg),
            e => actor_error!(illegal_argument, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use fvm_shared::error::ExitCode;

    use super::*;

    #[test]
    fn invalid_partition_message() {
        let e = DeadlineError::InvalidPartition { partition: 4, deadline: 1, first: 0, count: 4 };
        assert_eq!("invalid partition 4 at deadline 1 with first 0, count 4", e.to_string());
    }

    #[test]
    fn converts_to_actor_error() {
        let err: ActorError = DeadlineError::IndexOutOfRange { index: 48, count: 48 }.into();
        assert_eq!(ExitCode::USR_ILLEGAL_ARGUMENT, err.exit_code());
        assert_eq!("deadline index 48 out of range, must be less than 48", err.msg());

        let err: ActorError = DeadlineError::IllegalState("slice failed".to_string()).into();
        assert_eq!(ExitCode::USR_ILLEGAL_STATE, err.exit_code());
    }
}
