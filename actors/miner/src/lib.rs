// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub use deadline_assignment::*;
pub use deadline_info::*;
pub use deadline_state::*;
pub use deadlines::*;
pub use errors::*;
pub use partitions::*;
pub use quantize::*;

mod deadline_assignment;
mod deadline_info;
mod deadline_state;
mod deadlines;
mod errors;
mod partitions;
mod quantize;
pub mod testing;
