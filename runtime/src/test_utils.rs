// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Installs a `RUST_LOG`-driven logger for tests. Safe to call from every test; only the
/// first call installs it.
pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}
