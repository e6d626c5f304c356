//! Shared test utilities for confenv integration tests.
//!
//! Invariants / Assumptions:
//! - Commands never inherit `CONFENV_*` or `RUST_LOG` from the host.

use assert_cmd::Command;

/// Returns a hermetic `confenv` command for integration testing.
pub fn confenv_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confenv");

    cmd.env_remove("CONFENV_FILE")
        .env_remove("CONFENV_FORMAT")
        .env_remove("RUST_LOG");

    cmd
}
