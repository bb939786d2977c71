//! Logger setup for binaries, benches and tests.
//!
//! The library itself only talks to the `log` facade. Every owner prefixes
//! its lines with `[label]` from `OwnerConfig`, so interleaved rooms can be
//! told apart. Filtering is controlled with `RUST_LOG` as usual.

pub use log::{debug, error, info, trace, warn};

/// Initialize `env_logger` if no logger is installed yet.
///
/// Returns `false` when another logger was already set.
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}

/// Logger for tests: output is captured by the test harness.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
