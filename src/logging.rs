//! Logger setup for binaries and tests embedding the library.
//!
//! The library itself only talks to the `log` facade. Installing a concrete
//! logger is left to the host; with the `debug` feature enabled this module
//! offers an `env_logger` backend configured from `RUST_LOG`.

/// Install `env_logger` as the global logger.
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "debug")]
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}

/// Like [`init`], but routes output through the test harness capture.
#[cfg(feature = "debug")]
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(not(feature = "debug"))]
pub fn init() {}

#[cfg(not(feature = "debug"))]
pub fn init_for_tests() {}
