//! Integration test entry point. Each module covers one area of the
//! engine's behavior against its public API only.

mod matching_tests;
mod router_tests;
mod stop_tests;

/// Routes `tracing` output through the test harness's captured writer,
/// same `fmt()` setup as the teacher's `trade_listener_channels`
/// example binary. Guarded by `Once` since every test file in this
/// binary calls it and `tracing_subscriber` can only be installed once
/// per process.
pub(crate) fn init_test_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .init();
    });
}
