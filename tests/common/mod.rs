use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Routes `tracing` output through the test harness. The first call wins.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_thread_names(true)
            .with_ansi(false)
            .try_init();
    });
}
