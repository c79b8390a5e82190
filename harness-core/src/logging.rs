use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
///
/// `RUST_LOG` overrides the default filter. Output goes through the test
/// writer so it is captured per test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "info,invoice_e2e=debug,harness_core=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}
