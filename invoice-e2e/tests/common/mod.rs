//! Common test utilities for the invoice e2e suite.

use invoice_e2e::{init_tracing, HarnessConfig, ScenarioRunner, SimulatedInvoiceApp};

/// Build a runner with readback windows suited to the simulated app.
pub fn runner() -> ScenarioRunner {
    init_tracing();
    ScenarioRunner::new(test_config())
}

pub fn test_config() -> HarnessConfig {
    HarnessConfig {
        readback_timeout_secs: 2,
        poll_interval_ms: 10,
        ..Default::default()
    }
}

pub fn app() -> SimulatedInvoiceApp {
    SimulatedInvoiceApp::new()
}
