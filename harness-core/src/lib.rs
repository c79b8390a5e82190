//! harness-core: Shared infrastructure for the InvoiceDesk e2e suite.
//!
//! Configuration and credential loading, the harness error taxonomy, the
//! bounded-retry policy for flaky UI interactions, explicit wait-then-act
//! polling, and tracing setup for test binaries.

pub mod config;
pub mod error;
pub mod logging;
pub mod retry;
pub mod wait;

pub use config::HarnessConfig;
pub use error::{DriverError, HarnessError};
pub use logging::init_tracing;
pub use retry::{retry_driver_call, RetryConfig};
pub use wait::{wait_for_app, wait_until};

pub use async_trait;
pub use tokio;
pub use tracing;
