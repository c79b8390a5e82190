//! invoice-e2e: Data-driven invoice creation scenarios.
//!
//! Drives an [`InvoiceUiDriver`] through customer selection, item addition,
//! and VAT entry, then asserts the displayed totals against values computed
//! locally by `invoice-model` (or against literal pinned strings).
//!
//! ## Usage
//!
//! ```bash
//! # Point the suite at a deployment and a test account
//! export E2E__BASE_URL=https://invoicedesk.siyothsoft.com
//! export E2E__EMAIL=... E2E__PASSWORD=...
//!
//! cargo test -p invoice-e2e
//! ```
//!
//! Scenarios share the remote app's auto-incrementing invoice-number
//! sequence, so they always run serially.

pub mod driver;
pub mod runner;
pub mod scenario;
pub mod sim;

pub use driver::InvoiceUiDriver;
pub use runner::{RunSummary, ScenarioOutcome, ScenarioReport, ScenarioRunner};
pub use scenario::{valid_invoice_scenarios, ExpectedTotals, InvoiceScenario, ScenarioItem};
pub use sim::SimulatedInvoiceApp;

pub use harness_core::{init_tracing, DriverError, HarnessConfig, HarnessError, RetryConfig};
