//! Data-driven scenario runner.
//!
//! For each scenario: validate inputs and compute expected totals before any
//! UI interaction, drive the page through the [`InvoiceUiDriver`], then
//! compare displayed strings by exact equality. Scenarios run strictly
//! serially because the remote invoice-number sequence is shared mutable
//! state on the server.

use std::future::Future;
use std::time::Duration;

use harness_core::{
    retry_driver_call, wait_until, HarnessConfig, HarnessError, RetryConfig,
};
use invoice_model::{compute_totals, format_currency, Decimal, LineItem, ProductCatalog};
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::driver::InvoiceUiDriver;
use crate::scenario::{ExpectedTotals, InvoiceScenario};

/// Placeholder shown in diffs when the VAT line is not rendered at all.
const HIDDEN: &str = "<hidden>";

#[derive(Debug, Clone)]
struct ExpectedStrings {
    subtotal: String,
    vat: String,
    grand_total: String,
}

/// Verdict for one scenario.
#[derive(Debug)]
pub enum ScenarioOutcome {
    Passed { invoice_number: Option<String> },
    Failed(HarnessError),
}

impl ScenarioOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioOutcome::Passed { .. })
    }
}

/// What happened when a scenario ran: verdict, completed steps, timing.
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: ScenarioOutcome,
    pub steps_completed: Vec<String>,
    pub elapsed: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

/// Result of a full serial run.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub reports: Vec<ScenarioReport>,
}

impl RunSummary {
    pub fn passed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.reports.iter().filter(|r| r.passed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.reports.iter().filter(|r| !r.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(ScenarioReport::passed)
    }
}

/// Drives scenarios against a UI driver and produces reports.
pub struct ScenarioRunner {
    config: HarnessConfig,
    retry: RetryConfig,
    catalog: ProductCatalog,
}

impl ScenarioRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            retry: RetryConfig::default(),
            catalog: ProductCatalog::builtin(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_catalog(mut self, catalog: ProductCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run one scenario under the per-scenario deadline.
    ///
    /// A failure is recorded in the report, never propagated: each scenario
    /// is independent and the rest of the suite continues.
    pub async fn run_scenario<D>(&self, driver: &mut D, scenario: &InvoiceScenario) -> ScenarioReport
    where
        D: InvoiceUiDriver + ?Sized,
    {
        let started = Instant::now();
        let mut steps_completed = Vec::new();

        let result = tokio::time::timeout(
            self.config.scenario_timeout(),
            self.execute(driver, scenario, &mut steps_completed),
        )
        .await;

        let outcome = match result {
            Ok(Ok(invoice_number)) => {
                info!(scenario = %scenario.name, "scenario passed");
                ScenarioOutcome::Passed { invoice_number }
            }
            Ok(Err(error)) => {
                warn!(scenario = %scenario.name, %error, step = ?error.step(), "scenario failed");
                ScenarioOutcome::Failed(error)
            }
            Err(_) => {
                let last = steps_completed
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "scenario start".to_string());
                let error = HarnessError::DriverTimeout {
                    step: "scenario deadline".to_string(),
                    last_state: format!("last completed step: {last}"),
                };
                warn!(scenario = %scenario.name, %error, "scenario timed out");
                ScenarioOutcome::Failed(error)
            }
        };

        ScenarioReport {
            name: scenario.name.clone(),
            outcome,
            steps_completed,
            elapsed: started.elapsed(),
        }
    }

    /// Run scenarios strictly serially on one driver.
    ///
    /// Invoice numbers come from a server-owned auto-increment, so a serial
    /// run must observe them strictly increasing across saved scenarios.
    pub async fn run_all<D>(&self, driver: &mut D, scenarios: &[InvoiceScenario]) -> RunSummary
    where
        D: InvoiceUiDriver + ?Sized,
    {
        let run_id = Uuid::new_v4();
        info!(%run_id, count = scenarios.len(), "starting scenario run");

        let mut reports = Vec::with_capacity(scenarios.len());
        let mut last_sequence: Option<u64> = None;

        for scenario in scenarios {
            let mut report = self.run_scenario(driver, scenario).await;

            if let ScenarioOutcome::Passed {
                invoice_number: Some(number),
            } = &report.outcome
            {
                match trailing_sequence(number) {
                    Some(sequence) => {
                        if last_sequence.is_some_and(|prev| sequence <= prev) {
                            report.outcome =
                                ScenarioOutcome::Failed(HarnessError::AssertionMismatch {
                                    step: "invoice number sequence".to_string(),
                                    expected: format!(
                                        "sequence greater than {}",
                                        last_sequence.unwrap_or_default()
                                    ),
                                    actual: number.clone(),
                                });
                        } else {
                            last_sequence = Some(sequence);
                        }
                    }
                    None => {
                        report.outcome = ScenarioOutcome::Failed(HarnessError::AssertionMismatch {
                            step: "invoice number sequence".to_string(),
                            expected: "a numeric suffix".to_string(),
                            actual: number.clone(),
                        });
                    }
                }
            }

            reports.push(report);
        }

        let summary = RunSummary { run_id, reports };
        info!(
            %run_id,
            passed = summary.passed().count(),
            failed = summary.failed().count(),
            "scenario run finished"
        );
        summary
    }

    /// Resolve product labels against the catalog; a miss is a setup
    /// failure before any UI interaction happens.
    fn resolve_items(&self, scenario: &InvoiceScenario) -> Result<Vec<LineItem>, HarnessError> {
        scenario
            .items
            .iter()
            .map(|item| {
                let unit_price = self.catalog.unit_price(&item.product).ok_or_else(|| {
                    HarnessError::SetupFailure(format!(
                        "product {:?} not in catalog",
                        item.product
                    ))
                })?;
                LineItem::new(item.product.clone(), item.quantity, unit_price)
                    .map_err(HarnessError::from)
            })
            .collect()
    }

    fn expected_strings(&self, scenario: &InvoiceScenario) -> Result<ExpectedStrings, HarnessError> {
        let items = self.resolve_items(scenario)?;
        let totals = compute_totals(&items, scenario.vat_rate, Decimal::ZERO)?;

        Ok(match &scenario.expected {
            ExpectedTotals::Literal {
                subtotal,
                vat,
                grand_total,
            } => ExpectedStrings {
                subtotal: subtotal.clone(),
                vat: vat.clone(),
                grand_total: grand_total.clone(),
            },
            ExpectedTotals::Computed => ExpectedStrings {
                subtotal: format_currency(totals.subtotal),
                vat: format_currency(totals.tax_amount),
                grand_total: format_currency(totals.grand_total),
            },
        })
    }

    async fn execute<D>(
        &self,
        driver: &mut D,
        scenario: &InvoiceScenario,
        steps: &mut Vec<String>,
    ) -> Result<Option<String>, HarnessError>
    where
        D: InvoiceUiDriver + ?Sized,
    {
        // Fail fast: no UI interaction with invalid inputs or an unknown
        // product.
        let expected = self.expected_strings(scenario)?;

        retry_driver_call(&self.retry, "open_create_invoice_page", driver, |d| {
            d.open_create_invoice_page()
        })
        .await
        .map_err(|e| HarnessError::from_driver("open create invoice page", e))?;
        steps.push("open create invoice page".to_string());

        let customer = scenario.customer.clone();
        retry_driver_call(&self.retry, "select_customer", driver, move |d| {
            let customer = customer.clone();
            Box::pin(async move { d.select_customer(&customer).await })
        })
        .await
        .map_err(|e| HarnessError::from_driver("select customer", e))?;
        steps.push("select customer".to_string());

        for item in &scenario.items {
            let step = format!("add item {:?}", item.product);
            let product = item.product.clone();
            let quantity = item.quantity;
            retry_driver_call(&self.retry, "add_item", driver, move |d| {
                let product = product.clone();
                Box::pin(async move { d.add_item(&product, quantity).await })
            })
            .await
            .map_err(|e| HarnessError::from_driver(step.clone(), e))?;
            steps.push(step);
        }

        retry_driver_call(&self.retry, "set_vat_rate", driver, |d| {
            d.set_vat_rate(scenario.vat_rate)
        })
        .await
        .map_err(|e| HarnessError::from_driver("set vat rate", e))?;
        steps.push("set vat rate".to_string());

        let readback: &D = driver;

        self.wait_for_display("verify subtotal", &expected.subtotal, || {
            readback.displayed_subtotal()
        })
        .await?;
        steps.push("verify subtotal".to_string());

        // The UI hides the VAT line when the amount is zero instead of
        // rendering "Rs 0.00"; assert non-visibility for that case.
        let (vat_step, expected_vat) = if expected.vat == format_currency(Decimal::ZERO) {
            ("verify vat line hidden", HIDDEN.to_string())
        } else {
            ("verify vat", expected.vat.clone())
        };
        self.wait_for_display(vat_step, &expected_vat, || {
            let fut = readback.displayed_vat();
            async move { fut.await.map(|vat| vat.unwrap_or_else(|| HIDDEN.to_string())) }
        })
        .await?;
        steps.push(vat_step.to_string());

        self.wait_for_display("verify grand total", &expected.grand_total, || {
            readback.displayed_grand_total()
        })
        .await?;
        steps.push("verify grand total".to_string());

        if !scenario.persist {
            return Ok(None);
        }

        let invoice_number = retry_driver_call(&self.retry, "save", driver, |d| d.save())
            .await
            .map_err(|e| HarnessError::from_driver("save invoice", e))?;
        if invoice_number.is_empty() {
            return Err(HarnessError::AssertionMismatch {
                step: "save invoice".to_string(),
                expected: "a non-empty invoice number".to_string(),
                actual: String::new(),
            });
        }
        steps.push("save invoice".to_string());

        Ok(Some(invoice_number))
    }

    /// Poll a displayed value until it equals `expected`, in the manner of a
    /// text assertion with a timeout. The final observed value lands in the
    /// mismatch diff.
    async fn wait_for_display<F, Fut>(
        &self,
        step: &str,
        expected: &str,
        mut read: F,
    ) -> Result<(), HarnessError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, harness_core::DriverError>>,
    {
        wait_until(
            step,
            self.config.readback_timeout(),
            self.config.poll_interval(),
            || {
                let fut = read();
                async move {
                    match fut.await {
                        Ok(actual) if actual == expected => Ok(()),
                        Ok(actual) => Err(actual),
                        Err(error) => Err(format!("driver error: {error}")),
                    }
                }
            },
        )
        .await
        .map_err(|error| match error {
            HarnessError::DriverTimeout { step, last_state } => HarnessError::AssertionMismatch {
                step,
                expected: expected.to_string(),
                actual: last_state,
            },
            other => other,
        })
    }
}

fn trailing_sequence(invoice_number: &str) -> Option<u64> {
    let digits: Vec<char> = invoice_number
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.iter().rev().collect::<String>().parse().ok()
}
