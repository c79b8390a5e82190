//! In-process simulation of the remote Create Invoice page.
//!
//! Faithful to the observed UI conventions: the Add Item and Save buttons
//! stay disabled until a customer is selected, displayed totals recompute on
//! every edit, the VAT line is hidden (not zeroed) when the VAT amount is
//! zero, and invoice numbers come from a server-owned auto-increment.
//!
//! Test hooks allow injecting transient failures (to exercise the retry
//! policy), overriding displayed strings (to exercise mismatch reporting),
//! and delaying every response (to exercise the scenario deadline).

use std::time::Duration;

use async_trait::async_trait;
use harness_core::DriverError;
use invoice_model::{format_currency, round_money, Decimal, LineItem, ProductCatalog};

use crate::driver::InvoiceUiDriver;

pub struct SimulatedInvoiceApp {
    catalog: ProductCatalog,
    customers: Vec<String>,
    selected_customer: Option<String>,
    items: Vec<LineItem>,
    vat_rate: Decimal,
    next_invoice_number: u32,
    transient_failures_left: u32,
    response_delay: Duration,
    vat_display_override: Option<Option<String>>,
    grand_total_display_override: Option<String>,
}

impl SimulatedInvoiceApp {
    pub fn new() -> Self {
        Self {
            catalog: ProductCatalog::builtin(),
            customers: vec![invoice_model::CUSTOMER_SHIHARA.to_string()],
            selected_customer: None,
            items: Vec::new(),
            vat_rate: Decimal::ZERO,
            next_invoice_number: 1,
            transient_failures_left: 0,
            response_delay: Duration::ZERO,
            vat_display_override: None,
            grand_total_display_override: None,
        }
    }

    pub fn with_catalog(mut self, catalog: ProductCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Reset page state between scenarios, keeping the invoice-number
    /// sequence (the server keeps counting across page loads).
    pub fn reset_form(&mut self) {
        self.selected_customer = None;
        self.items.clear();
        self.vat_rate = Decimal::ZERO;
    }

    /// Make the next `count` mutating interactions fail transiently.
    pub fn inject_transient_failures(&mut self, count: u32) {
        self.transient_failures_left = count;
    }

    /// Delay every interaction, simulating a slow remote page.
    pub fn set_response_delay(&mut self, delay: Duration) {
        self.response_delay = delay;
    }

    /// Force the VAT line to display a given string (or `None` for hidden),
    /// regardless of the computed amount.
    pub fn override_vat_display(&mut self, display: Option<String>) {
        self.vat_display_override = Some(display);
    }

    /// Force the grand total to display a given string.
    pub fn override_grand_total_display(&mut self, display: impl Into<String>) {
        self.grand_total_display_override = Some(display.into());
    }

    fn take_fault(&mut self) -> Result<(), DriverError> {
        if self.transient_failures_left > 0 {
            self.transient_failures_left -= 1;
            return Err(DriverError::Transient(
                "injected transient failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn settle(&self) {
        if self.response_delay > Duration::ZERO {
            tokio::time::sleep(self.response_delay).await;
        }
    }

    fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::amount).sum()
    }

    fn vat_amount(&self) -> Decimal {
        round_money(self.subtotal() * self.vat_rate / Decimal::ONE_HUNDRED)
    }

    fn grand_total(&self) -> Decimal {
        let subtotal = self.subtotal();
        round_money(subtotal + subtotal * self.vat_rate / Decimal::ONE_HUNDRED)
    }
}

impl Default for SimulatedInvoiceApp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvoiceUiDriver for SimulatedInvoiceApp {
    async fn open_create_invoice_page(&mut self) -> Result<(), DriverError> {
        self.settle().await;
        self.take_fault()?;
        self.reset_form();
        Ok(())
    }

    async fn select_customer(&mut self, name: &str) -> Result<(), DriverError> {
        self.settle().await;
        self.take_fault()?;
        if !self.customers.iter().any(|c| c == name) {
            return Err(DriverError::OptionUnavailable {
                control: "customer dropdown".to_string(),
                option: name.to_string(),
            });
        }
        self.selected_customer = Some(name.to_string());
        Ok(())
    }

    async fn add_item(&mut self, product_label: &str, quantity: u32) -> Result<(), DriverError> {
        self.settle().await;
        self.take_fault()?;
        if self.selected_customer.is_none() {
            // The real page keeps the button disabled until a customer is
            // picked; a driver would give up waiting for it to enable.
            return Err(DriverError::Timeout(
                "Add Item button never became enabled".to_string(),
            ));
        }
        let unit_price = self.catalog.unit_price(product_label).ok_or_else(|| {
            DriverError::OptionUnavailable {
                control: "product dropdown".to_string(),
                option: product_label.to_string(),
            }
        })?;
        self.items.push(LineItem {
            description: product_label.to_string(),
            quantity,
            unit_price,
        });
        Ok(())
    }

    async fn set_vat_rate(&mut self, percent: Decimal) -> Result<(), DriverError> {
        self.settle().await;
        self.take_fault()?;
        if percent < Decimal::ZERO {
            // The spinbutton has a zero floor and rejects negative entry.
            return Err(DriverError::OptionUnavailable {
                control: "VAT rate spinbutton".to_string(),
                option: percent.to_string(),
            });
        }
        self.vat_rate = percent;
        Ok(())
    }

    async fn displayed_subtotal(&self) -> Result<String, DriverError> {
        self.settle().await;
        Ok(format_currency(self.subtotal()))
    }

    async fn displayed_vat(&self) -> Result<Option<String>, DriverError> {
        self.settle().await;
        if let Some(display) = &self.vat_display_override {
            return Ok(display.clone());
        }
        let vat = self.vat_amount();
        if vat == Decimal::ZERO {
            Ok(None)
        } else {
            Ok(Some(format_currency(vat)))
        }
    }

    async fn displayed_grand_total(&self) -> Result<String, DriverError> {
        self.settle().await;
        if let Some(display) = &self.grand_total_display_override {
            return Ok(display.clone());
        }
        Ok(format_currency(self.grand_total()))
    }

    async fn save(&mut self) -> Result<String, DriverError> {
        self.settle().await;
        self.take_fault()?;
        if self.selected_customer.is_none() || self.items.is_empty() {
            return Err(DriverError::Timeout(
                "Save Invoice button never became enabled".to_string(),
            ));
        }
        let number = format!("INV-{:04}", self.next_invoice_number);
        self.next_invoice_number += 1;
        self.reset_form();
        Ok(number)
    }
}
