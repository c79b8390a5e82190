//! Error taxonomy for the e2e harness.

use invoice_model::TotalsError;
use thiserror::Error;

/// Failures surfaced by a UI driver implementation.
///
/// Only [`DriverError::Transient`] is retryable; everything else is treated
/// as a permanent failure of the current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Momentary failure (stale element, interrupted navigation); safe to retry.
    #[error("transient driver failure: {0}")]
    Transient(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A dropdown or similar control does not offer the requested option.
    #[error("option {option:?} not available in {control}")]
    OptionUnavailable { control: String, option: String },

    /// The driver gave up waiting for an expected visible/enabled state.
    #[error("driver timed out: {0}")]
    Timeout(String),
}

/// Per-scenario failure classification.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Rejected before any UI interaction (negative price/quantity/rate).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Computed and displayed totals differ.
    #[error("mismatch at {step}: expected {expected:?}, actual {actual:?}")]
    AssertionMismatch {
        step: String,
        expected: String,
        actual: String,
    },

    /// The UI collaborator never reached the expected state.
    #[error("timed out at {step}; last observed state: {last_state}")]
    DriverTimeout { step: String, last_state: String },

    /// Customer/product could not be selected; aborts only this scenario.
    #[error("scenario setup failed: {0}")]
    SetupFailure(String),

    /// Driver failure that survived the retry policy.
    #[error("driver failure at {step}: {source}")]
    Driver {
        step: String,
        #[source]
        source: DriverError,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl HarnessError {
    /// Attach the step name to a driver error, folding driver timeouts and
    /// unavailable options into the harness classification.
    pub fn from_driver(step: impl Into<String>, source: DriverError) -> Self {
        let step = step.into();
        match source {
            DriverError::Timeout(last_state) => HarnessError::DriverTimeout { step, last_state },
            DriverError::OptionUnavailable { control, option } => HarnessError::SetupFailure(
                format!("could not select {option:?} in {control} at {step}"),
            ),
            other => HarnessError::Driver {
                step,
                source: other,
            },
        }
    }

    /// The step at which this failure occurred, when one is recorded.
    pub fn step(&self) -> Option<&str> {
        match self {
            HarnessError::AssertionMismatch { step, .. }
            | HarnessError::DriverTimeout { step, .. }
            | HarnessError::Driver { step, .. } => Some(step),
            _ => None,
        }
    }
}

impl From<TotalsError> for HarnessError {
    fn from(err: TotalsError) -> Self {
        match err {
            TotalsError::InvalidInput(msg) => HarnessError::InvalidInput(msg),
            TotalsError::MalformedCurrency(msg) => {
                HarnessError::SetupFailure(format!("malformed currency string: {msg:?}"))
            }
        }
    }
}
