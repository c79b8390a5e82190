use thiserror::Error;

/// Errors from the totals engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed currency string: {0:?}")]
    MalformedCurrency(String),
}
