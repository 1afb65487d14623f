use thiserror::Error;

/// Errors raised by the ledger. Only construction can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("configuration error: difficulty must be non-negative, got {0}")]
    Configuration(i64),
}
