use thiserror::Error;

/// Errors raised while loading ledgers or computing family balances.
///
/// Most calculation paths never fail: unknown school years and unparsable
/// prices degrade to "no match" or zero. The cheques payload is the exception.
#[derive(Error, Debug)]
pub enum TuitionError {
    #[error("Malformed cheques payload: {0}")]
    MalformedCheques(#[source] serde_json::Error),
    #[error("Invalid discount settings: {0}")]
    InvalidDiscount(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TuitionError>;
