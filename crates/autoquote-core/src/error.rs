use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoQuoteError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AutoQuoteError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AutoQuoteError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AutoQuoteError {
    fn from(e: serde_json::Error) -> Self {
        AutoQuoteError::SerializationError(e.to_string())
    }
}
