use thiserror::Error;

/// Failures at the analysis boundary. The calculators underneath are total.
#[derive(Debug, Error)]
pub enum FarmerPayError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FarmerPayError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FarmerPayError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if the error is about one.
    pub fn field(&self) -> Option<&str> {
        match self {
            FarmerPayError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FarmerPayError {
    fn from(e: serde_json::Error) -> Self {
        FarmerPayError::SerializationError(e.to_string())
    }
}
