use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropertyCalcError {
    #[error("Invalid parameter: {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PropertyCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PropertyCalcError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PropertyCalcError {
    fn from(e: serde_json::Error) -> Self {
        PropertyCalcError::SerializationError(e.to_string())
    }
}
