use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid chart configuration: {field} — {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        ChartError::SerializationError(e.to_string())
    }
}
