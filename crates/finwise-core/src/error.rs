use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinwiseError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    #[error("Could not parse {field} from '{value}'")]
    Parse { field: String, value: String },

    #[error("Invalid tax table for {jurisdiction}: {reason}")]
    InvalidTable {
        jurisdiction: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinwiseError {
    fn from(e: serde_json::Error) -> Self {
        FinwiseError::SerializationError(e.to_string())
    }
}
