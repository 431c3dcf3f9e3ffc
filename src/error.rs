use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseQueryError {
    #[error("Failed to load category catalog from {origin}: {details}")]
    CatalogLoad { origin: String, details: String },

    #[error("Ledger request to '{endpoint}' failed with status {status}: {body}")]
    RequestFailed {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Planner returned unusable output: {0}")]
    PlannerOutput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "remote")]
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ExpenseQueryError>;
