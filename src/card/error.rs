use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid control [{control}]: {reason}")]
    InvalidControl { control: String, reason: String },

    #[error("Entity Unavailable: {0}")]
    EntityUnavailable(String),

    /// Never returned from normalization. Buttons missing fields are resolved
    /// permissively and this is only logged.
    #[error("Malformed button entry [{control}]: {reason}")]
    MalformedButtonEntry { control: String, reason: String },
}
