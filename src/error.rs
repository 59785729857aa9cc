use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Table '{0}' does not exist.")]
    TableNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed catalog row: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
