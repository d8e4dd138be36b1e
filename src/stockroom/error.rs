use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockroomError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Store file not found: {} (run `stockroom init` first)", path.display())]
    StoreUnavailable { path: PathBuf },

    #[error("Store file is not a valid JSON array: {}: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Permission denied: {0}")]
    Unauthorized(String),

    #[error("Not logged in (run `stockroom login <username> <password>`)")]
    NotLoggedIn,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, StockroomError>;
