// Central Error Type for the Pipeline Core

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Construction error: {0}")]
    Construction(#[from] crate::port::ConstructionError),

    #[error("Stale demangler handle: {id} was released by a registry clear")]
    StaleHandle { id: crate::application::DemanglerId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
