// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown toolchain family: {0}")]
    UnknownFamily(String),

    #[error("Invalid module id: {0}")]
    InvalidModuleId(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
